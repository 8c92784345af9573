pub mod canonicalize;
pub mod run;
pub mod summary;
