use crate::errors::{ClientError, SessionError};
use chrono::NaiveDate;
use otf_parity_model::{BodyCompositionRecord, Booking, Member, Workout};
use std::fmt;

/// Environment variable holding the account identifier.
pub const EMAIL_VAR: &str = "OTF_EMAIL";
/// Environment variable holding the account secret.
pub const PASSWORD_VAR: &str = "OTF_PASSWORD";

/// Authenticated handle to the fitness API.
///
/// Every call is blocking. The harness owns exactly one session per run.
pub trait FitnessClient {
    /// Fetches the signed-in member.
    fn member(&self) -> Result<Member, ClientError>;
    /// Fetches workouts whose class started between `start` and `end`, inclusive.
    fn workouts(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Workout>, ClientError>;
    /// Fetches every body-composition scan on file.
    fn body_composition_list(&self) -> Result<Vec<BodyCompositionRecord>, ClientError>;
    /// Fetches current bookings.
    fn bookings_new(&self) -> Result<Vec<Booking>, ClientError>;
}

/// Account credentials consumed by an [`Authenticator`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account identifier.
    pub email: String,
    /// Account secret; the authenticator may fall back to cached tokens without it.
    pub password: Option<String>,
}

impl Credentials {
    /// Reads credentials from the process environment.
    pub fn from_env() -> Result<Self, SessionError> {
        let email = std::env::var(EMAIL_VAR).unwrap_or_default();
        let password = std::env::var(PASSWORD_VAR).ok().filter(|p| !p.is_empty());
        Self::new(email, password)
    }

    /// Builds credentials, rejecting an empty identifier.
    pub fn new(email: impl Into<String>, password: Option<String>) -> Result<Self, SessionError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(SessionError::MissingCredential(EMAIL_VAR));
        }
        Ok(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Turns credentials into an authenticated session.
pub trait Authenticator {
    /// Authenticates once; failures are fatal for the run.
    fn authenticate(&self, credentials: &Credentials) -> Result<Box<dyn FitnessClient>, SessionError>;
}
