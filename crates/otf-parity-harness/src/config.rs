/// Client library version reports are compared against.
pub const DEFAULT_CLIENT_VERSION: &str = "0.15.4";

/// How the body-composition probe treats its date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyCompositionWindow {
    /// Report every scan the API returns; the window is informational only.
    #[default]
    Unbounded,
    /// Keep only scans whose date falls inside the window.
    Enforce,
}

/// Whether guarded "no data" failures are copied into the flat error list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardedFailurePolicy {
    /// Recorded under `tests` only.
    #[default]
    TestsOnly,
    /// Recorded under `tests` and appended to `errors`.
    Mirror,
}

/// Harness settings.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Trailing window of the recent-workouts query, in days (default: 35).
    pub workout_window_days: i64,
    /// Window reported by the body-composition probe, in days (default: 90).
    pub body_composition_window_days: i64,
    /// Whether the body-composition window filters results (default: unbounded).
    pub body_composition_window: BodyCompositionWindow,
    /// Error-list policy for guarded failures (default: tests only).
    pub guarded_failures: GuardedFailurePolicy,
    /// Workouts with fewer calories than this are dropped (default: 100).
    pub calorie_floor: i64,
    /// Expected client library version written to the report.
    pub client_version_expected: String,
    /// Description of this implementation written to the report.
    pub environment_version: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workout_window_days: 35,
            body_composition_window_days: 90,
            body_composition_window: BodyCompositionWindow::Unbounded,
            guarded_failures: GuardedFailurePolicy::TestsOnly,
            calorie_floor: 100,
            client_version_expected: DEFAULT_CLIENT_VERSION.to_string(),
            environment_version: format!(
                "{} {} (rust)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}
