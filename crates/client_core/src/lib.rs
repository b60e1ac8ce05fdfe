use thiserror::Error;

pub mod dashboard;
pub mod directory;
pub mod form;
mod roster;
pub mod submit;

pub use dashboard::{AttendanceSummary, DashboardFeed, GuestTally, SpecialMessage};
pub use directory::GuestDirectory;
pub use form::{Field, GuestCountMode, RsvpForm, ValidationError};
pub use submit::{SubmissionClient, SubmitError};

/// The roster export (or its proxied dashboard mirror) could not be fetched.
/// Never fatal: callers fall back to an empty result set or an error banner.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("roster source unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
