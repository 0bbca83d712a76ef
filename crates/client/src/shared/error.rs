use thiserror::Error;

/// Errors surfaced by the console core
///
/// Nothing is retried: every variant is returned to the caller, which decides
/// how to present it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Operation requires the administrator role")]
    Forbidden,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(
        "Bulk update incomplete: {applied} applied, {} failed ({})",
        .failed.len(),
        describe_failures(.failed)
    )]
    PartialBatch {
        applied: usize,
        failed: Vec<BatchFailure>,
    },
}

/// Invalid input, rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No owner selected")]
    NoOwnerSelected,

    #[error("Unknown owner: {0}")]
    UnknownOwner(String),

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("No gestión record for task {0}")]
    UnknownRecord(String),

    #[error("Unknown responsible user: {0}")]
    UnknownResponsable(String),

    #[error("Invalid avance {0}, expected one of 0, 3, 5")]
    InvalidAvance(i64),

    #[error("Invalid link (http/https expected): {0}")]
    InvalidLink(String),

    #[error("Nothing to save: every tracked field is empty")]
    EmptyGestion,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid email in {field}: {value}")]
    InvalidEmail { field: String, value: String },

    #[error("Session has no cédula")]
    MissingCedula,
}

/// One member whose backend call failed during a bulk operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub member: String,
    pub reason: String,
}

fn describe_failures(failed: &[BatchFailure]) -> String {
    failed
        .iter()
        .map(|f| format!("{}: {}", f.member, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConsoleError {
    /// Members named by a partial-batch failure
    pub fn failed_members(&self) -> Vec<&str> {
        match self {
            ConsoleError::PartialBatch { failed, .. } => {
                failed.iter().map(|f| f.member.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ConsoleError::Unauthorized | ConsoleError::Forbidden)
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ConsoleError::Timeout(e.to_string())
        } else if e.is_decode() {
            ConsoleError::Decode(e.to_string())
        } else {
            ConsoleError::Network(e.to_string())
        }
    }
}
