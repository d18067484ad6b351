use thiserror::Error;

/// Errors surfaced by console operations
///
/// Every variant renders as a human readable sentence; nothing here is fatal
/// to the process, callers show the text and keep their previous state.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Network failure, timeout, or a body that could not be decoded
    #[error("Network error: {0}")]
    Transport(String),

    /// Caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    /// Session file could not be read, written or removed
    #[error("Session error: {0}")]
    Session(String),

    #[error("Sorry, this function is out of your scope.")]
    Unauthorized,
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    /// Whether the failure happened before the request left the process
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_)
                | ConsoleError::Import(_)
                | ConsoleError::Session(_)
                | ConsoleError::Unauthorized
        )
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            format!("could not connect to the server: {}", e)
        } else if e.is_decode() {
            format!("unexpected response from server: {}", e)
        } else {
            e.to_string()
        };
        ConsoleError::Transport(message)
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let rejected = ConsoleError::Rejected {
            status: 409,
            message: "Design already exists".into(),
        };
        assert_eq!(rejected.to_string(), "Design already exists");
        assert_eq!(
            ConsoleError::validation("Company is required").to_string(),
            "Company is required"
        );
        assert!(ConsoleError::Unauthorized.is_local());
        assert!(!ConsoleError::Transport("x".into()).is_local());
        assert_eq!(
            ConsoleError::Session("permission denied".into()).to_string(),
            "Session error: permission denied"
        );
    }
}
