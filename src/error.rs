use std::fmt;

/// What kind of board container a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Board,
    List,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Board => f.write_str("board"),
            Container::List => f.write_str("list"),
        }
    }
}

/// Named failures of a review run. Everything else is plumbing and travels as `anyhow::Error`.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("No {kind} '{name}' found")]
    NotFound { kind: Container, name: String },

    #[error("Failed to render report: {0}")]
    Render(String),
}

impl From<fmt::Error> for ReviewError {
    fn from(err: fmt::Error) -> Self {
        ReviewError::Render(err.to_string())
    }
}
