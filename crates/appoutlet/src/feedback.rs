/// A message produced while processing many items, where a problem with
/// one item does not stop the others.
///
/// Callers decide how to present these (the CLI prints them to stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The item was skipped and processing continued.
    Warning(String),
    /// Something failed in a way the caller should surface prominently.
    Error(String),
}

impl Feedback {
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Warning(msg) | Self::Error(msg) => msg,
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning(msg) => write!(f, "warning: {msg}"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}
