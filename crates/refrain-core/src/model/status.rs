/// Lifecycle of the current search. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// The search failed; carries the user-facing message.
    Error(String),
}

impl SearchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, if the last search failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
