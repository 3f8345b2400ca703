use crate::types::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Unknown category label: {0:?}")]
    UnknownCategoryLabel(String),

    #[error("Malformed event payload: {0}")]
    MalformedEventPayload(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Counter for {0} would overflow")]
    CounterOverflow(Category),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StrataError {
    /// Short stable label for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            StrataError::UnknownCategoryLabel(_) => "unknown_category",
            StrataError::MalformedEventPayload(_) => "malformed_payload",
            StrataError::Transport(_) => "transport",
            StrataError::CounterOverflow(_) => "counter_overflow",
            StrataError::Config(_) => "config",
        }
    }

    /// Whether the error rejects a single event and leaves the pipeline
    /// able to accept the next one.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StrataError::UnknownCategoryLabel(_)
                | StrataError::MalformedEventPayload(_)
                | StrataError::CounterOverflow(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StrataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            StrataError::UnknownCategoryLabel("Lynx".into()).kind(),
            "unknown_category"
        );
        assert_eq!(
            StrataError::MalformedEventPayload("empty".into()).kind(),
            "malformed_payload"
        );
        assert_eq!(StrataError::Transport("reset".into()).kind(), "transport");
    }

    #[test]
    fn test_rejections_are_event_scoped() {
        assert!(StrataError::UnknownCategoryLabel("x".into()).is_rejection());
        assert!(StrataError::CounterOverflow(Category::Opera).is_rejection());
        assert!(!StrataError::Transport("x".into()).is_rejection());
        assert!(!StrataError::Config("x".into()).is_rejection());
    }

    #[test]
    fn test_display_quotes_label() {
        let err = StrataError::UnknownCategoryLabel("Netscape".into());
        assert_eq!(err.to_string(), "Unknown category label: \"Netscape\"");
    }
}
