use serde::{Deserialize, Serialize};

/// Frame reader lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReaderState {
    /// Transport open; startup line and title not yet consumed
    AwaitingTitle,
    /// Decoding frames
    Streaming,
    Stopped {
        reason: String,
    },
}

impl ReaderState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &ReaderState) -> bool {
        use ReaderState::*;

        matches!(
            (self, target),
            (AwaitingTitle, Streaming) | (AwaitingTitle, Stopped { .. }) | (Streaming, Stopped { .. })
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::AwaitingTitle => "AwaitingTitle",
            Self::Streaming => "Streaming",
            Self::Stopped { .. } => "Stopped",
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::AwaitingTitle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        let stopped = ReaderState::Stopped {
            reason: "done".to_string(),
        };

        assert!(ReaderState::AwaitingTitle.can_transition_to(&ReaderState::Streaming));
        assert!(ReaderState::Streaming.can_transition_to(&stopped));
        assert!(ReaderState::AwaitingTitle.can_transition_to(&stopped));
    }

    #[test]
    fn test_no_way_back() {
        let stopped = ReaderState::Stopped {
            reason: "done".to_string(),
        };

        assert!(!ReaderState::Streaming.can_transition_to(&ReaderState::AwaitingTitle));
        assert!(!ReaderState::Streaming.can_transition_to(&ReaderState::Streaming));
        assert!(!stopped.can_transition_to(&ReaderState::Streaming));
        assert!(!stopped.can_transition_to(&stopped.clone()));
    }
}
