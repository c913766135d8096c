use serde::{Deserialize, Deserializer, Serialize};

fn default_max_consecutive_errors() -> usize {
    16
}

/// What the frame reader does when a single frame fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// End the stream with the error
    Stop,

    /// Drop the frame, realign on the next terminator if needed, and keep
    /// reading. More than `max_consecutive_errors` bad frames in a row is
    /// treated as fatal.
    SkipFrame {
        #[serde(default = "default_max_consecutive_errors")]
        max_consecutive_errors: usize,
    },
}

impl ErrorPolicy {
    pub fn skip_frame() -> Self {
        Self::SkipFrame {
            max_consecutive_errors: default_max_consecutive_errors(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::SkipFrame { .. } => "skip_frame",
        }
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::skip_frame()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PolicyKind {
    Stop,
    #[default]
    SkipFrame,
}

/// Accepted config shape; every key is optional
#[derive(Debug, Deserialize)]
struct PolicySpec {
    #[serde(default)]
    policy: PolicyKind,
    #[serde(default = "default_max_consecutive_errors")]
    max_consecutive_errors: usize,
}

impl<'de> Deserialize<'de> for ErrorPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = PolicySpec::deserialize(deserializer)?;
        Ok(match spec.policy {
            PolicyKind::Stop => Self::Stop,
            PolicyKind::SkipFrame => Self::SkipFrame {
                max_consecutive_errors: spec.max_consecutive_errors,
            },
        })
    }
}
