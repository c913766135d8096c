use super::ErrorPolicy;
use crate::protocol::FrameError;

/// How the reader should continue after a recoverable frame error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Stream is still aligned; just move on to the next frame
    DropFrame,
    /// Stream lost alignment; scan forward to the next terminator first
    Realign,
}

/// Applies an [`ErrorPolicy`] to the errors coming out of the frame reader
/// and counts consecutive failures.
#[derive(Debug, Clone)]
pub struct FrameGuard {
    policy: ErrorPolicy,
    consecutive_errors: usize,
}

impl FrameGuard {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            consecutive_errors: 0,
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn consecutive_errors(&self) -> usize {
        self.consecutive_errors
    }

    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    /// Decide whether `err` ends the stream. Returns the error back when it
    /// is fatal under the current policy.
    pub fn handle(&mut self, err: FrameError) -> Result<Recovery, FrameError> {
        if !err.is_recoverable() {
            return Err(err);
        }

        match self.policy {
            ErrorPolicy::Stop => Err(err),
            ErrorPolicy::SkipFrame { max_consecutive_errors } => {
                self.consecutive_errors += 1;
                if self.consecutive_errors > max_consecutive_errors {
                    return Err(err);
                }
                match err {
                    FrameError::BadTerminator { .. } => Ok(Recovery::Realign),
                    _ => Ok(Recovery::DropFrame),
                }
            }
        }
    }
}
