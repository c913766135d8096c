use serde::{Deserialize, Serialize};

/// One decoded frame: a device timestamp and the value measured at it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: i64,
    pub value: i64,
}

impl Sample {
    pub fn new(timestamp: i64, value: i64) -> Self {
        Self { timestamp, value }
    }
}
