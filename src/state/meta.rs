//! State metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stamped into `quick_run.json` on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMeta {
    /// Version of the tool that wrote the file
    pub version: String,

    pub saved_at: DateTime<Utc>,
}

impl StateMeta {
    pub fn now() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            saved_at: Utc::now(),
        }
    }
}
