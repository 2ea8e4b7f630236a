//! DeploymentConfig to Deployment conversion
//!
//! The conversion is split in two independent steps:
//! - [`analyze`]: report features that a Deployment cannot express
//! - [`to_deployment`]: build the Deployment
//!
//! Neither step logs or touches the caller's object. Deciding what to do with
//! findings is up to the caller.

mod analyze;
mod deployment;
pub mod labels;
pub mod strategy;
pub mod triggers;

use thiserror::Error;

pub use analyze::{
    analyze, Finding, CHANGED_LABEL, CUSTOM_STRATEGY, LIFECYCLE_HOOKS, OWNER_REFERENCE,
    ROLLING_INTERVAL_SECONDS, ROLLING_UPDATE_PERIOD_SECONDS, TEST_MODE,
};
pub use deployment::to_deployment;

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{field} value {value} does not fit in a 32-bit integer")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("unable to encode {field}: {source}")]
    TriggerEncoding {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// Path of the source field that caused the error
    pub fn field(&self) -> &'static str {
        match self {
            ConvertError::OutOfRange { field, .. } => field,
            ConvertError::TriggerEncoding { field, .. } => field,
        }
    }
}
