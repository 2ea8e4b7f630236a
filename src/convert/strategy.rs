//! Strategy translation
//!
//! Rolling becomes RollingUpdate with the same surge settings. Everything else
//! becomes Recreate. The rollout timeout of Rolling and Recreate maps onto
//! `progressDeadlineSeconds`.

use k8s_openapi::api::apps::v1::{DeploymentStrategy, RollingUpdateDeployment};

use super::ConvertError;
use crate::crd::{self, StrategyKind};

/// Deployment strategy type for rolling updates
pub const ROLLING_UPDATE: &str = "RollingUpdate";

/// Deployment strategy type for recreate
pub const RECREATE: &str = "Recreate";

const ROLLING_TIMEOUT_FIELD: &str = "spec.strategy.rollingParams.timeoutSeconds";
const RECREATE_TIMEOUT_FIELD: &str = "spec.strategy.recreateParams.timeoutSeconds";

/// Result of translating a DeploymentConfig strategy
#[derive(Clone, Debug, PartialEq)]
pub struct TranslatedStrategy {
    pub strategy: DeploymentStrategy,
    pub progress_deadline_seconds: Option<i32>,
}

/// Translate a DeploymentConfig strategy into a Deployment strategy
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `timeoutSeconds` does not fit into
/// the 32-bit `progressDeadlineSeconds`.
pub fn translate(strategy: &crd::DeploymentStrategy) -> Result<TranslatedStrategy, ConvertError> {
    match &strategy.kind {
        StrategyKind::Rolling(params) => {
            let params = params.as_ref();
            let rolling_update = RollingUpdateDeployment {
                max_surge: params.and_then(|p| p.max_surge.clone()),
                max_unavailable: params.and_then(|p| p.max_unavailable.clone()),
            };
            let deadline = params
                .and_then(|p| p.timeout_seconds)
                .map(|timeout| deadline_seconds(ROLLING_TIMEOUT_FIELD, timeout))
                .transpose()?;

            Ok(TranslatedStrategy {
                strategy: DeploymentStrategy {
                    type_: Some(ROLLING_UPDATE.to_string()),
                    rolling_update: Some(rolling_update),
                },
                progress_deadline_seconds: deadline,
            })
        }
        StrategyKind::Recreate(params) => {
            let deadline = params
                .as_ref()
                .and_then(|p| p.timeout_seconds)
                .map(|timeout| deadline_seconds(RECREATE_TIMEOUT_FIELD, timeout))
                .transpose()?;

            Ok(TranslatedStrategy {
                strategy: recreate(),
                progress_deadline_seconds: deadline,
            })
        }
        // Custom deployers have no Deployment equivalent
        StrategyKind::Custom(_) => Ok(TranslatedStrategy {
            strategy: recreate(),
            progress_deadline_seconds: None,
        }),
    }
}

fn recreate() -> DeploymentStrategy {
    DeploymentStrategy {
        type_: Some(RECREATE.to_string()),
        rolling_update: None,
    }
}

fn deadline_seconds(field: &'static str, value: i64) -> Result<i32, ConvertError> {
    i32::try_from(value).map_err(|_| ConvertError::OutOfRange { field, value })
}

#[cfg(test)]
#[path = "strategy_test.rs"]
mod tests;
