//! Feature compatibility analysis
//!
//! Detects DeploymentConfig features that are lost or changed when converting
//! to a Deployment.

use std::fmt;

use super::labels::DEPLOYMENT_CONFIG_LABEL;
use crate::crd::{DeploymentConfig, StrategyKind};

/// A DeploymentConfig feature without a faithful Deployment equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Finding {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (path: {})", self.name, self.description, self.path)
    }
}

pub const OWNER_REFERENCE: Finding = Finding {
    name: "OwnerReference",
    path: "metadata.ownerReferences",
    description: "DeploymentConfigs with ownerReferences set are managed by another process.",
};

pub const TEST_MODE: Finding = Finding {
    name: "UnsupportedFeature-Test",
    path: "spec.test",
    description: "The test feature is not supported on Deployments.",
};

pub const CUSTOM_STRATEGY: Finding = Finding {
    name: "UnsupportedFeature-CustomStrategy",
    path: "spec.strategy.type",
    description: "The Custom deployment strategy is not supported on Deployments.",
};

pub const LIFECYCLE_HOOKS: Finding = Finding {
    name: "UnsupportedFeature-LifecycleHooks",
    path: "spec.strategy.*Params.[pre,mid,post]",
    description: "Lifecycle hooks are not supported on Deployments.",
};

pub const ROLLING_INTERVAL_SECONDS: Finding = Finding {
    name: "UnsupportedFeature-RollingIntervalSeconds",
    path: "spec.strategy.rollingParams.intervalSeconds",
    description: "The intervalSeconds setting is not supported on Deployments.",
};

pub const ROLLING_UPDATE_PERIOD_SECONDS: Finding = Finding {
    name: "UnsupportedFeature-RollingUpdatePeriodSeconds",
    path: "spec.strategy.rollingParams.updatePeriodSeconds",
    description: "The updatePeriodSeconds setting is not supported on Deployments.",
};

pub const CHANGED_LABEL: Finding = Finding {
    name: "ChangedLabel",
    path: "spec.selector",
    description: "The selector label 'deploymentconfig' will be changed to 'deployment'.",
};

/// Report the features of `dc` that a Deployment cannot represent
///
/// Findings are returned in a fixed order:
/// 1. owner references
/// 2. test mode
/// 3. strategy: custom strategy, else the rolling parameters if present
///    (hooks, timing settings), else the recreate parameters (hooks). A
///    parameter block counts even when it does not match the strategy type.
/// 4. the `deploymentconfig` selector label
///
/// An empty list means the conversion is lossless.
pub fn analyze(dc: &DeploymentConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if dc
        .metadata
        .owner_references
        .as_ref()
        .is_some_and(|refs| !refs.is_empty())
    {
        findings.push(OWNER_REFERENCE);
    }

    if dc.spec.test {
        findings.push(TEST_MODE);
    }

    // Branches follow the parameter blocks present, whatever `type` says
    let strategy = &dc.spec.strategy;
    if let StrategyKind::Custom(_) = strategy.kind {
        findings.push(CUSTOM_STRATEGY);
    } else if let Some(params) = strategy.rolling_params() {
        if params.pre.is_some() || params.post.is_some() {
            findings.push(LIFECYCLE_HOOKS);
        }
        if params.interval_seconds.is_some() {
            findings.push(ROLLING_INTERVAL_SECONDS);
        }
        if params.update_period_seconds.is_some() {
            findings.push(ROLLING_UPDATE_PERIOD_SECONDS);
        }
    } else if let Some(params) = strategy.recreate_params() {
        if params.pre.is_some() || params.mid.is_some() || params.post.is_some() {
            findings.push(LIFECYCLE_HOOKS);
        }
    }

    if dc.spec.selector.contains_key(DEPLOYMENT_CONFIG_LABEL) {
        findings.push(CHANGED_LABEL);
    }

    findings
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
