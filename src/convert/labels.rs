//! Label and annotation rewriting
//!
//! OpenShift stamps DeploymentConfigs and their pods with bookkeeping
//! annotations and a `deploymentconfig` label. The annotations are dropped and
//! the label is renamed to `deployment` on the converted object.

use std::collections::BTreeMap;

use super::triggers::TRIGGER_ANNOTATION;

/// Label OpenShift puts on pods owned by a DeploymentConfig
pub const DEPLOYMENT_CONFIG_LABEL: &str = "deploymentconfig";

/// Label that replaces [`DEPLOYMENT_CONFIG_LABEL`]
pub const DEPLOYMENT_LABEL: &str = "deployment";

/// Label keys renamed on selectors and pod templates (old, new)
pub const LABEL_RENAMES: &[(&str, &str)] = &[(DEPLOYMENT_CONFIG_LABEL, DEPLOYMENT_LABEL)];

/// Annotations managed by OpenShift for DeploymentConfigs
pub const STRIPPED_ANNOTATIONS: &[&str] = &[
    "openshift.io/deployment-config.latest-version",
    "openshift.io/deployment-config.name",
    "openshift.io/deployment.phase",
    "openshift.io/deployment.replicas",
    "openshift.io/deployment.status-reason",
    "openshift.io/deployment.cancelled",
    "openshift.io/deployer-pod.name",
    "openshift.io/encoded-deployment-config",
    "kubectl.kubernetes.io/last-applied-configuration",
];

// The trigger annotation is added after stripping and must survive it.
const _: () = assert!(
    !is_stripped(TRIGGER_ANNOTATION),
    "trigger annotation must not be in STRIPPED_ANNOTATIONS"
);

const fn is_stripped(key: &str) -> bool {
    let mut i = 0;
    while i < STRIPPED_ANNOTATIONS.len() {
        if str_eq(STRIPPED_ANNOTATIONS[i], key) {
            return true;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Copy of `annotations` without the OpenShift bookkeeping annotations
pub fn rewrite_annotations(annotations: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    annotations
        .iter()
        .filter(|(key, _)| !STRIPPED_ANNOTATIONS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Copy of `labels` with every key in [`LABEL_RENAMES`] moved to its new name
///
/// A value already present under the new name is overwritten.
pub fn rewrite_labels(labels: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut rewritten = labels.clone();

    for (old, new) in LABEL_RENAMES {
        if let Some(value) = rewritten.remove(*old) {
            rewritten.insert((*new).to_string(), value);
        }
    }

    rewritten
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod tests;
