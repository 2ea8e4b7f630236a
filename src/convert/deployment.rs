use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

use super::labels::{rewrite_annotations, rewrite_labels};
use super::triggers::TRIGGER_ANNOTATION;
use super::{strategy, triggers, ConvertError};
use crate::crd::DeploymentConfig;

/// Convert a DeploymentConfig into an equivalent Deployment
///
/// The Deployment gets:
/// - name, generateName and namespace of the DeploymentConfig
/// - labels and annotations with the `deploymentconfig` label renamed and
///   OpenShift bookkeeping annotations removed (object and pod template)
/// - a `matchLabels` selector built from the rewritten selector
/// - replicas, paused, minReadySeconds and revisionHistoryLimit as-is
/// - the translated strategy and progress deadline
/// - image change triggers encoded in the `image.openshift.io/triggers` annotation
///
/// `dc` is never modified. Features without an equivalent are dropped; use
/// [`super::analyze`] to find out which.
///
/// # Errors
/// Returns `ConvertError` if the rollout timeout overflows or the triggers
/// cannot be encoded. No partial Deployment is returned.
pub fn to_deployment(dc: &DeploymentConfig) -> Result<Deployment, ConvertError> {
    let DeploymentConfig { metadata, spec, .. } = dc.clone();

    let translated = strategy::translate(&spec.strategy)?;
    let trigger_payload = triggers::encode(&spec.triggers)?;

    let mut annotations = rewrite_annotations(&metadata.annotations.unwrap_or_default());
    if let Some(payload) = trigger_payload {
        annotations.insert(TRIGGER_ANNOTATION.to_string(), payload);
    }

    let mut template = spec.template.unwrap_or_default();
    if let Some(template_meta) = template.metadata.as_mut() {
        template_meta.labels = template_meta
            .labels
            .take()
            .map(|labels| rewrite_labels(&labels))
            .and_then(non_empty);
        template_meta.annotations = template_meta
            .annotations
            .take()
            .map(|annotations| rewrite_annotations(&annotations))
            .and_then(non_empty);
    }

    Ok(Deployment {
        metadata: ObjectMeta {
            name: metadata.name,
            generate_name: metadata.generate_name,
            namespace: metadata.namespace,
            labels: metadata
                .labels
                .map(|labels| rewrite_labels(&labels))
                .and_then(non_empty),
            annotations: non_empty(annotations),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(spec.replicas),
            selector: LabelSelector {
                match_labels: non_empty(rewrite_labels(&spec.selector)),
                match_expressions: None,
            },
            template,
            strategy: Some(translated.strategy),
            progress_deadline_seconds: translated.progress_deadline_seconds,
            paused: Some(spec.paused),
            min_ready_seconds: Some(spec.min_ready_seconds),
            revision_history_limit: spec.revision_history_limit,
        }),
        status: None,
    })
}

fn non_empty(map: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
#[path = "deployment_test.rs"]
mod tests;
