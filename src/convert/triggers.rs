//! Image trigger encoding
//!
//! Deployments have no trigger policies. OpenShift instead watches the
//! `image.openshift.io/triggers` annotation, a JSON list of object field
//! triggers that point an image stream tag at a container of the pod template.

use serde::{Deserialize, Serialize};

use super::ConvertError;
use crate::crd::DeploymentTrigger;

/// Annotation holding the encoded image triggers
pub const TRIGGER_ANNOTATION: &str = "image.openshift.io/triggers";

const TRIGGERS_FIELD: &str = "spec.triggers";

/// One entry of the trigger annotation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFieldTrigger {
    pub from: TriggerSource,
    pub field_path: String,
}

/// Image the trigger watches
///
/// `kind` and `name` are always written; `namespace` and `apiVersion` only
/// when set.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSource {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

/// JSONPath of the container named `container` in a Deployment's pod template
pub fn container_field_path(container: &str) -> String {
    format!("spec.template.spec.containers[?(@.name==\"{}\")]", container)
}

/// Object field triggers for every container of every image change trigger
///
/// Entries follow trigger order, then container order. Config change
/// triggers have no counterpart and are skipped.
pub fn object_field_triggers(triggers: &[DeploymentTrigger]) -> Vec<ObjectFieldTrigger> {
    triggers
        .iter()
        .filter_map(|trigger| match trigger {
            DeploymentTrigger::ImageChange {
                image_change_params,
            } => Some(image_change_params),
            DeploymentTrigger::ConfigChange => None,
        })
        .flat_map(|params| {
            let from = TriggerSource {
                kind: params.from.kind.clone().unwrap_or_default(),
                name: params.from.name.clone().unwrap_or_default(),
                namespace: params.from.namespace.clone().unwrap_or_default(),
                api_version: params.from.api_version.clone().unwrap_or_default(),
            };
            params
                .container_names
                .iter()
                .map(move |container| ObjectFieldTrigger {
                    from: from.clone(),
                    field_path: container_field_path(container),
                })
        })
        .collect()
}

/// Encode image change triggers as the trigger annotation value
///
/// Returns `None` when there is nothing to encode, in which case the
/// annotation must not be set at all.
pub fn encode(triggers: &[DeploymentTrigger]) -> Result<Option<String>, ConvertError> {
    let entries = object_field_triggers(triggers);
    if entries.is_empty() {
        return Ok(None);
    }

    serde_json::to_string(&entries)
        .map(Some)
        .map_err(|source| ConvertError::TriggerEncoding {
            field: TRIGGERS_FIELD,
            source,
        })
}

#[cfg(test)]
#[path = "triggers_test.rs"]
mod tests;
