//! OpenShift DeploymentConfig types (apps.openshift.io/v1)
//!
//! Only the parts of the API that influence conversion are modeled. The
//! strategy and trigger policies are Rust enums; on the wire they keep the
//! OpenShift shape so existing manifests and live objects parse unchanged.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{EnvVar, ObjectReference, PodTemplateSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// DeploymentConfig is the legacy OpenShift workload resource
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    /// Number of desired pods (absent means zero)
    #[serde(default)]
    pub replicas: i32,

    /// Seconds a new pod must be ready before it counts as available
    #[serde(default)]
    pub min_ready_seconds: i32,

    /// Number of old ReplicationControllers to retain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,

    /// Paused DeploymentConfigs do not roll out new versions
    #[serde(default)]
    pub paused: bool,

    /// Test mode: scale to zero once the rollout completes
    #[serde(default)]
    pub test: bool,

    /// Equality-based pod selector
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,

    /// Pod template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,

    /// How new versions are rolled out
    #[serde(default)]
    #[schemars(with = "StrategyManifest")]
    pub strategy: DeploymentStrategy,

    /// Conditions that start a new rollout
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<DeploymentTrigger>,
}

/// Rollout strategy of a DeploymentConfig
///
/// Serialized through [`StrategyManifest`], the OpenShift wire form where a
/// `type` string selects which of the `*Params` objects applies.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "StrategyManifest", into = "StrategyManifest")]
pub struct DeploymentStrategy {
    pub kind: StrategyKind,

    /// Parameter blocks present next to `type` that belong to another strategy
    pub unused_params: UnusedParams,

    /// Resources for the deployer pod
    pub resources: Option<ResourceRequirements>,

    /// Labels added to the deployer pod
    pub labels: BTreeMap<String, String>,

    /// Annotations added to the deployer pod
    pub annotations: BTreeMap<String, String>,

    /// Deadline for the deployer pod
    pub active_deadline_seconds: Option<i64>,
}

/// The active strategy variant and its parameters
#[derive(Clone, Debug, PartialEq)]
pub enum StrategyKind {
    Rolling(Option<RollingParams>),
    Recreate(Option<RecreateParams>),
    Custom(Option<CustomParams>),
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Recreate(None)
    }
}

/// Parameter blocks that do not match the strategy type
///
/// OpenShift accepts them, so they are kept for analysis and re-encoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnusedParams {
    pub rolling: Option<RollingParams>,
    pub recreate: Option<RecreateParams>,
    pub custom: Option<CustomParams>,
}

impl DeploymentStrategy {
    /// Rolling parameters, whether or not the strategy is Rolling
    pub fn rolling_params(&self) -> Option<&RollingParams> {
        match &self.kind {
            StrategyKind::Rolling(params) => params.as_ref(),
            _ => self.unused_params.rolling.as_ref(),
        }
    }

    /// Recreate parameters, whether or not the strategy is Recreate
    pub fn recreate_params(&self) -> Option<&RecreateParams> {
        match &self.kind {
            StrategyKind::Recreate(params) => params.as_ref(),
            _ => self.unused_params.recreate.as_ref(),
        }
    }
}

impl StrategyKind {
    /// Wire name of the strategy type
    pub fn type_name(&self) -> &'static str {
        match self {
            StrategyKind::Rolling(_) => "Rolling",
            StrategyKind::Recreate(_) => "Recreate",
            StrategyKind::Custom(_) => "Custom",
        }
    }
}

/// Wire representation of [`DeploymentStrategy`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrategyManifest {
    /// Rolling, Recreate or Custom. A missing type is read as Recreate.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_params: Option<RollingParams>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recreate_params: Option<RecreateParams>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_params: Option<CustomParams>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
}

impl TryFrom<StrategyManifest> for DeploymentStrategy {
    type Error = String;

    fn try_from(manifest: StrategyManifest) -> Result<Self, Self::Error> {
        let StrategyManifest {
            type_,
            rolling_params: rolling,
            recreate_params: recreate,
            custom_params: custom,
            resources,
            labels,
            annotations,
            active_deadline_seconds,
        } = manifest;

        let (kind, unused_params) = match type_.as_deref().unwrap_or_default() {
            "Rolling" => (
                StrategyKind::Rolling(rolling),
                UnusedParams {
                    rolling: None,
                    recreate,
                    custom,
                },
            ),
            "Recreate" | "" => (
                StrategyKind::Recreate(recreate),
                UnusedParams {
                    rolling,
                    recreate: None,
                    custom,
                },
            ),
            "Custom" => (
                StrategyKind::Custom(custom),
                UnusedParams {
                    rolling,
                    recreate,
                    custom: None,
                },
            ),
            other => {
                return Err(format!(
                    "unknown deployment strategy type '{}': must be Rolling, Recreate or Custom",
                    other
                ))
            }
        };

        Ok(DeploymentStrategy {
            kind,
            unused_params,
            resources,
            labels,
            annotations,
            active_deadline_seconds,
        })
    }
}

impl From<DeploymentStrategy> for StrategyManifest {
    fn from(strategy: DeploymentStrategy) -> Self {
        let mut manifest = StrategyManifest {
            type_: Some(strategy.kind.type_name().to_string()),
            rolling_params: strategy.unused_params.rolling,
            recreate_params: strategy.unused_params.recreate,
            custom_params: strategy.unused_params.custom,
            resources: strategy.resources,
            labels: strategy.labels,
            annotations: strategy.annotations,
            active_deadline_seconds: strategy.active_deadline_seconds,
        };

        match strategy.kind {
            StrategyKind::Rolling(params) => manifest.rolling_params = params,
            StrategyKind::Recreate(params) => manifest.recreate_params = params,
            StrategyKind::Custom(params) => manifest.custom_params = params,
        }

        manifest
    }
}

/// Parameters of the Rolling strategy
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RollingParams {
    /// Time to wait between individual pod updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_period_seconds: Option<i64>,

    /// Time to wait between polling deployment status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<i64>,

    /// Time to wait for updates before giving up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<LifecycleHook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<LifecycleHook>,
}

/// Parameters of the Recreate strategy
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<LifecycleHook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<LifecycleHook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<LifecycleHook>,
}

/// Parameters of the Custom strategy
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomParams {
    /// Image that runs the deployer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<EnvVar>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

/// Hook executed at a point of the rollout
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleHook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<HookFailurePolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_new_pod: Option<ExecNewPodHook>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_images: Vec<TagImageHook>,
}

/// What happens to the rollout when a hook fails
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub enum HookFailurePolicy {
    Abort,
    Retry,
    Ignore,
}

/// Hook that runs a command in a new pod based on a template container
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecNewPodHook {
    #[serde(default)]
    pub command: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,

    #[serde(default)]
    pub container_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
}

/// Hook that tags the image of a container
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagImageHook {
    #[serde(default)]
    pub container_name: String,

    #[serde(default)]
    pub to: ObjectReference,
}

/// Trigger policy of a DeploymentConfig
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum DeploymentTrigger {
    /// Roll out when the referenced image changes
    ImageChange {
        #[serde(rename = "imageChangeParams")]
        image_change_params: ImageChangeParams,
    },
    /// Roll out when the pod template changes
    ConfigChange,
}

/// Parameters of an image change trigger
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeParams {
    /// Whether the new image is rolled out without manual intervention
    #[serde(default)]
    pub automatic: bool,

    /// Containers whose image is updated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_names: Vec<String>,

    /// Image stream tag (or image) to watch
    #[serde(default)]
    pub from: ObjectReference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_triggered_image: Option<String>,
}

#[cfg(test)]
#[path = "deployment_config_test.rs"]
mod tests;
