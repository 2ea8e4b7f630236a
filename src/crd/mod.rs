//! Source resource types
//!
//! The DeploymentConfig resource as served by `apps.openshift.io/v1`.

pub mod deployment_config;

pub use deployment_config::{
    CustomParams, DeploymentConfig, DeploymentConfigSpec, DeploymentStrategy, DeploymentTrigger,
    ExecNewPodHook, HookFailurePolicy, ImageChangeParams, LifecycleHook, RecreateParams,
    RollingParams, StrategyKind, StrategyManifest, TagImageHook, UnusedParams,
};
