//! dc2deploy converts OpenShift DeploymentConfigs into Kubernetes Deployments
//!
//! - [`crd`]: the DeploymentConfig resource
//! - [`convert`]: compatibility analysis and conversion
//! - [`source`] / [`output`]: reading DeploymentConfigs and writing Deployments
//! - [`cli`] / [`command`]: the `dc2deploy` command

pub mod cli;
pub mod command;
pub mod convert;
pub mod crd;
pub mod output;
pub mod source;
