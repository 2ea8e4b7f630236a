//! Loading DeploymentConfigs
//!
//! A DeploymentConfig comes either from a manifest (file or stdin) or from a
//! live cluster.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Api, Client, Config};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::crd::DeploymentConfig;
use crate::output::STDIO_PATH;

/// Namespace used when none is given for a live lookup
pub const DEFAULT_NAMESPACE: &str = "default";

const DEPLOYMENT_CONFIG_KIND: &str = "DeploymentConfig";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse DeploymentConfig: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("expected kind DeploymentConfig, got {0}")]
    WrongKind(String),

    #[error("unable to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("unable to create Kubernetes client: {0}")]
    Client(#[source] kube::Error),

    #[error("unable to load DeploymentConfig {namespace}/{name}: {source}")]
    Fetch {
        name: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },
}

#[derive(Deserialize)]
struct ManifestKind {
    #[serde(default)]
    kind: Option<String>,
}

/// Parse a YAML or JSON DeploymentConfig manifest
///
/// A manifest without `kind` is accepted; any other kind is rejected.
pub fn parse_document(text: &str) -> Result<DeploymentConfig, SourceError> {
    let header: ManifestKind = serde_yaml::from_str(text)?;
    if let Some(kind) = header.kind {
        if kind != DEPLOYMENT_CONFIG_KIND {
            return Err(SourceError::WrongKind(kind));
        }
    }

    Ok(serde_yaml::from_str(text)?)
}

/// Read and parse a manifest from `path`, or from stdin when `path` is `-`
pub fn load_from_path(path: &Path) -> Result<DeploymentConfig, SourceError> {
    let read_error = |source: io::Error| SourceError::Read {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new(STDIO_PATH) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        text
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    debug!(path = %path.display(), bytes = text.len(), "Read DeploymentConfig manifest");
    parse_document(&text)
}

/// Build a client from `kubeconfig`, or from the default kubeconfig
/// (`$KUBECONFIG` or `~/.kube/config`) when no path is given
pub async fn client_for(kubeconfig: Option<&Path>) -> Result<Client, SourceError> {
    let raw = match kubeconfig {
        Some(path) => {
            debug!(kubeconfig = %path.display(), "Using kubeconfig");
            Kubeconfig::read_from(path)?
        }
        None => Kubeconfig::read()?,
    };

    let config = Config::from_custom_kubeconfig(raw, &KubeConfigOptions::default()).await?;
    debug!(host = %config.cluster_url, "Built client config");

    Client::try_from(config).map_err(SourceError::Client)
}

/// Fetch a DeploymentConfig from the cluster
pub async fn fetch(
    client: Client,
    name: &str,
    namespace: Option<&str>,
) -> Result<DeploymentConfig, SourceError> {
    let namespace = namespace
        .filter(|ns| !ns.is_empty())
        .unwrap_or(DEFAULT_NAMESPACE);
    let api: Api<DeploymentConfig> = Api::namespaced(client, namespace);

    debug!(name, namespace, "Fetching DeploymentConfig");
    api.get(name).await.map_err(|source| SourceError::Fetch {
        name: name.to_string(),
        namespace: namespace.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
