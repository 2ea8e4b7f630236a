//! Command line interface
//!
//! Flags follow kubectl where possible. Without a NAME the DeploymentConfig is
//! read from `--filename`; with a NAME it is fetched from the cluster.

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::output::{OutputFormat, STDIO_PATH};

/// Highest supported verbosity level
pub const MAX_VERBOSITY: u8 = 4;

/// Longest allowed DNS-1123 subdomain
const MAX_DNS_SUBDOMAIN_LENGTH: usize = 253;

const EXAMPLES: &str = "\
Examples:
  From file:
    dc2deploy -f dc.yaml --outfile deploy.yaml

  From Kubernetes:
    dc2deploy dcname -n namespacename --dry-run";

/// Convert OpenShift DeploymentConfig to Kubernetes Deployment
#[derive(Parser, Debug, Clone)]
#[command(name = "dc2deploy", version)]
#[command(
    about = "Convert OpenShift DeploymentConfig to Kubernetes Deployment",
    long_about = "Convert OpenShift DeploymentConfig to Kubernetes Deployment. It can source from and \
                  output to json, yaml, or kubernetes. Flags and args match kubectl where possible.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Name of the DeploymentConfig to load from the cluster
    #[arg(value_parser = parse_resource_name, conflicts_with_all = ["filename", "outfile"])]
    pub name: Option<String>,

    /// File containing the DeploymentConfig manifest (`-` for stdin)
    #[arg(short = 'f', long, default_value = STDIO_PATH, conflicts_with = "kubeconfig")]
    pub filename: PathBuf,

    /// Only print the Deployment that would be applied
    #[arg(long)]
    pub dry_run: bool,

    /// Namespace of the DeploymentConfig
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Path to kubeconfig
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Output filename (`-` for stdout)
    #[arg(long, default_value = STDIO_PATH)]
    pub outfile: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Convert even if the Deployment cannot represent every feature
    #[arg(long)]
    pub ignore_warnings: bool,

    /// Verbosity level (0-4, higher values are clamped)
    #[arg(short = 'v', long, default_value_t = 0)]
    pub verbosity: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("cannot specify input filename and live options (--dry-run, --namespace, --kubeconfig) without a DeploymentConfig name")]
    LiveOptionsWithoutName,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Convert a manifest from a file or stdin
    File { input: PathBuf, output: PathBuf },
    /// Convert a DeploymentConfig from the cluster
    Live {
        name: String,
        namespace: Option<String>,
        kubeconfig: Option<PathBuf>,
        dry_run: bool,
    },
}

impl Cli {
    /// Resolve the flags into a [`Mode`]
    pub fn mode(&self) -> Result<Mode, CliError> {
        match &self.name {
            Some(name) => Ok(Mode::Live {
                name: name.clone(),
                namespace: self.namespace.clone(),
                kubeconfig: self.kubeconfig.clone(),
                dry_run: self.dry_run,
            }),
            None => {
                if self.dry_run || self.namespace.is_some() || self.kubeconfig.is_some() {
                    return Err(CliError::LiveOptionsWithoutName);
                }
                Ok(Mode::File {
                    input: self.filename.clone(),
                    output: self.outfile.clone(),
                })
            }
        }
    }

    /// Verbosity clamped to [`MAX_VERBOSITY`]
    pub fn verbosity(&self) -> u8 {
        u8::try_from(self.verbosity)
            .unwrap_or(MAX_VERBOSITY)
            .min(MAX_VERBOSITY)
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbosity() {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether the rendered Deployment is printed on stdout
    pub fn writes_to_stdout(&self) -> bool {
        match &self.name {
            Some(_) => self.dry_run,
            None => self.outfile == Path::new(STDIO_PATH),
        }
    }
}

/// clap value parser for the DeploymentConfig name
fn parse_resource_name(name: &str) -> Result<String, String> {
    validate_dns_subdomain(name)
        .map(|()| name.to_string())
        .map_err(|e| format!("invalid deploymentconfig name: {}", e))
}

/// Validate a Kubernetes object name (RFC 1123 subdomain)
///
/// # Validation Rules
/// - 1 to 253 characters
/// - lowercase alphanumerics, `-` and `.`
/// - every `.`-separated part starts and ends with an alphanumeric
pub fn validate_dns_subdomain(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if name.len() > MAX_DNS_SUBDOMAIN_LENGTH {
        return Err(format!(
            "must be no more than {} characters, got {}",
            MAX_DNS_SUBDOMAIN_LENGTH,
            name.len()
        ));
    }

    let is_alphanumeric = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    for part in name.split('.') {
        let valid = part.chars().all(|c| is_alphanumeric(c) || c == '-')
            && part.starts_with(is_alphanumeric)
            && part.ends_with(is_alphanumeric);
        if !valid {
            return Err(format!(
                "'{}' must consist of lower case alphanumeric characters, '-' or '.', \
                 and must start and end with an alphanumeric character",
                name
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
