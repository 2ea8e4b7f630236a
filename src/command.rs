//! Running a conversion end to end
//!
//! Loads the DeploymentConfig, reports findings, converts, and writes the
//! Deployment to a file, stdout, or the cluster.

use std::path::Path;

use anyhow::Context;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, Patch, PatchParams};
use kube::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Mode};
use crate::convert::{analyze, to_deployment, Finding};
use crate::crd::DeploymentConfig;
use crate::output::{self, STDIO_PATH};
use crate::source::{self, DEFAULT_NAMESPACE};

/// Field manager used for server-side apply
pub const FIELD_MANAGER: &str = "dc2deploy";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("conversion warnings found ({}); use --ignore-warnings to continue", names(.0))]
    UnresolvedFindings(Vec<Finding>),

    #[error("Deployment has no name; cannot apply an object that only sets generateName")]
    MissingName,
}

fn names(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run the invocation described by `cli`
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    match cli.mode()? {
        Mode::File { input, output } => convert_file(cli, &input, &output),
        Mode::Live {
            name,
            namespace,
            kubeconfig,
            dry_run,
        } => {
            convert_live(
                cli,
                &name,
                namespace.as_deref(),
                kubeconfig.as_deref(),
                dry_run,
            )
            .await
        }
    }
}

/// Convert a manifest file (or stdin) and write the result to `outfile`
pub fn convert_file(cli: &Cli, input: &Path, outfile: &Path) -> anyhow::Result<()> {
    let dc = source::load_from_path(input)
        .with_context(|| format!("unable to load {}", input.display()))?;

    let deployment = convert(cli, &dc)?;

    let rendered = output::render(&deployment, cli.output).context("unable to render Deployment")?;
    output::write_output(outfile, &rendered)?;

    if outfile != Path::new(STDIO_PATH) {
        info!(outfile = %outfile.display(), "Wrote Deployment");
    }
    Ok(())
}

/// Convert a DeploymentConfig from the cluster, then print or apply it
pub async fn convert_live(
    cli: &Cli,
    name: &str,
    namespace: Option<&str>,
    kubeconfig: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = source::client_for(kubeconfig).await?;
    let dc = source::fetch(client.clone(), name, namespace).await?;

    let deployment = convert(cli, &dc)?;

    if dry_run {
        let rendered =
            output::render(&deployment, cli.output).context("unable to render Deployment")?;
        output::write_output(Path::new(STDIO_PATH), &output::frame_dry_run(&rendered))?;
        return Ok(());
    }

    apply(client, &deployment).await
}

/// Analyze, report, and convert a DeploymentConfig
///
/// Fails when findings exist and `--ignore-warnings` was not given.
pub fn convert(cli: &Cli, dc: &DeploymentConfig) -> anyhow::Result<Deployment> {
    let findings = analyze(dc);

    // Keep quiet about findings while stdout carries the Deployment, unless asked
    let quiet = cli.writes_to_stdout() && cli.verbosity() < 2;
    report_findings(&findings, quiet);
    check_findings(findings, cli.ignore_warnings)?;

    to_deployment(dc).context("unable to convert to Deployment")
}

fn report_findings(findings: &[Finding], quiet: bool) {
    for finding in findings {
        if quiet {
            debug!(
                finding = finding.name,
                path = finding.path,
                "Conversion warning: {}",
                finding.description
            );
        } else {
            warn!(
                finding = finding.name,
                path = finding.path,
                "Conversion warning: {}",
                finding.description
            );
        }
    }
}

/// Turn findings into an error unless they are ignored
pub fn check_findings(findings: Vec<Finding>, ignore_warnings: bool) -> Result<(), CommandError> {
    if findings.is_empty() {
        return Ok(());
    }

    if ignore_warnings {
        info!(count = findings.len(), "Ignoring conversion warnings");
        return Ok(());
    }

    Err(CommandError::UnresolvedFindings(findings))
}

/// Server-side apply the Deployment in its namespace
async fn apply(client: Client, deployment: &Deployment) -> anyhow::Result<()> {
    let name = deployment
        .metadata
        .name
        .as_deref()
        .ok_or(CommandError::MissingName)?;
    let namespace = deployment
        .metadata
        .namespace
        .as_deref()
        .unwrap_or(DEFAULT_NAMESPACE);

    let api: Api<Deployment> = Api::namespaced(client, namespace);
    api.patch(
        name,
        &PatchParams::apply(FIELD_MANAGER),
        &Patch::Apply(deployment),
    )
    .await
    .with_context(|| format!("unable to apply Deployment {}/{}", namespace, name))?;

    info!(name, namespace, "Applied Deployment");
    Ok(())
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
