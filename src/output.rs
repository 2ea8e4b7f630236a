//! Rendering and writing the converted Deployment

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use k8s_openapi::api::apps::v1::Deployment;
use thiserror::Error;

/// Path meaning stdin (input) or stdout (output)
pub const STDIO_PATH: &str = "-";

const DRY_RUN_SEPARATOR: &str = "-----------";

/// Output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// JSON
    Json,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unable to encode Deployment as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unable to encode Deployment as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Encode a Deployment in the requested format
pub fn render(deployment: &Deployment, format: OutputFormat) -> Result<Vec<u8>, OutputError> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(deployment)?.into_bytes()),
        OutputFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(deployment)?;
            bytes.push(b'\n');
            Ok(bytes)
        }
    }
}

/// Wrap rendered output the way dry-run prints it
pub fn frame_dry_run(rendered: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(rendered.len() + 2 * DRY_RUN_SEPARATOR.len() + 4);
    framed.extend_from_slice(DRY_RUN_SEPARATOR.as_bytes());
    framed.extend_from_slice(b"\n\n");
    framed.extend_from_slice(rendered);
    if !rendered.ends_with(b"\n") {
        framed.push(b'\n');
    }
    framed.extend_from_slice(DRY_RUN_SEPARATOR.as_bytes());
    framed.push(b'\n');
    framed
}

/// Write bytes to `path`, or to stdout when `path` is `-`
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let result = if path == Path::new(STDIO_PATH) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).and_then(|_| stdout.flush())
    } else {
        std::fs::write(path, bytes)
    };

    result.map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
