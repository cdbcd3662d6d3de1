//! Where declared license strings come from: arguments, files, package
//! descriptors and stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use license_sniff::license::normalize::{as_text, LicenseError};
use license_sniff::models::InputSource;

use crate::cli::Cli;

/// A declared license value together with its origin.
#[derive(Debug)]
pub struct Declaration {
    pub source: InputSource,
    pub value: Option<String>,
}

/// Gather every declaration requested on the command line, in order.
pub fn collect(cli: &Cli) -> Result<Vec<Declaration>> {
    if cli.wants_stdin() {
        return Ok(vec![read_stdin()?]);
    }

    let mut declarations: Vec<Declaration> = cli
        .texts
        .iter()
        .map(|text| Declaration {
            source: InputSource::Argument,
            value: Some(text.clone()),
        })
        .collect();

    for path in &cli.files {
        declarations.push(read_file(path)?);
    }

    for path in &cli.packages {
        declarations.extend(read_package(path)?);
    }

    Ok(declarations)
}

fn read_stdin() -> Result<Declaration> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;
    Ok(Declaration {
        source: InputSource::Stdin,
        value: Some(content),
    })
}

/// The whole file is one declaration.
pub fn read_file(path: &Path) -> Result<Declaration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!("read {} bytes from {}", content.len(), path.display());
    Ok(Declaration {
        source: InputSource::File(path.to_path_buf()),
        value: Some(content),
    })
}

/// Read the declared license(s) of a `package.json`-style descriptor.
pub fn read_package(path: &Path) -> Result<Vec<Declaration>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let values = declared_licenses(&json)
        .with_context(|| format!("unusable license field in {}", path.display()))?;

    Ok(values
        .into_iter()
        .map(|value| Declaration {
            source: InputSource::Package(path.to_path_buf()),
            value,
        })
        .collect())
}

/// `license` as a string or `{ "type": ... }`, else the legacy `licenses`
/// array. A descriptor declaring neither yields a single undefined value.
fn declared_licenses(json: &Value) -> Result<Vec<Option<String>>, LicenseError> {
    if let Some(license) = json.get("license") {
        return Ok(vec![declared_entry(license)?]);
    }

    match json.get("licenses") {
        Some(Value::Array(entries)) => entries.iter().map(declared_entry).collect(),
        Some(other) => Ok(vec![declared_entry(other)?]),
        None => {
            tracing::warn!("descriptor declares no license");
            Ok(vec![None])
        }
    }
}

fn declared_entry(value: &Value) -> Result<Option<String>, LicenseError> {
    if let Some(kind) = value.get("type").and_then(Value::as_str) {
        return Ok(Some(kind.to_string()));
    }
    Ok(as_text(value)?.map(str::to_string))
}
