//! Export of a merged interface.

use crate::error::ArtifactError;
use diamond_abi_kernel::{MergedInterface, human_readable};
use serde::Serialize;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

pub const ARTIFACT_FORMAT: &str = "hh-sol-artifact-1";
pub const DIAMOND_SOURCE_NAME: &str = ".diamond";

/// A bytecode-less compiled artifact carrying the merged ABI, so downstream
/// tooling (typings generators, verifiers) can treat the diamond like any
/// other contract.
pub fn diamond_artifact(name: &str, merged: &MergedInterface) -> Value {
    json!({
        "_format": ARTIFACT_FORMAT,
        "contractName": name,
        "sourceName": DIAMOND_SOURCE_NAME,
        "abi": merged.abi(),
        "bytecode": "0x",
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {},
    })
}

/// Render JSON with `spacing` spaces of indent; 0 renders compact.
pub fn render_json(value: &Value, spacing: usize) -> Result<String, ArtifactError> {
    if spacing == 0 {
        return Ok(value.to_string());
    }
    let indent = vec![b' '; spacing];
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| ArtifactError::Render {
            what: "json",
            source,
        })?;
    String::from_utf8(out).map_err(|e| ArtifactError::Render {
        what: "json",
        source: serde::ser::Error::custom(e),
    })
}

/// One human-readable signature per line.
pub fn render_signatures(merged: &MergedInterface) -> String {
    let mut out = String::new();
    for fragment in merged.fragments() {
        out.push_str(&human_readable(fragment));
        out.push('\n');
    }
    out
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ArtifactError::WriteFile {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| ArtifactError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}
