//! Loading module descriptors from compiler output.
//!
//! Two inputs are supported:
//! - a Hardhat-style artifacts directory (`<source>/<Contract>.json` files
//!   carrying `sourceName`, `contractName`, `abi`)
//! - a manifest: one JSON array of `{ fullyQualifiedName, abi }`
//!
//! Modules from a directory come back sorted by fully qualified name, so
//! module order is stable across runs and platforms. Manifest order is taken
//! as given.

use crate::error::ArtifactError;
use diamond_abi_kernel::ModuleDescriptor;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    fully_qualified_name: String,
    abi: Value,
}

fn read_json(path: &Path) -> Result<Value, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::ParseJson {
        path: path.display().to_string(),
        source,
    })
}

fn is_build_info(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == BUILD_INFO_DIR
}

fn is_artifact_file(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_file() && name.ends_with(".json") && !name.ends_with(DEBUG_SUFFIX)
}

/// Read one compiled artifact.
///
/// Returns `Ok(None)` for JSON files that carry no `abi` (not an artifact).
pub fn read_artifact(path: &Path) -> Result<Option<ModuleDescriptor>, ArtifactError> {
    let value = read_json(path)?;
    let Some(abi) = value.get("abi") else {
        return Ok(None);
    };

    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ArtifactError::InvalidArtifact {
                path: path.display().to_string(),
                reason: format!("missing string `{key}`"),
            })
    };
    let source_name = field("sourceName")?;
    let contract_name = field("contractName")?;

    let module = ModuleDescriptor::from_abi(format!("{source_name}:{contract_name}"), abi)?;
    Ok(Some(module))
}

/// Load every artifact under `root`, sorted by fully qualified name.
pub fn load_artifacts_dir(root: impl AsRef<Path>) -> Result<Vec<ModuleDescriptor>, ArtifactError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ArtifactError::InvalidArtifact {
            path: root.display().to_string(),
            reason: "artifacts path is not a directory".to_string(),
        });
    }

    let mut modules = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_build_info(entry));

    for entry in walker {
        let entry = entry.map_err(|source| ArtifactError::Walk {
            path: root.display().to_string(),
            source,
        })?;
        if !is_artifact_file(&entry) {
            continue;
        }
        match read_artifact(entry.path())? {
            Some(module) => {
                debug!(
                    module = %module.fully_qualified_name,
                    fragments = module.fragments.len(),
                    "loaded artifact"
                );
                modules.push(module);
            }
            None => debug!(path = %entry.path().display(), "skipping non-artifact json"),
        }
    }

    // Walk order is per path component; merge order follows whole names,
    // so `facets-v2/` comes before `facets/`.
    modules.sort_by(|a, b| a.fully_qualified_name.cmp(&b.fully_qualified_name));
    Ok(modules)
}

/// Load a manifest file: a JSON array of `{ fullyQualifiedName, abi }`.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<ModuleDescriptor>, ArtifactError> {
    let path = path.as_ref();
    let value = read_json(path)?;
    let entries: Vec<ManifestEntry> =
        serde_json::from_value(value).map_err(|source| ArtifactError::ParseJson {
            path: path.display().to_string(),
            source,
        })?;

    entries
        .into_iter()
        .map(|entry| {
            ModuleDescriptor::from_abi(entry.fully_qualified_name, &entry.abi)
                .map_err(ArtifactError::from)
        })
        .collect()
}
