//! # diamond-abi-artifacts
//!
//! Everything around the kernel that touches the file system:
//! - `DiamondAbiConfig` (TOML configuration)
//! - artifact directory and manifest loading
//! - include/exclude module selection and the fallback owner pattern
//! - export of the merged interface (diamond artifact, flat ABI, signatures)
//!
//! ## Pipeline
//!
//! ```text
//! artifacts dir / manifest
//!     │  load (sorted / as given)
//! Vec<ModuleDescriptor>
//!     │  ModuleSelector::partition
//! selected modules
//!     │  Aggregator::aggregate (+ FallbackOwner)
//! DiamondBuild
//!     │  export
//! artifact.json / abi.json / signatures.txt
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod select;

pub use config::{
    CONFIG_TEMPLATE, DEFAULT_CONFIG_PATH, DEFAULT_DIAMOND_NAME, DEFAULT_EXCLUDE, DiamondAbiConfig,
    ExportConfig,
};
pub use error::ArtifactError;
pub use export::{
    ARTIFACT_FORMAT, DIAMOND_SOURCE_NAME, diamond_artifact, render_json, render_signatures,
    write_output,
};
pub use loader::{load_artifacts_dir, load_manifest, read_artifact};
pub use select::{FallbackOwner, ModuleSelector};

use diamond_abi_kernel::{Aggregator, MergedInterface, ModuleDescriptor};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where module descriptors come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    ArtifactsDir(PathBuf),
    Manifest(PathBuf),
}

impl ModuleSource {
    pub fn load(&self) -> Result<Vec<ModuleDescriptor>, ArtifactError> {
        match self {
            Self::ArtifactsDir(path) => load_artifacts_dir(path),
            Self::Manifest(path) => load_manifest(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::ArtifactsDir(path) | Self::Manifest(path) => path,
        }
    }
}

/// Result of one diamond build.
#[derive(Debug, Clone)]
pub struct DiamondBuild {
    pub name: String,
    /// Selected modules, in merge order.
    pub modules: Vec<String>,
    /// Modules filtered out by include/exclude.
    pub skipped: Vec<String>,
    pub merged: MergedInterface,
}

impl DiamondBuild {
    pub fn artifact(&self) -> Value {
        diamond_artifact(&self.name, &self.merged)
    }

    /// Write every output `export` names. Returns the written paths.
    pub fn export(&self, export: &ExportConfig) -> Result<Vec<PathBuf>, ArtifactError> {
        let mut written = Vec::new();
        if let Some(path) = &export.artifact {
            write_output(path, &render_json(&self.artifact(), export.spacing)?)?;
            written.push(path.clone());
        }
        if let Some(path) = &export.abi {
            write_output(path, &render_json(&self.merged.abi(), export.spacing)?)?;
            written.push(path.clone());
        }
        if let Some(path) = &export.signatures {
            write_output(path, &render_signatures(&self.merged))?;
            written.push(path.clone());
        }
        for path in &written {
            info!(path = %path.display(), "wrote diamond output");
        }
        Ok(written)
    }
}

/// Merge already-loaded modules under `config`.
pub fn build_from_modules(
    config: &DiamondAbiConfig,
    modules: Vec<ModuleDescriptor>,
) -> Result<DiamondBuild, ArtifactError> {
    let selector = ModuleSelector::new(&config.include, &config.exclude)?;
    let fallback_owner = FallbackOwner::new(config.fallback_owner.as_deref())?;

    let (selected, skipped) = selector.partition(modules);
    let merged = Aggregator::new()
        .strict(config.strict)
        .aggregate(&selected, |fqn| fallback_owner.allows(fqn))?;

    let summary = merged.summary();
    info!(
        name = %config.name,
        modules = summary.modules,
        kept = summary.kept,
        duplicates_dropped = summary.duplicates_dropped,
        fallbacks_dropped = summary.fallbacks_dropped,
        skipped = skipped.len(),
        "merged diamond abi"
    );

    Ok(DiamondBuild {
        name: config.name.clone(),
        modules: selected.into_iter().map(|m| m.fully_qualified_name).collect(),
        skipped,
        merged,
    })
}

/// Load from `source` and merge under `config`.
pub fn build_diamond(
    config: &DiamondAbiConfig,
    source: &ModuleSource,
) -> Result<DiamondBuild, ArtifactError> {
    build_from_modules(config, source.load()?)
}
