//! `diamond-abi.toml` configuration.
//!
//! Every key is optional. A missing file is not the same as an empty one:
//! callers decide whether to fall back to [`DiamondAbiConfig::default`].

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "diamond-abi.toml";
pub const DEFAULT_DIAMOND_NAME: &str = "Diamond";
pub const DEFAULT_SPACING: usize = 2;

/// Generated diamond artifacts live under this source name; excluding it by
/// default keeps a rebuild from merging its own previous output.
pub const DEFAULT_EXCLUDE: &str = r"^\.diamond:";

/// Starter config written by `diamond-abi init`.
pub const CONFIG_TEMPLATE: &str = r#"# diamond-abi configuration

# contractName of the generated diamond artifact
name = "Diamond"

# Fail on duplicate function/event signatures instead of dropping them
strict = false

# Regexes searched against `<source path>:<contract name>`.
# When include is non-empty a module must match at least one entry.
include = []
exclude = ["^\\.diamond:"]

# The only module allowed to contribute a `fallback` entry point.
# Leave unset to drop every fallback.
# fallback_owner = "Diamond\\.sol:"

[export]
# artifact = "artifacts/.diamond/Diamond.json"
# abi = "abi/Diamond.json"
# signatures = "abi/Diamond.txt"
spacing = 2
"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiamondAbiConfig {
    pub name: String,
    pub strict: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub fallback_owner: Option<String>,
    pub export: ExportConfig,
}

impl Default for DiamondAbiConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DIAMOND_NAME.to_string(),
            strict: false,
            include: Vec::new(),
            exclude: vec![DEFAULT_EXCLUDE.to_string()],
            fallback_owner: None,
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub artifact: Option<PathBuf>,
    pub abi: Option<PathBuf>,
    pub signatures: Option<PathBuf>,
    /// Indent width of the flat ABI file; 0 writes compact JSON.
    pub spacing: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            artifact: None,
            abi: None,
            signatures: None,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl ExportConfig {
    pub fn is_empty(&self) -> bool {
        self.artifact.is_none() && self.abi.is_none() && self.signatures.is_none()
    }
}

impl DiamondAbiConfig {
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ArtifactError> {
        toml::from_str(text).map_err(|source| ArtifactError::ParseToml {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
