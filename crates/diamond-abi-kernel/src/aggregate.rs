//! Facet ABI aggregation.
//!
//! One sequential pass over the flattened fragment stream, modules in the
//! order given and fragments in declaration order:
//!
//! 1. `function` / `event`: first occurrence of a signature key wins, later
//!    ones are dropped.
//! 2. `fallback`: kept only when the owning module is the allowed fallback
//!    owner.
//! 3. anything else: kept.
//!
//! The seen set lives inside a single call.

use crate::error::KernelError;
use crate::fragment::Fragment;
use crate::module::ModuleDescriptor;
use crate::signature::SignatureKey;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

/// A surviving fragment and the module it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEntry {
    pub owner: String,
    /// Position of the fragment inside its owner's ABI.
    pub index: usize,
    pub fragment: Fragment,
}

/// Why a fragment did not make it into the merged interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    /// The signature was already exposed by an earlier fragment.
    #[serde(rename_all = "camelCase")]
    Duplicate {
        key: SignatureKey,
        first_owner: String,
    },
    /// The module is not the allowed fallback owner.
    FallbackNotAllowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedFragment {
    pub module: String,
    pub index: usize,
    pub kind: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// Counts describing one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub modules: usize,
    pub visited: usize,
    pub kept: usize,
    pub duplicates_dropped: usize,
    pub fallbacks_dropped: usize,
}

/// The deduplicated union of all modules' fragments.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedInterface {
    entries: Vec<MergedEntry>,
    dropped: Vec<DroppedFragment>,
    modules: usize,
}

impl MergedInterface {
    pub fn entries(&self) -> &[MergedEntry] {
        &self.entries
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.entries.iter().map(|entry| &entry.fragment)
    }

    pub fn dropped(&self) -> &[DroppedFragment] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The merged JSON ABI array.
    pub fn abi(&self) -> Value {
        Value::Array(self.fragments().map(Fragment::to_value).collect())
    }

    /// Canonical keys of the keyed fragments, in output order.
    pub fn signatures(&self) -> Vec<SignatureKey> {
        self.fragments().filter_map(Fragment::signature_key).collect()
    }

    /// SHA-256 over the compact JSON ABI.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.abi().to_string().as_bytes());
        format!("{hash:x}")
    }

    pub fn summary(&self) -> MergeSummary {
        let mut summary = MergeSummary {
            modules: self.modules,
            visited: self.entries.len() + self.dropped.len(),
            kept: self.entries.len(),
            ..MergeSummary::default()
        };
        for drop in &self.dropped {
            match drop.reason {
                DropReason::Duplicate { .. } => summary.duplicates_dropped += 1,
                DropReason::FallbackNotAllowed => summary.fallbacks_dropped += 1,
            }
        }
        summary
    }
}

/// Merge `modules` into a single interface.
///
/// `allowed_fallback_owner` is asked about the fully qualified name of every
/// module that declares a `fallback`; only fallbacks from modules it accepts
/// survive. Duplicates are dropped, never reported as errors.
pub fn aggregate<F>(modules: &[ModuleDescriptor], allowed_fallback_owner: F) -> MergedInterface
where
    F: Fn(&str) -> bool,
{
    let mut seen: HashMap<SignatureKey, &str> = HashMap::new();
    let mut entries = Vec::new();
    let mut dropped = Vec::new();

    for module in modules {
        let owner = module.fully_qualified_name.as_str();
        for (index, fragment) in module.fragments.iter().enumerate() {
            let reason = match (fragment, fragment.signature_key()) {
                (Fragment::Function(_) | Fragment::Event(_), Some(key)) => {
                    match seen.get(&key) {
                        Some(first_owner) => Some(DropReason::Duplicate {
                            key,
                            first_owner: (*first_owner).to_string(),
                        }),
                        None => {
                            seen.insert(key, owner);
                            None
                        }
                    }
                }
                (Fragment::Fallback(_), _) if !allowed_fallback_owner(owner) => {
                    Some(DropReason::FallbackNotAllowed)
                }
                _ => None,
            };

            match reason {
                Some(reason) => {
                    debug!(
                        module = owner,
                        index,
                        kind = fragment.kind_str(),
                        ?reason,
                        "dropping fragment"
                    );
                    dropped.push(DroppedFragment {
                        module: owner.to_string(),
                        index,
                        kind: fragment.kind_str().to_string(),
                        reason,
                    });
                }
                None => entries.push(MergedEntry {
                    owner: owner.to_string(),
                    index,
                    fragment: fragment.clone(),
                }),
            }
        }
    }

    MergedInterface {
        entries,
        dropped,
        modules: modules.len(),
    }
}

/// Configurable front end over [`aggregate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    strict: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a duplicate `function`/`event` signature is an error
    /// instead of being dropped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn aggregate<F>(
        &self,
        modules: &[ModuleDescriptor],
        allowed_fallback_owner: F,
    ) -> Result<MergedInterface, KernelError>
    where
        F: Fn(&str) -> bool,
    {
        let merged = aggregate(modules, allowed_fallback_owner);
        if self.strict
            && let Some(duplicate) = merged.dropped.iter().find_map(|drop| match &drop.reason {
                DropReason::Duplicate { key, first_owner } => Some((key, first_owner, &drop.module)),
                DropReason::FallbackNotAllowed => None,
            })
        {
            let (key, first_owner, duplicate_owner) = duplicate;
            return Err(KernelError::DuplicateSignature {
                key: key.to_string(),
                first_owner: first_owner.clone(),
                duplicate_owner: duplicate_owner.clone(),
            });
        }
        Ok(merged)
    }
}
