//! Module descriptors: one compiled module's interface.

use crate::error::KernelError;
use crate::fragment::Fragment;
use serde::Serialize;
use serde_json::Value;

/// A compiled module and its ordered ABI fragments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// `<source path>:<module name>`, e.g. `contracts/facets/OwnershipFacet.sol:OwnershipFacet`.
    pub fully_qualified_name: String,
    pub fragments: Vec<Fragment>,
}

impl ModuleDescriptor {
    pub fn new(fully_qualified_name: impl Into<String>, fragments: Vec<Fragment>) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
            fragments,
        }
    }

    /// Build a descriptor from a JSON ABI array.
    ///
    /// Any malformed element rejects the whole module.
    pub fn from_abi(fully_qualified_name: impl Into<String>, abi: &Value) -> Result<Self, KernelError> {
        let fully_qualified_name = fully_qualified_name.into();
        let Some(items) = abi.as_array() else {
            return Err(KernelError::InvalidAbi {
                module: fully_qualified_name,
                reason: "abi is not a JSON array".to_string(),
            });
        };

        let mut fragments = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let fragment = Fragment::from_value(item).map_err(|source| {
                KernelError::InvalidFragment {
                    module: fully_qualified_name.clone(),
                    index,
                    source,
                }
            })?;
            fragments.push(fragment);
        }

        Ok(Self {
            fully_qualified_name,
            fragments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FragmentError;
    use serde_json::json;

    #[test]
    fn from_abi_preserves_declaration_order() {
        let module = ModuleDescriptor::from_abi(
            "A.sol:A",
            &json!([
                {"type": "function", "name": "b", "inputs": []},
                {"type": "event", "name": "A", "inputs": []},
                {"type": "constructor", "inputs": []}
            ]),
        )
        .expect("abi should parse");
        let kinds: Vec<&str> = module.fragments.iter().map(Fragment::kind_str).collect();
        assert_eq!(kinds, vec!["function", "event", "constructor"]);
    }

    #[test]
    fn from_abi_reports_module_and_index() {
        let err = ModuleDescriptor::from_abi(
            "A.sol:A",
            &json!([
                {"type": "function", "name": "ok", "inputs": []},
                {"type": "function", "inputs": []}
            ]),
        )
        .expect_err("second element is malformed");
        assert_eq!(
            err,
            KernelError::InvalidFragment {
                module: "A.sol:A".into(),
                index: 1,
                source: FragmentError::MissingName {
                    kind: "function".into()
                },
            }
        );
    }

    #[test]
    fn from_abi_rejects_non_array() {
        let err = ModuleDescriptor::from_abi("A.sol:A", &json!({"abi": []}))
            .expect_err("object is not an abi");
        assert!(matches!(err, KernelError::InvalidAbi { .. }));
    }
}
