//! Module selection and the fallback owner pattern.
//!
//! All patterns are regexes searched (not anchored) against a module's
//! fully qualified name.

use crate::error::ArtifactError;
use diamond_abi_kernel::ModuleDescriptor;
use regex::Regex;
use tracing::debug;

fn compile(pattern: &str) -> Result<Regex, ArtifactError> {
    Regex::new(pattern).map_err(|source| ArtifactError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ArtifactError> {
    patterns.iter().map(|p| compile(p)).collect()
}

/// Include/exclude filter over fully qualified names.
#[derive(Debug, Clone, Default)]
pub struct ModuleSelector {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl ModuleSelector {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ArtifactError> {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    pub fn selects(&self, fully_qualified_name: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|re| re.is_match(fully_qualified_name));
        included && !self.exclude.iter().any(|re| re.is_match(fully_qualified_name))
    }

    /// Split `modules` into (selected, skipped names), keeping order.
    pub fn partition(&self, modules: Vec<ModuleDescriptor>) -> (Vec<ModuleDescriptor>, Vec<String>) {
        let mut selected = Vec::with_capacity(modules.len());
        let mut skipped = Vec::new();
        for module in modules {
            if self.selects(&module.fully_qualified_name) {
                selected.push(module);
            } else {
                debug!(module = %module.fully_qualified_name, "module not selected");
                skipped.push(module.fully_qualified_name);
            }
        }
        (selected, skipped)
    }
}

/// Which module may contribute the diamond's `fallback`.
///
/// Without a pattern no module qualifies.
#[derive(Debug, Clone, Default)]
pub struct FallbackOwner {
    pattern: Option<Regex>,
}

impl FallbackOwner {
    pub fn new(pattern: Option<&str>) -> Result<Self, ArtifactError> {
        Ok(Self {
            pattern: pattern.map(compile).transpose()?,
        })
    }

    pub fn allows(&self, fully_qualified_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(fully_qualified_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDE;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selector_selects_everything() {
        let selector = ModuleSelector::default();
        assert!(selector.selects("contracts/A.sol:A"));
    }

    #[test]
    fn include_and_exclude() {
        let selector = ModuleSelector::new(
            &strings(&["^contracts/"]),
            &strings(&["hardhat-diamond-abi/.*", "Mock"]),
        )
        .expect("patterns should compile");

        assert!(selector.selects("contracts/facets/A.sol:AFacet"));
        assert!(!selector.selects("lib/B.sol:B"));
        assert!(!selector.selects("contracts/test/MockToken.sol:MockToken"));
        assert!(!selector.selects("contracts/hardhat-diamond-abi/X.sol:X"));
    }

    #[test]
    fn default_exclude_skips_generated_diamond() {
        let selector =
            ModuleSelector::new(&[], &strings(&[DEFAULT_EXCLUDE])).expect("default compiles");
        assert!(!selector.selects(".diamond:Diamond"));
        assert!(selector.selects("contracts/Diamond.sol:Diamond"));
    }

    #[test]
    fn partition_keeps_order() {
        let selector = ModuleSelector::new(&[], &strings(&["B"])).expect("compiles");
        let modules = vec![
            ModuleDescriptor::new("A.sol:A", Vec::new()),
            ModuleDescriptor::new("B.sol:B", Vec::new()),
            ModuleDescriptor::new("C.sol:C", Vec::new()),
        ];
        let (selected, skipped) = selector.partition(modules);
        let names: Vec<&str> = selected
            .iter()
            .map(|m| m.fully_qualified_name.as_str())
            .collect();
        assert_eq!(names, vec!["A.sol:A", "C.sol:C"]);
        assert_eq!(skipped, vec!["B.sol:B"]);
    }

    #[test]
    fn fallback_owner_matches_unanchored() {
        let owner = FallbackOwner::new(Some(r"Halo2Diamond\.sol")).expect("compiles");
        assert!(owner.allows("contracts/Halo2Diamond.sol:HALO2Diamond"));
        assert!(!owner.allows("contracts/Halo2DiamondXsol:Other"));

        assert!(!FallbackOwner::default().allows("contracts/Halo2Diamond.sol:HALO2Diamond"));
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = FallbackOwner::new(Some("(")).expect_err("unbalanced paren");
        assert!(matches!(err, ArtifactError::InvalidPattern { .. }));
    }
}
