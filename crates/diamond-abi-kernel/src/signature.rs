//! Canonical signature keys.
//!
//! Two fragments expose "the same" entry point exactly when their kind,
//! name and ordered parameter type tags agree. Parameter names, outputs,
//! mutability and the owning module play no part.

use crate::fragment::{FragmentKind, Param};
use serde::{Serialize, Serializer};
use std::fmt;

/// Identity of a fragment for deduplication.
///
/// Kept as a structured tuple so equality is exact even when a type tag
/// contains `,` or `)` (function-typed parameters do). [`fmt::Display`]
/// renders the familiar `function foo(uint256,address)` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureKey {
    kind: FragmentKind,
    name: String,
    params: Vec<String>,
}

impl SignatureKey {
    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.kind, self.name, self.params.join(","))
    }
}

impl Serialize for SignatureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derive the canonical key for a fragment.
///
/// An absent name (constructor, fallback, receive) is treated as empty.
pub fn canonical_key(kind: FragmentKind, name: Option<&str>, params: &[Param]) -> SignatureKey {
    SignatureKey {
        kind,
        name: name.unwrap_or_default().to_string(),
        params: params.iter().map(|p| p.type_tag().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, internal: &str) -> Param {
        Param {
            name: Some(name.to_string()),
            abi_type: None,
            internal_type: Some(internal.to_string()),
            indexed: false,
            components: Vec::new(),
        }
    }

    #[test]
    fn key_is_deterministic() {
        let params = vec![param("a", "uint256"), param("b", "address")];
        let k1 = canonical_key(FragmentKind::Function, Some("foo"), &params);
        let k2 = canonical_key(FragmentKind::Function, Some("foo"), &params);
        assert_eq!(k1, k2);
        assert_eq!(k1.to_string(), k2.to_string());
        assert_eq!(k1.to_string(), "function foo(uint256,address)");
    }

    #[test]
    fn function_and_event_do_not_collide() {
        let params = vec![param("who", "address")];
        let f = canonical_key(FragmentKind::Function, Some("Bar"), &params);
        let e = canonical_key(FragmentKind::Event, Some("Bar"), &params);
        assert_ne!(f, e);
        assert_eq!(e.to_string(), "event Bar(address)");
    }

    #[test]
    fn parameter_order_matters() {
        let ab = canonical_key(
            FragmentKind::Function,
            Some("foo"),
            &[param("a", "uint256"), param("b", "address")],
        );
        let ba = canonical_key(
            FragmentKind::Function,
            Some("foo"),
            &[param("a", "address"), param("b", "uint256")],
        );
        assert_ne!(ab, ba);
    }

    #[test]
    fn parameter_names_do_not_matter() {
        let a = canonical_key(FragmentKind::Function, Some("foo"), &[param("amount", "uint256")]);
        let b = canonical_key(FragmentKind::Function, Some("foo"), &[param("value", "uint256")]);
        assert_eq!(a, b);
    }

    #[test]
    fn internal_type_distinguishes_user_types() {
        let a = canonical_key(FragmentKind::Function, Some("set"), &[param("s", "enum A.Side")]);
        let b = canonical_key(FragmentKind::Function, Some("set"), &[param("s", "enum B.Side")]);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_arity_is_distinct_and_well_formed() {
        let empty = canonical_key(FragmentKind::Function, Some("baz"), &[]);
        let one = canonical_key(FragmentKind::Function, Some("baz"), &[param("x", "uint256")]);
        assert_eq!(empty.to_string(), "function baz()");
        assert_ne!(empty, one);
    }

    #[test]
    fn structured_key_survives_delimiters_in_types() {
        // `f(uint256,uint256)` as one function-typed param vs two params
        // render identically but must not be equal.
        let one = canonical_key(
            FragmentKind::Function,
            Some("f"),
            &[param("cb", "function (uint256,uint256) external")],
        );
        let two = canonical_key(
            FragmentKind::Function,
            Some("f"),
            &[
                param("a", "function (uint256"),
                param("b", "uint256) external"),
            ],
        );
        assert_ne!(one, two);
    }

    #[test]
    fn unnamed_kinds_render_with_empty_name() {
        let key = canonical_key(FragmentKind::Constructor, None, &[param("o", "address")]);
        assert_eq!(key.to_string(), "constructor (address)");
    }
}
