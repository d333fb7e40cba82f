//! Human-readable rendering of fragments.
//!
//! Produces the one-line signature form used by human-readable ABIs:
//! `function balanceOf(address owner) view returns (uint256)`.

use crate::fragment::{Fragment, Param};
use serde_json::Value;

pub fn human_readable(fragment: &Fragment) -> String {
    let params = format_params(fragment.inputs(), true);
    let mutability = fragment.str_field("stateMutability");

    match fragment {
        Fragment::Function(f) => {
            let mut out = format!("function {}({params})", f.name);
            if let Some(m) = mutability.filter(|m| *m != "nonpayable") {
                out.push(' ');
                out.push_str(m);
            }
            let outputs = outputs(fragment);
            if !outputs.is_empty() {
                out.push_str(&format!(" returns ({})", format_params(&outputs, false)));
            }
            out
        }
        Fragment::Event(f) => {
            let mut out = format!("event {}({params})", f.name);
            if fragment.raw().get("anonymous").and_then(Value::as_bool) == Some(true) {
                out.push_str(" anonymous");
            }
            out
        }
        Fragment::Error(f) => format!("error {}({params})", f.name),
        Fragment::Constructor(_) => with_payable(format!("constructor({params})"), mutability),
        Fragment::Fallback(_) => with_payable(format!("fallback({params})"), mutability),
        Fragment::Receive(_) => "receive() payable".to_string(),
        Fragment::Other { kind, .. } => kind.clone(),
    }
}

fn with_payable(mut out: String, mutability: Option<&str>) -> String {
    if mutability == Some("payable") {
        out.push_str(" payable");
    }
    out
}

// Outputs are pass-through data; unreadable entries are skipped.
fn outputs(fragment: &Fragment) -> Vec<Param> {
    fragment
        .raw()
        .get("outputs")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| Param::from_value(v).ok()).collect())
        .unwrap_or_default()
}

fn format_params(params: &[Param], show_indexed: bool) -> String {
    params
        .iter()
        .map(|p| format_param(p, show_indexed))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_param(param: &Param, show_indexed: bool) -> String {
    let ty = param.display_type();
    let mut out = match ty.strip_prefix("tuple") {
        Some(suffix) if !param.components.is_empty() => {
            format!("tuple({}){suffix}", format_params(&param.components, false))
        }
        _ => ty.to_string(),
    };
    if show_indexed && param.indexed {
        out.push_str(" indexed");
    }
    if let Some(name) = &param.name {
        out.push(' ');
        out.push_str(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        human_readable(&Fragment::from_value(&value).expect("fragment should parse"))
    }

    #[test]
    fn renders_view_function_with_returns() {
        let text = render(json!({
            "type": "function",
            "name": "balanceOf",
            "inputs": [{"name": "owner", "type": "address", "internalType": "address"}],
            "outputs": [{"name": "", "type": "uint256", "internalType": "uint256"}],
            "stateMutability": "view"
        }));
        assert_eq!(text, "function balanceOf(address owner) view returns (uint256)");
    }

    #[test]
    fn omits_nonpayable() {
        let text = render(json!({
            "type": "function", "name": "poke", "inputs": [], "outputs": [],
            "stateMutability": "nonpayable"
        }));
        assert_eq!(text, "function poke()");
    }

    #[test]
    fn renders_indexed_event_params() {
        let text = render(json!({
            "type": "event",
            "name": "Transfer",
            "anonymous": false,
            "inputs": [
                {"indexed": true, "name": "from", "type": "address", "internalType": "address"},
                {"indexed": true, "name": "to", "type": "address", "internalType": "address"},
                {"indexed": false, "name": "value", "type": "uint256", "internalType": "uint256"}
            ]
        }));
        assert_eq!(
            text,
            "event Transfer(address indexed from, address indexed to, uint256 value)"
        );
    }

    #[test]
    fn expands_tuple_components() {
        let text = render(json!({
            "type": "function",
            "name": "diamondCut",
            "inputs": [{
                "name": "cuts",
                "type": "tuple[]",
                "internalType": "struct IDiamondCut.FacetCut[]",
                "components": [
                    {"name": "facetAddress", "type": "address", "internalType": "address"},
                    {"name": "functionSelectors", "type": "bytes4[]", "internalType": "bytes4[]"}
                ]
            }],
            "outputs": [],
            "stateMutability": "nonpayable"
        }));
        assert_eq!(
            text,
            "function diamondCut(tuple(address facetAddress, bytes4[] functionSelectors)[] cuts)"
        );
    }

    #[test]
    fn renders_unnamed_kinds() {
        assert_eq!(
            render(json!({"type": "fallback", "stateMutability": "payable"})),
            "fallback() payable"
        );
        assert_eq!(
            render(json!({"type": "receive", "stateMutability": "payable"})),
            "receive() payable"
        );
        assert_eq!(
            render(json!({
                "type": "constructor",
                "inputs": [{"name": "owner", "type": "address", "internalType": "address"}],
                "stateMutability": "nonpayable"
            })),
            "constructor(address owner)"
        );
        assert_eq!(
            render(json!({"type": "error", "name": "NotOwner", "inputs": []})),
            "error NotOwner()"
        );
    }
}
