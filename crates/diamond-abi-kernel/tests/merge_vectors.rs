//! Integration tests: run the merge fixtures.
//!
//! Each fixture in tests/fixtures/ has:
//! - case.json: the ordered modules and the fallback owner marker
//! - expect.json: the surviving fragments (owner + signature) and the drops
//!
//! The fallback owner marker is matched as a plain substring of the fully
//! qualified name.

use diamond_abi_kernel::{ModuleDescriptor, aggregate, human_readable};
use serde_json::{Value, json};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_json(path: &PathBuf) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

fn load_modules(case: &Value) -> Vec<ModuleDescriptor> {
    case["modules"]
        .as_array()
        .expect("missing modules array")
        .iter()
        .map(|m| {
            let name = m["fullyQualifiedName"].as_str().expect("missing module name");
            ModuleDescriptor::from_abi(name, &m["abi"]).expect("fixture abi should parse")
        })
        .collect()
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);
    let case = read_json(&dir.join("case.json"));
    let expected = read_json(&dir.join("expect.json"));

    let marker = case["fallbackOwner"].as_str().expect("missing fallbackOwner").to_string();
    let modules = load_modules(&case);
    let merged = aggregate(&modules, |fqn| fqn.contains(&marker));

    let merged_rows: Vec<Value> = merged
        .entries()
        .iter()
        .map(|entry| {
            let signature = entry
                .fragment
                .signature_key()
                .map_or_else(|| entry.fragment.kind_str().to_string(), |k| k.to_string());
            json!({
                "owner": entry.owner,
                "kind": entry.fragment.kind_str(),
                "signature": signature,
            })
        })
        .collect();
    let actual = json!({
        "merged": merged_rows,
        "dropped": serde_json::to_value(merged.dropped()).expect("drops should serialize"),
    });

    assert_eq!(
        actual,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn end_to_end_first_occurrence() {
    run_fixture("end_to_end_first_occurrence");
}

#[test]
fn fallback_no_owner_declares() {
    run_fixture("fallback_no_owner_declares");
}

#[test]
fn fallback_owner_declares() {
    run_fixture("fallback_owner_declares");
}

#[test]
fn singular_kinds_pass_through() {
    run_fixture("singular_kinds_pass_through");
}

#[test]
fn surviving_fragments_keep_every_field() {
    let case = read_json(&fixtures_dir().join("end_to_end_first_occurrence/case.json"));
    let modules = load_modules(&case);
    let merged = aggregate(&modules, |_| false);

    let abi = merged.abi();
    assert_eq!(abi[0], case["modules"][0]["abi"][0]);
    assert_eq!(abi[1], case["modules"][0]["abi"][1]);
    assert_eq!(abi[2], case["modules"][1]["abi"][1]);
}

#[test]
fn merged_interface_renders_human_readable() {
    let case = read_json(&fixtures_dir().join("end_to_end_first_occurrence/case.json"));
    let modules = load_modules(&case);
    let merged = aggregate(&modules, |_| false);

    let rendered = merged
        .fragments()
        .map(human_readable)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    function foo(uint256 amount)
    event Bar(address indexed who)
    function baz()
    ");
}
