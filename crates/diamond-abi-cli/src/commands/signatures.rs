use crate::cli::InputArgs;
use crate::support::{build_or_exit, module_source, render_json_or_exit, resolve_config_or_exit};
use diamond_abi_kernel::human_readable;
use serde_json::{Value, json};

pub fn run(input: InputArgs, json_output: bool) {
    let config = resolve_config_or_exit(&input);
    let build = build_or_exit(&config, &module_source(&input));

    if json_output {
        let rows: Vec<Value> = build
            .merged
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "owner": entry.owner,
                    "kind": entry.fragment.kind_str(),
                    "key": entry.fragment.signature_key().map(|k| k.to_string()),
                    "humanReadable": human_readable(&entry.fragment),
                })
            })
            .collect();
        let payload = json!({
            "name": build.name,
            "digest": build.merged.digest(),
            "signatures": rows,
        });
        println!("{}", render_json_or_exit(&payload, "signatures"));
        return;
    }

    for fragment in build.merged.fragments() {
        println!("{}", human_readable(fragment));
    }
}
