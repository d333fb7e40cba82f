use crate::cli::{InputArgs, OutputArgs};
use crate::support::{
    DROP_SAMPLE_LIMIT, apply_output_overrides, build_or_exit, module_source, print_sample_block,
    render_json_or_exit, resolve_config_or_exit, sample_with_truncation,
};
use diamond_abi_kernel::{DropReason, DroppedFragment};
use serde_json::json;

pub fn run(input: InputArgs, output: OutputArgs, json_output: bool) {
    let mut config = resolve_config_or_exit(&input);
    apply_output_overrides(&mut config, &output);
    let source = module_source(&input);
    let build = build_or_exit(&config, &source);

    let written = build.export(&config.export).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let written: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    let summary = build.merged.summary();
    let digest = build.merged.digest();

    if json_output {
        let payload = json!({
            "name": build.name,
            "source": source.path().display().to_string(),
            "strict": config.strict,
            "fallbackOwner": config.fallback_owner,
            "modules": build.modules,
            "skipped": build.skipped,
            "summary": summary,
            "digest": digest,
            "written": written,
            "dropped": build.merged.dropped(),
            "abi": build.merged.abi(),
        });
        println!("{}", render_json_or_exit(&payload, "merge"));
        return;
    }

    println!("diamond-abi merge");
    println!();
    println!("  Name: {}", build.name);
    println!("  Source: {}", source.path().display());
    println!("  Modules: {} (skipped {})", summary.modules, build.skipped.len());
    println!("  Fragments kept: {}", summary.kept);
    println!("  Duplicates dropped: {}", summary.duplicates_dropped);
    println!("  Fallbacks dropped: {}", summary.fallbacks_dropped);
    println!(
        "  Fallback owner: {}",
        config.fallback_owner.as_deref().unwrap_or("(none)")
    );
    println!("  Digest: {digest}");

    let drops: Vec<String> = build.merged.dropped().iter().map(describe_drop).collect();
    let (drops, truncated) = sample_with_truncation(drops, DROP_SAMPLE_LIMIT);
    print_sample_block("Dropped", &drops, truncated);

    if config.export.is_empty() {
        println!("  Outputs: none configured");
    }
    for path in &written {
        println!("  Wrote: {path}");
    }
}

fn describe_drop(drop: &DroppedFragment) -> String {
    match &drop.reason {
        DropReason::Duplicate { key, first_owner } => {
            format!("{key} in {} (first declared by {first_owner})", drop.module)
        }
        DropReason::FallbackNotAllowed => {
            format!("fallback in {} (not the fallback owner)", drop.module)
        }
    }
}
