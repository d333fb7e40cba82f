use crate::cli::{InputArgs, OutputArgs};
use diamond_abi_artifacts::{
    DEFAULT_CONFIG_PATH, DiamondAbiConfig, DiamondBuild, ModuleSource, build_diamond,
};
use std::path::PathBuf;
use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DROP_SAMPLE_LIMIT: usize = 25;
const LOG_ENV: &str = "DIAMOND_ABI_LOG";
// Target prefix shared by every crate in the workspace and the binary.
const DEFAULT_LOG_FILTER: &str = "warn,diamond_abi=info";
const VERBOSE_LOG_FILTER: &str = "warn,diamond_abi=debug";

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber.
///
/// `DIAMOND_ABI_LOG` takes precedence over `--verbose`,
/// e.g. `DIAMOND_ABI_LOG=diamond_abi_kernel=debug`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .init();
    });
}

/// Resolve the effective config: file (explicit, or ./diamond-abi.toml when
/// present) overlaid with command-line flags.
pub fn resolve_config_or_exit(input: &InputArgs) -> DiamondAbiConfig {
    let loaded = match input.config.as_deref() {
        Some(path) => DiamondAbiConfig::load(path),
        None => DiamondAbiConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if let Some(name) = &input.name {
        config.name = name.clone();
    }
    if input.strict {
        config.strict = true;
    }
    if !input.include.is_empty() {
        config.include = input.include.clone();
    }
    config.exclude.extend(input.exclude.iter().cloned());
    if let Some(owner) = &input.fallback_owner {
        config.fallback_owner = Some(owner.clone());
    }
    debug!(?config, "resolved config");
    config
}

pub fn apply_output_overrides(config: &mut DiamondAbiConfig, output: &OutputArgs) {
    if let Some(path) = &output.out_artifact {
        config.export.artifact = Some(PathBuf::from(path));
    }
    if let Some(path) = &output.out_abi {
        config.export.abi = Some(PathBuf::from(path));
    }
    if let Some(path) = &output.out_signatures {
        config.export.signatures = Some(PathBuf::from(path));
    }
    if let Some(spacing) = output.spacing {
        config.export.spacing = spacing;
    }
}

pub fn module_source(input: &InputArgs) -> ModuleSource {
    match &input.manifest {
        Some(path) => ModuleSource::Manifest(PathBuf::from(path)),
        None => ModuleSource::ArtifactsDir(PathBuf::from(&input.artifacts)),
    }
}

pub fn build_or_exit(config: &DiamondAbiConfig, source: &ModuleSource) -> DiamondBuild {
    build_diamond(config, source).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn render_json_or_exit(payload: &serde_json::Value, label: &str) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} json: {err}");
        std::process::exit(2);
    })
}

pub fn sample_with_truncation<T>(items: Vec<T>, limit: usize) -> (Vec<T>, usize) {
    let total = items.len();
    let sample: Vec<T> = items.into_iter().take(limit).collect();
    let truncated = total.saturating_sub(sample.len());
    (sample, truncated)
}

pub fn print_sample_block(header: &str, items: &[String], truncated: usize) {
    if items.is_empty() {
        return;
    }

    println!("  {header} (showing up to {}):", items.len());
    for item in items {
        println!("    - {item}");
    }
    if truncated > 0 {
        println!("    - ... and {truncated} more");
    }
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
