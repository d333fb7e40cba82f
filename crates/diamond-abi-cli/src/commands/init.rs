use crate::support::{render_json_or_exit, yes_no};
use diamond_abi_artifacts::{CONFIG_TEMPLATE, DiamondAbiConfig};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub config_path: PathBuf,
    pub created_parent_dir: bool,
}

pub fn init_config(path: impl AsRef<Path>) -> Result<InitOutcome, String> {
    let config_path = path.as_ref().to_path_buf();
    if config_path.exists() {
        return Err(format!(
            "config already exists, not overwriting: {}",
            config_path.display()
        ));
    }

    let mut created_parent_dir = false;
    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        created_parent_dir = true;
    }

    fs::write(&config_path, CONFIG_TEMPLATE)
        .map_err(|e| format!("failed to write {}: {e}", config_path.display()))?;

    Ok(InitOutcome {
        config_path,
        created_parent_dir,
    })
}

pub fn run(path: String, json_output: bool) {
    let outcome = init_config(&path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let defaults = DiamondAbiConfig::default();
        let payload = json!({
            "action": "init",
            "configPath": outcome.config_path.display().to_string(),
            "createdParentDir": outcome.created_parent_dir,
            "config": defaults,
        });
        println!("{}", render_json_or_exit(&payload, "init"));
        return;
    }

    println!("diamond-abi init {path}");
    println!();
    println!("  config path: {}", outcome.config_path.display());
    println!(
        "  created parent dir: {}",
        yes_no(outcome.created_parent_dir)
    );
}
