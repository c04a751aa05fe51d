//! The `keyscore validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(config_path: PathBuf) -> Result<()> {
    let configs = if config_path.is_dir() {
        keyscore_core::parser::load_config_directory(&config_path)?
    } else {
        let config = keyscore_core::parser::parse_config(&config_path)
            .with_context(|| format!("invalid config {}", config_path.display()))?;
        vec![(config_path.clone(), config)]
    };

    let mut total_warnings = 0;

    for (path, config) in &configs {
        println!(
            "Config: {} ({} groups, {} points max)",
            path.display(),
            config.groups.len(),
            config.max_possible()
        );

        let warnings = keyscore_core::parser::validate_config(config);
        for w in &warnings {
            let prefix = w
                .group
                .map(|index| format!("  [group {}]", index + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All configs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
