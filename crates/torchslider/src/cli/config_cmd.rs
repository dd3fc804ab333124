//! `config` subcommand: show current configuration and file path.

use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width, load_config};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &["blink_interval_ms:", "facing:", "light_source:"],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("blink_interval_ms:", config.blink_interval_ms, w);
    kv_indent(
        "facing:",
        format_args!("{} -> {}", config.facing, config.preferred_facing()),
        w,
    );
    let source_label = if config.light_source.is_empty() {
        "(auto)".to_string()
    } else {
        config.light_source.clone()
    };
    kv_indent("light_source:", source_label, w);

    if let Err(errors) = config.validate() {
        println!();
        println!("Problems:");
        for e in errors {
            println!("  {e}");
        }
    }

    Ok(())
}
