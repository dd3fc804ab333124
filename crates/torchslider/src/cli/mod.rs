//! CLI subcommands: light sources, torch control, slider dispatch.

mod action;
mod config_cmd;
mod sources;
mod torch;
mod watch;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use torchslider_lib::camera::{LightSource, platform_camera};
pub(super) use torchslider_lib::config::Config;
pub(super) use torchslider_lib::error::Result;
pub(super) use torchslider_lib::handler::TorchHandler;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load the config from the given path, or the default platform path.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct SourcesOutput {
    pub count: usize,
    pub sources: Vec<LightSource>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum TorchState {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum Command {
    /// List torch-capable light sources
    Sources,

    /// Switch the torch on or off
    Torch {
        /// Target state
        #[arg(value_enum)]
        state: TorchState,
    },

    /// Feed one raw slider action code to the handler
    Action {
        /// Action code (20=off, 21=on, 22=blink)
        code: i32,
    },

    /// Read slider action codes from stdin and dispatch them
    Watch,

    /// Show current configuration and file path
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Sources => sources::cmd_sources(json),
        Command::Torch { state } => {
            if json {
                warn_json_unsupported("torch");
            }
            torch::cmd_torch(state, config_path)
        }
        Command::Action { code } => {
            if json {
                warn_json_unsupported("action");
            }
            action::cmd_action(code, config_path)
        }
        Command::Watch => {
            if json {
                warn_json_unsupported("watch");
            }
            watch::cmd_watch(config_path)
        }
        Command::Config => config_cmd::cmd_config(json, config_path),
    }
}


#[cfg(test)]
mod json_struct_tests {
    use super::*;

    #[test]
    fn sources_output_empty() {
        let output = SourcesOutput {
            count: 0,
            sources: vec![],
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["count"], 0);
        assert!(parsed["sources"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sources_output_with_sources() {
        use torchslider_lib::camera::Facing;

        let output = SourcesOutput {
            count: 1,
            sources: vec![LightSource {
                id: "white:flash".into(),
                facing: Facing::Back,
            }],
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["sources"][0]["id"], "white:flash");
        assert_eq!(parsed["sources"][0]["facing"], "back");
    }

    #[test]
    fn config_output_complete() {
        let output = ConfigOutput {
            config_file: Some("/home/user/.config/torchslider/config.toml".into()),
            config_file_exists: true,
            settings: Config::default(),
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["config_file"].is_string());
        assert_eq!(parsed["config_file_exists"], true);
        assert_eq!(parsed["settings"]["blink_interval_ms"], 250);
        assert_eq!(parsed["settings"]["facing"], "back");
    }

    #[test]
    fn config_output_missing_path_is_null() {
        let output = ConfigOutput {
            config_file: None,
            config_file_exists: false,
            settings: Config::default(),
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["config_file"].is_null());
    }
}
