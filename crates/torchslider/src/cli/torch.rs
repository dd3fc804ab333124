//! `torch` subcommand: switch the torch on or off directly.

use std::path::Path;

use super::{Result, TorchHandler, TorchState, load_config, platform_camera};
use torchslider_lib::slider::{ACTION_TORCH_OFF, ACTION_TORCH_ON};

pub(super) fn cmd_torch(state: TorchState, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let mut handler = TorchHandler::new(platform_camera(), &config);

    let Some(id) = handler.source_id().map(str::to_owned) else {
        println!(
            "No {}-facing light source found; nothing to do.",
            config.preferred_facing()
        );
        return Ok(());
    };

    // Torch control is best-effort: the handler swallows hardware failures.
    let (code, label) = match state {
        TorchState::On => (ACTION_TORCH_ON, "on"),
        TorchState::Off => (ACTION_TORCH_OFF, "off"),
    };
    handler.handle(code);
    println!("[torch] {id} -> {label}");
    Ok(())
}
