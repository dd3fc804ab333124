//! `action` subcommand: feed one raw slider action code to the handler.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::{RUNNING, Result, TorchHandler, load_config, platform_camera};
use torchslider_lib::slider::UnknownAction;

pub(super) fn cmd_action(code: i32, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let mut handler = TorchHandler::new(platform_camera(), &config);

    if !handler.handle(code) {
        return Err(UnknownAction(code).into());
    }

    if handler.blinking() {
        // A one-shot process has nobody to supersede the blink task, so
        // hold it until the user interrupts, then restore a dark torch.
        println!(
            "Blinking every {} ms. Ctrl+C to stop.",
            config.blink_interval_ms
        );
        while RUNNING.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(50));
        }
        handler.reset();
        println!();
        println!("Torch off.");
    } else {
        println!(
            "Action {code} handled (torch {}).",
            if handler.torch_enabled() { "on" } else { "off" }
        );
    }

    Ok(())
}
