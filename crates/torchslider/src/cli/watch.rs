//! `watch` subcommand: dispatch slider action codes read from stdin.
//!
//! Stands in for the slider framework during bring-up: each line is one
//! action code, as the dispatcher would deliver it.

use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::Ordering;

use super::{RUNNING, Result, TorchHandler, load_config, platform_camera};
use torchslider_lib::slider::{ACTION_TORCH_BLINK, ACTION_TORCH_OFF, ACTION_TORCH_ON};

pub(super) fn cmd_watch(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let mut handler = TorchHandler::new(platform_camera(), &config);

    match handler.source_id() {
        Some(id) => println!("[source] {id}"),
        None => println!("[source] none found (actions are accepted but do nothing)"),
    }
    println!(
        "Reading slider action codes from stdin, one per line \
         ({ACTION_TORCH_OFF}=off, {ACTION_TORCH_ON}=on, {ACTION_TORCH_BLINK}=blink)."
    );
    println!("Ctrl+D to exit (forces the torch off).");
    println!();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !RUNNING.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<i32>() {
            Ok(code) => {
                if handler.handle(code) {
                    let state = if handler.blinking() {
                        "blinking"
                    } else if handler.torch_enabled() {
                        "on"
                    } else {
                        "off"
                    };
                    println!("  {code} -> torch {state}");
                } else {
                    println!("  {code} ignored (not a torch action)");
                }
            }
            Err(_) => println!("  {line:?} ignored (not an action code)"),
        }
    }

    // Teardown mirrors the slider framework superseding the handler.
    handler.reset();
    println!();
    println!("Torch off. Done.");
    Ok(())
}
