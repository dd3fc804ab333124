//! `sources` subcommand: list torch-capable light sources.

use super::{Result, SourcesOutput, platform_camera};
use torchslider_lib::camera::CameraService;

pub(super) fn cmd_sources(json: bool) -> Result<()> {
    let camera = platform_camera();
    let sources = camera.light_sources()?;

    if json {
        let output = SourcesOutput {
            count: sources.len(),
            sources,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    if sources.is_empty() {
        println!("No torch-capable light sources found.");
        return Ok(());
    }

    println!(
        "Found {} light source{}:",
        sources.len(),
        if sources.len() == 1 { "" } else { "s" }
    );
    println!();

    for (i, src) in sources.iter().enumerate() {
        println!("  [{}] {} (facing: {})", i + 1, src.id, src.facing);
    }

    Ok(())
}
