use anyhow::Result;

use quest_engine::device::GpuInit;
use quest_engine::logging::{init_logging, LoggingConfig};
use quest_engine::scene::presets;
use quest_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = presets::starter_scene()?;
    log::debug!("starter scene: {} shapes", scene.len());

    let config = RuntimeConfig::default()
        .with_title("Quest 1")
        .with_size(800.0, 800.0);

    Runtime::run(config, GpuInit::default(), scene)
}
