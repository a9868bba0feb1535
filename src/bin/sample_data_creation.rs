//! Reformat raw MPC observation and orbit exports into the detection, tracklet and object
//! sample files.
use anyhow::{Context, Result};
use clap::Parser;

use neo_ml::{
    cli::ReformatArgs,
    logging::setup_logging,
    mpc_export::pipeline::{output_paths, run_reformat, ReformatConfig},
};

fn main() -> Result<()> {
    let args = ReformatArgs::parse();
    let _logger = setup_logging(&args.log.log_level, args.log.log_dir.as_deref())
        .context("Logger initialization failed")?;

    let config = ReformatConfig::from(&args);
    let summary = run_reformat(&config).with_context(|| {
        format!(
            "Reformatting {} with orbits from {} failed",
            config.observation_path(),
            config.orbit_path()
        )
    })?;

    println!("{summary}");
    for path in output_paths(&config) {
        println!("wrote {path}");
    }
    Ok(())
}
