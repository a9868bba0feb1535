//! Load the three sample files, check that they reference each other consistently and
//! print the NEO labels derived for tracklets and detections.
use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use log::info;

use neo_ml::{cli::IngestArgs, logging::setup_logging, SampleData};

fn main() -> Result<()> {
    let args = IngestArgs::parse();
    let _logger = setup_logging(&args.log.log_level, args.log.log_dir.as_deref())
        .context("Logger initialization failed")?;

    let data = SampleData::load(&args.detections, &args.tracklets, &args.objects)
        .context("Failed to read the sample files")?;
    info!(
        "{} detections, {} tracklets, {} objects",
        data.detections.len(),
        data.tracklets.len(),
        data.objects.len()
    );

    let report = data.integrity_report();
    println!("{report}");
    report.into_result()?;

    let labels = data.labels()?;
    let (neo_det, neo_trk) = labels.neo_count();
    let (non_neo_det, non_neo_trk) = labels.non_neo_count();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Label", "Detections", "Tracklets"]);
    table.add_row(vec![
        "NEO".to_string(),
        neo_det.to_string(),
        neo_trk.to_string(),
    ]);
    table.add_row(vec![
        "non-NEO".to_string(),
        non_neo_det.to_string(),
        non_neo_trk.to_string(),
    ]);
    println!("{table}");

    println!("{labels}");

    Ok(())
}
