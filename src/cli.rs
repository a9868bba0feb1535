//! Command-line options of the two binaries.
//!
//! Running either binary without arguments uses the historical file layout:
//!
//! ```text
//! sample_data/sample_data_real_{observations,tracklets,objects}.txt      (ingest_demo)
//! raw_data/sample_orbit_large.csv, raw_data/sample_obs_<size>_sorted.csv (sample_data_creation)
//! ```
use camino::Utf8PathBuf;
use clap::{Args, Parser};

use crate::mpc_export::pipeline::ReformatConfig;

/// Logging options shared by both binaries.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct LogArgs {
    /// Log specification, overridden by `RUST_LOG` (e.g. `info`, `neo_ml=debug`)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    pub log_dir: Option<Utf8PathBuf>,
}

/// Load the three sample files, check their links and print the NEO labels.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct IngestArgs {
    /// Detection sample file
    #[arg(long, default_value = "sample_data/sample_data_real_observations.txt")]
    pub detections: Utf8PathBuf,

    /// Tracklet sample file
    #[arg(long, default_value = "sample_data/sample_data_real_tracklets.txt")]
    pub tracklets: Utf8PathBuf,

    /// Object sample file
    #[arg(long, default_value = "sample_data/sample_data_real_objects.txt")]
    pub objects: Utf8PathBuf,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Reformat raw MPC observation and orbit exports into sample files.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct ReformatArgs {
    /// Directory holding `sample_orbit_large.csv` and `sample_obs_<size>_sorted.csv`
    #[arg(long, default_value = "raw_data")]
    pub raw_dir: Utf8PathBuf,

    /// Directory receiving the sample files
    #[arg(long, default_value = "sample_data")]
    pub output_dir: Utf8PathBuf,

    /// Size tag of the observation export
    #[arg(long, default_value = "1e5")]
    pub size: String,

    /// MPC observatory code listing (ObsCodes.html or plain text)
    #[arg(long, default_value = "raw_data/ObsCodes.html")]
    pub obs_codes: Utf8PathBuf,

    /// Number of tracklets written per batch
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    #[command(flatten)]
    pub log: LogArgs,
}

impl From<&ReformatArgs> for ReformatConfig {
    fn from(args: &ReformatArgs) -> Self {
        ReformatConfig {
            raw_dir: args.raw_dir.clone(),
            output_dir: args.output_dir.clone(),
            size: args.size.clone(),
            obs_codes: args.obs_codes.clone(),
            batch_size: args.batch_size as usize,
        }
    }
}

#[cfg(test)]
mod cli_test {
    use super::*;

    #[test]
    fn test_ingest_defaults() {
        let args = IngestArgs::parse_from(["ingest_demo"]);
        assert_eq!(
            args.detections,
            "sample_data/sample_data_real_observations.txt"
        );
        assert_eq!(args.tracklets, "sample_data/sample_data_real_tracklets.txt");
        assert_eq!(args.objects, "sample_data/sample_data_real_objects.txt");
        assert_eq!(args.log.log_level, "info");
        assert_eq!(args.log.log_dir, None);
    }

    #[test]
    fn test_reformat_defaults_match_config() {
        let args = ReformatArgs::parse_from(["sample_data_creation"]);
        assert_eq!(ReformatConfig::from(&args), ReformatConfig::default());
    }

    #[test]
    fn test_reformat_overrides() {
        let args = ReformatArgs::parse_from([
            "sample_data_creation",
            "--size",
            "1e3",
            "--batch-size",
            "7",
            "--output-dir",
            "/tmp/out",
        ]);
        let config = ReformatConfig::from(&args);
        assert_eq!(config.batch_size, 7);
        assert_eq!(
            config.detection_output(),
            "/tmp/out/sample_data_1e3_real_detections.csv"
        );

        assert!(ReformatArgs::try_parse_from(["sample_data_creation", "--batch-size", "0"]).is_err());
    }
}
