//! Logger initialisation shared by the binaries.
use camino::Utf8Path;
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

/// Start the global logger.
///
/// Arguments
/// -----------------
/// * `level`: log specification used when `RUST_LOG` is unset (e.g. `info`,
///   `neo_ml=debug`).
/// * `log_dir`: when given, log to rotating files in this directory and copy warnings to
///   stderr; otherwise log to stderr only.
///
/// Return
/// ----------
/// * The logger handle. Logging stops when it is dropped, so keep it alive in `main`.
pub fn setup_logging(
    level: &str,
    log_dir: Option<&Utf8Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?;
    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir.as_std_path()))
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                Criterion::Size(1024 * 1024),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(5),
            ),
        None => logger.log_to_stderr(),
    };
    logger.start()
}
