//! Logging setup and JSON export

use crate::huckel_impl::HuckelResult;
use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Wall-clock time of day, seconds precision
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        write!(
            w,
            "{:02}:{:02}:{:02}",
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60
        )
    }
}

/// Route tracing output to a file, or to stdout when no path is given.
pub fn setup_output(output_path: Option<&String>, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file {}", path))?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false)
                .with_filter(level);
            Registry::default()
                .with(file_layer)
                .try_init()
                .wrap_err("Failed to install the log subscriber")?;
            info!("Output written to: {}", path);
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default()
                .with(stdout_layer)
                .try_init()
                .wrap_err("Failed to install the log subscriber")?;
        }
    }
    Ok(())
}

/// Dump the whole result bundle, parameters included, as pretty JSON.
pub fn write_json(path: &str, result: &HuckelResult) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("Unable to create {}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .wrap_err("Failed to serialize Hückel results")?;
    info!("Results written to {}", path);
    Ok(())
}
