mod molecule;
mod report;

pub use molecule::build_molecule;

use self::report::{report_coefficients, report_matrices, report_summary};
use crate::config::{Args, Config};
use crate::io::{setup_output, write_json};
use crate::{HuckelCalculator, HuckelResult};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use tracing::info;

pub struct HuckelApplication {
    args: Args,
    config: Config,
}

impl HuckelApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose)?;
        info!("Configuration loaded from: {}", self.args.config_file);

        let result = self.calculate()?;

        report_summary(&result);
        if self.config.show_coefficients(&self.args) {
            report_coefficients(&result);
        }
        if self.config.show_matrices(&self.args) {
            report_matrices(&result);
        }
        if let Some(path) = self.config.json_path(&self.args) {
            write_json(&path, &result)?;
        }

        Ok(())
    }

    /// Build the structure, apply parameter overrides and run one calculation.
    pub fn calculate(&self) -> Result<HuckelResult> {
        let molecule = build_molecule(&self.config)?;

        let mut calculator = HuckelCalculator::new(&molecule).with_numbering(&molecule);
        let overrides = self.config.parameter_overrides();
        if !overrides.is_empty() {
            info!(
                "Applying {} hX and {} hXY parameter overrides",
                overrides.hx.len(),
                overrides.hxy.len()
            );
            calculator.update_parameters(&overrides);
        }

        let charge = self.config.resolve_charge(&self.args);
        info!("Running Hückel calculation with charge {:+}", charge);
        let result = calculator
            .calculate(charge)
            .wrap_err("Hückel calculation failed")?;
        Ok(result)
    }
}

pub fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = Config::from_yaml(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
