//! Hückel calculation command-line interface
//!
//! Reads a drawn structure from a YAML file, runs the Hückel calculation and
//! prints the orbital energies, coefficients and matrices.

use color_eyre::eyre::Result;
use huckel::app::HuckelApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    HuckelApplication::from_cli()?.run()
}
