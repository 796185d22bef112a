//! Command-line argument parsing for Hückel calculations

use clap::Parser;

/// Hückel π-electron calculation on a 2D structure described in YAML
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML structure/configuration file
    #[arg(short, long, default_value = "molecule.yaml")]
    pub config_file: String,

    /// Override the net molecular charge
    #[arg(long, allow_negative_numbers = true)]
    pub charge: Option<i32>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the full result bundle as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Skip the orbital coefficient table
    #[arg(long)]
    pub no_coefficients: bool,

    /// Skip the Hamiltonian and density matrix dumps
    #[arg(long)]
    pub no_matrices: bool,

    /// Log detection and matrix details
    #[arg(short, long)]
    pub verbose: bool,
}
