//! Input/Output operations for Hückel calculations
//!
//! This module handles logging setup, text reports and JSON export.

mod output;
mod report;

pub use output::{setup_output, write_json};
pub use report::{
    format_bond_orders_and_charges, format_coefficients, format_density_matrix,
    format_energy_levels, format_hamiltonian, format_pi_system, total_energy_expression,
};
