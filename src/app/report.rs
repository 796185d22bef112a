use crate::io::{
    format_bond_orders_and_charges, format_coefficients, format_density_matrix,
    format_energy_levels, format_hamiltonian, format_pi_system,
};
use crate::HuckelResult;
use tracing::info;

pub fn report_summary(result: &HuckelResult) {
    info!("\n{}", format_pi_system(result));
    info!("\n{}", format_energy_levels(result));
}

pub fn report_coefficients(result: &HuckelResult) {
    info!("\n{}", format_coefficients(result));
}

pub fn report_matrices(result: &HuckelResult) {
    info!("\n{}", format_hamiltonian(result));
    info!("\n{}", format_density_matrix(result));
    info!("\n{}", format_bond_orders_and_charges(result));
}
