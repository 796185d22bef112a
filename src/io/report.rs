//! Plain-text reports of a Hückel result
//!
//! Each function renders one section: π-system summary, orbital energies,
//! coefficient table, Hamiltonian and density matrix dumps, bond orders and
//! charges.

use crate::huckel_impl::{HuckelResult, ZERO_ENERGY_EPS};
use nalgebra::DMatrix;

const UNIT_EPS: f64 = 1e-3;
const DENSITY_EPS: f64 = 1e-4;

pub fn format_pi_system(result: &HuckelResult) -> String {
    let atoms: Vec<String> = result
        .pi_atoms
        .iter()
        .map(|a| format!("{}({}e-)", a.display_label(), a.pi_electrons))
        .collect();

    let mut out = String::from("=== π system ===\n");
    out.push_str(&format!("π atoms: {}\n", result.pi_atoms.len()));
    out.push_str(&format!("π electrons: {}\n", result.total_pi_electrons));
    out.push_str(&format!("Atoms: {}\n", atoms.join(", ")));
    out
}

pub fn format_energy_levels(result: &HuckelResult) -> String {
    let homo = result.homo();
    let lumo = result.lumo();

    let mut out = String::from("=== Orbital energies ===\n");
    for (k, (expr, &occ)) in result
        .energy_expressions
        .iter()
        .zip(&result.occupations)
        .enumerate()
    {
        let mut kind = match occ {
            2 => "occupied",
            1 => "singly occupied",
            _ => "vacant",
        }
        .to_string();
        if homo == Some(k) {
            kind.push_str(", HOMO");
        }
        if lumo == Some(k) {
            kind.push_str(", LUMO");
        }
        out.push_str(&format!(
            "ψ{}: {} ({}, {} electron{})\n",
            k + 1,
            expr,
            kind,
            occ,
            if occ == 1 { "" } else { "s" }
        ));
    }

    out.push_str(&format!("Total π energy: {}\n", total_energy_expression(result)));
    if let Some(gap) = result.homo_lumo_gap() {
        out.push_str(&format!("HOMO-LUMO gap: {:.4}β\n", gap));
    }
    out
}

/// `nα + Eβ`, with the β term left out when it vanishes.
pub fn total_energy_expression(result: &HuckelResult) -> String {
    let e = result.total_energy;
    let mut expr = format!("{}α", result.total_pi_electrons);
    if e.abs() >= ZERO_ENERGY_EPS {
        let sign = if e > 0.0 { '+' } else { '-' };
        expr.push_str(&format!(" {} {:.4}β", sign, e.abs()));
    }
    expr
}

pub fn format_coefficients(result: &HuckelResult) -> String {
    let mut out = String::from("=== Orbital coefficients ===\n");
    out.push_str(&format!("{:<8}", "Atom"));
    for k in 0..result.n_orbitals() {
        out.push_str(&format!("{:<12}", format!("ψ{}", k + 1)));
    }
    out.push('\n');

    for (i, atom) in result.pi_atoms.iter().enumerate() {
        out.push_str(&format!("{:<8}", atom.display_label()));
        for orbital in &result.coefficients {
            out.push_str(&format!("{:<12}", format!("{:.4}", orbital[i])));
        }
        out.push('\n');
    }
    out
}

pub fn format_hamiltonian(result: &HuckelResult) -> String {
    let mut out = String::from("=== Hamiltonian H ===\n");
    out.push_str(&matrix_table(result, "H", &result.hamiltonian, hamiltonian_cell));
    out
}

pub fn format_density_matrix(result: &HuckelResult) -> String {
    let mut out = String::from("=== Density matrix P ===\n");
    out.push_str(&matrix_table(
        result,
        "P",
        &result.density_matrix(),
        |_, _, value| {
            if value.abs() < DENSITY_EPS {
                "0.0000".to_string()
            } else {
                format!("{:.4}", value)
            }
        },
    ));
    out
}

pub fn format_bond_orders_and_charges(result: &HuckelResult) -> String {
    let mut out = String::from("=== π bond orders ===\n");
    for (i, j, order) in result.bond_orders() {
        out.push_str(&format!(
            "{:<6} - {:<6} {:.4}\n",
            result.pi_atoms[i].display_label(),
            result.pi_atoms[j].display_label(),
            order
        ));
    }

    out.push_str("=== π charges ===\n");
    for (atom, charge) in result.pi_atoms.iter().zip(result.atom_charges()) {
        let charge = if charge.abs() < DENSITY_EPS { 0.0 } else { charge };
        out.push_str(&format!("{:<6} {:+.4}\n", atom.display_label(), charge));
    }
    out
}

/// Diagonal cells in α/β notation, off-diagonal cells as multiples of β.
fn hamiltonian_cell(i: usize, j: usize, value: f64) -> String {
    if i == j {
        if value.abs() < UNIT_EPS {
            "α".to_string()
        } else if value > 0.0 {
            format!("α+{:.3}β", value)
        } else {
            format!("α{:.3}β", value)
        }
    } else if value.abs() < UNIT_EPS {
        "0".to_string()
    } else if (value - 1.0).abs() < UNIT_EPS {
        "β".to_string()
    } else if (value + 1.0).abs() < UNIT_EPS {
        "-β".to_string()
    } else {
        format!("{:.3}β", value)
    }
}

fn matrix_table(
    result: &HuckelResult,
    corner: &str,
    matrix: &DMatrix<f64>,
    cell: impl Fn(usize, usize, f64) -> String,
) -> String {
    let labels: Vec<String> = result
        .pi_atoms
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{} {}", i + 1, a.display_label()))
        .collect();

    let mut out = format!("{:<10}", corner);
    for label in &labels {
        out.push_str(&format!("{:>12}", label));
    }
    out.push('\n');

    for (i, label) in labels.iter().enumerate() {
        out.push_str(&format!("{:<10}", label));
        for j in 0..matrix.ncols() {
            out.push_str(&format!("{:>12}", cell(i, j, matrix[(i, j)])));
        }
        out.push('\n');
    }
    out
}
