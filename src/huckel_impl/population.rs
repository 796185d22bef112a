//! Orbital ordering, Aufbau filling and derived energetics

use super::eigen::Eigendecomposition;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Eigenvalues closer to zero than this print as plain `α`.
pub const ZERO_ENERGY_EPS: f64 = 1e-3;

/// Molecular orbitals sorted most bonding first, with their occupations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularOrbitals {
    pub energies: Vec<f64>,
    /// `coefficients[k][i]`: weight of atom `i` in orbital `k`.
    pub coefficients: Vec<Vec<f64>>,
    pub occupations: Vec<u8>,
    pub energy_expressions: Vec<String>,
    /// Σ eigenvalue × occupation, in units of β.
    pub total_energy: f64,
}

/// Sort the orbitals by descending eigenvalue, permuting the eigenvectors alike.
pub fn sort_descending(eig: &Eigendecomposition) -> (Vec<f64>, Vec<Vec<f64>>) {
    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

    let energies = order.iter().map(|&k| eig.eigenvalues[k]).collect();
    let coefficients = order
        .iter()
        .map(|&k| eig.eigenvectors.column(k).iter().copied().collect())
        .collect();
    (energies, coefficients)
}

/// Fill orbitals in array order, two electrons each; an odd electron goes
/// alone into the next orbital. Degenerate levels get no special treatment.
pub fn aufbau_fill(n_orbitals: usize, electrons: i32) -> Vec<u8> {
    if electrons < 0 {
        warn!("Negative π electron count {}, leaving all orbitals empty", electrons);
    } else if electrons as usize > 2 * n_orbitals {
        warn!(
            "{} π electrons do not fit in {} orbitals; the excess is left out",
            electrons, n_orbitals
        );
    }

    let mut remaining = electrons;
    let mut occupations = vec![0u8; n_orbitals];
    for occupation in occupations.iter_mut() {
        if remaining >= 2 {
            *occupation = 2;
            remaining -= 2;
        } else if remaining == 1 {
            *occupation = 1;
            remaining = 0;
        } else {
            break;
        }
    }
    occupations
}

/// `α`, `α + β`, `α + 1.618β`, `α - 0.618β`, ...
pub fn energy_expression(eigenvalue: f64) -> String {
    if eigenvalue.abs() < ZERO_ENERGY_EPS {
        return "α".to_string();
    }
    let sign = if eigenvalue > 0.0 { '+' } else { '-' };
    format!("α {} {}β", sign, beta_coefficient(eigenvalue.abs()))
}

/// Magnitude to three decimals, with `.000` dropped and a unit coefficient omitted.
pub fn beta_coefficient(magnitude: f64) -> String {
    let text = format!("{:.3}", magnitude);
    match text.strip_suffix(".000") {
        Some("1") => String::new(),
        Some(integer) => integer.to_string(),
        None => text,
    }
}

pub fn total_pi_energy(energies: &[f64], occupations: &[u8]) -> f64 {
    energies
        .iter()
        .zip(occupations)
        .map(|(e, &occ)| e * occ as f64)
        .sum()
}

pub fn populate(eig: &Eigendecomposition, total_pi_electrons: i32) -> MolecularOrbitals {
    let (energies, coefficients) = sort_descending(eig);
    let occupations = aufbau_fill(energies.len(), total_pi_electrons);
    let energy_expressions: Vec<String> = energies.iter().map(|&e| energy_expression(e)).collect();
    let total_energy = total_pi_energy(&energies, &occupations);

    for (k, ((expr, occ), e)) in energy_expressions
        .iter()
        .zip(&occupations)
        .zip(&energies)
        .enumerate()
    {
        let kind = if *e > 0.0 { "bonding" } else { "antibonding" };
        debug!("ψ{}: {} ({}, {} e)", k + 1, expr, kind, occ);
    }

    MolecularOrbitals {
        energies,
        coefficients,
        occupations,
        energy_expressions,
        total_energy,
    }
}

/// π density matrix `P[i][j] = Σ_k occ_k · c_ki · c_kj`.
pub fn density_matrix(coefficients: &[Vec<f64>], occupations: &[u8]) -> DMatrix<f64> {
    let n = coefficients.first().map_or(0, Vec::len);
    DMatrix::from_fn(n, n, |i, j| {
        coefficients
            .iter()
            .zip(occupations)
            .map(|(c, &occ)| occ as f64 * c[i] * c[j])
            .sum()
    })
}

/// Highest occupied orbital; orbitals are taken in the sorted order, most bonding first.
pub fn homo_index(occupations: &[u8]) -> Option<usize> {
    occupations.iter().rposition(|&occ| occ > 0)
}

/// Lowest unoccupied orbital.
pub fn lumo_index(occupations: &[u8]) -> Option<usize> {
    occupations.iter().position(|&occ| occ == 0)
}
