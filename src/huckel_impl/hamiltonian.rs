//! Secular (Hückel) matrix construction

use super::detector::PiAtom;
use crate::params::HuckelParameters;
use crate::structure::{AtomId, BondView};
use nalgebra::DMatrix;
use std::collections::HashMap;
use tracing::debug;

/// Row/column index of every π atom, in the order of `pi_atoms`.
pub fn index_map(pi_atoms: &[PiAtom]) -> HashMap<AtomId, usize> {
    pi_atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| (atom.id, index))
        .collect()
}

/// Bonds whose two ends are both π atoms, as `(i, j)` with `i < j`.
/// A pair drawn twice is reported once.
pub fn pi_bonds(pi_atoms: &[PiAtom], bonds: &[BondView]) -> Vec<(usize, usize)> {
    let index = index_map(pi_atoms);
    let mut pairs: Vec<(usize, usize)> = bonds
        .iter()
        .filter_map(|bond| Some((*index.get(&bond.begin)?, *index.get(&bond.end)?)))
        .filter(|(i, j)| i != j)
        .map(|(i, j)| (i.min(j), i.max(j)))
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Build H in units of β with the common α dropped.
///
/// `H[i][i] = hX(element_i)`; `H[i][j] = H[j][i] = hXY(element_i, element_j)`
/// for bonded π pairs and zero otherwise. Bonds touching a non-π atom are
/// ignored.
pub fn build_hamiltonian(
    pi_atoms: &[PiAtom],
    bonds: &[BondView],
    params: &HuckelParameters,
) -> DMatrix<f64> {
    let n = pi_atoms.len();
    let mut h = DMatrix::zeros(n, n);

    for (i, atom) in pi_atoms.iter().enumerate() {
        h[(i, i)] = params.get_hx(&atom.element, atom.pi_electrons);
    }

    for (i, j) in pi_bonds(pi_atoms, bonds) {
        let (a, b) = (&pi_atoms[i], &pi_atoms[j]);
        let value = params.get_hxy(&a.element, &b.element, a.pi_electrons, b.pi_electrons);
        h[(i, j)] = value;
        h[(j, i)] = value;
        debug!(
            "Bond {} - {}: hXY = {:.3}",
            a.display_label(),
            b.display_label(),
            value
        );
    }

    h
}
