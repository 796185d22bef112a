//! Simple Hückel molecular-orbital theory for conjugated π systems
//!
//! The pipeline for one calculation:
//!
//! 1. [`detect_pi_atoms`] picks the π atoms of the drawn structure and how
//!    many electrons each contributes, sorted by user-facing number.
//! 2. [`build_hamiltonian`] fills the secular matrix in units of β from the
//!    parameter table.
//! 3. [`diagonalize`] solves the symmetric eigenproblem.
//! 4. [`populate`] sorts the orbitals most bonding first, fills them by the
//!    Aufbau rule and derives the total π energy.
//!
//! [`HuckelCalculator`] runs the whole pipeline against a structure source.
//!
//! # Usage
//!
//! ```rust,ignore
//! use huckel::{BondType, HuckelCalculator, Molecule};
//!
//! let mut mol = Molecule::new();
//! mol.add_atom(1, 0.0, 0.0, "C")?;
//! mol.add_atom(2, 1.3, 0.0, "C")?;
//! mol.add_bond(1, 2, BondType::Double)?;
//!
//! let result = HuckelCalculator::new(&mol).calculate(0)?;
//! assert_eq!(result.energy_expressions, vec!["α + β", "α - β"]);
//! ```

mod calculator;
mod detector;
mod eigen;
mod hamiltonian;
mod population;
#[cfg(test)]
mod tests;

pub use calculator::{HuckelCalculator, HuckelResult};
pub use detector::{compare_user_numbers, detect_pi_atoms, PiAtom};
pub use eigen::{align_eigenvectors, closed_form_2x2, diagonalize, Eigendecomposition};
pub use hamiltonian::{build_hamiltonian, index_map, pi_bonds};
pub use population::{
    aufbau_fill, density_matrix, energy_expression, homo_index, lumo_index, populate,
    sort_descending, total_pi_energy, MolecularOrbitals, ZERO_ENERGY_EPS,
};
