//! Calculation façade tying detection, matrix build, diagonalization and filling together

use super::detector::{detect_pi_atoms, PiAtom};
use super::eigen::diagonalize;
use super::hamiltonian::{build_hamiltonian, pi_bonds};
use super::population::{density_matrix, homo_index, lumo_index, populate};
use crate::error::{HuckelError, Result};
use crate::params::{HuckelParameters, ParameterOverrides};
use crate::structure::{NumberingSource, StructureSource};
use nalgebra::DMatrix;
use serde::Serialize;
use tracing::info;

/// Everything one `calculate` call produced. Orbitals are ordered most
/// bonding first; energies are in units of β relative to α.
#[derive(Debug, Clone, Serialize)]
pub struct HuckelResult {
    pub energies: Vec<f64>,
    /// `coefficients[k][i]`: weight of atom `i` in orbital `k`.
    pub coefficients: Vec<Vec<f64>>,
    pub occupations: Vec<u8>,
    pub energy_expressions: Vec<String>,
    pub total_energy: f64,
    pub total_pi_electrons: i32,
    pub pi_atoms: Vec<PiAtom>,
    pub parameters: HuckelParameters,
    pub hamiltonian: DMatrix<f64>,
    /// Bonded π pairs in matrix indices, `i < j`.
    pub pi_bonds: Vec<(usize, usize)>,
}

impl HuckelResult {
    pub fn n_orbitals(&self) -> usize {
        self.energies.len()
    }

    pub fn density_matrix(&self) -> DMatrix<f64> {
        density_matrix(&self.coefficients, &self.occupations)
    }

    /// Net π charge per atom: contributed electrons minus π density.
    pub fn atom_charges(&self) -> Vec<f64> {
        let p = self.density_matrix();
        self.pi_atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| atom.pi_electrons as f64 - p[(i, i)])
            .collect()
    }

    /// π bond order of every bonded pair.
    pub fn bond_orders(&self) -> Vec<(usize, usize, f64)> {
        let p = self.density_matrix();
        self.pi_bonds.iter().map(|&(i, j)| (i, j, p[(i, j)])).collect()
    }

    pub fn homo(&self) -> Option<usize> {
        homo_index(&self.occupations)
    }

    pub fn lumo(&self) -> Option<usize> {
        lumo_index(&self.occupations)
    }

    /// `E(HOMO) - E(LUMO)` in units of β.
    pub fn homo_lumo_gap(&self) -> Option<f64> {
        Some(self.energies[self.homo()?] - self.energies[self.lumo()?])
    }
}

/// Hückel calculator bound to a structure source and an optional numbering store.
///
/// Holds its parameter table by value; [`HuckelCalculator::update_parameters`]
/// replaces it with a merged copy and never triggers a recalculation.
pub struct HuckelCalculator<'a> {
    source: Option<&'a dyn StructureSource>,
    numbering: Option<&'a dyn NumberingSource>,
    parameters: HuckelParameters,
}

impl<'a> HuckelCalculator<'a> {
    pub fn new(source: &'a dyn StructureSource) -> Self {
        HuckelCalculator {
            source: Some(source),
            numbering: None,
            parameters: HuckelParameters::default(),
        }
    }

    /// Calculator with no structure attached yet; `calculate` fails until
    /// [`HuckelCalculator::attach`] is called.
    pub fn detached() -> Self {
        HuckelCalculator {
            source: None,
            numbering: None,
            parameters: HuckelParameters::default(),
        }
    }

    pub fn attach(&mut self, source: &'a dyn StructureSource) {
        self.source = Some(source);
    }

    pub fn with_numbering(mut self, numbering: &'a dyn NumberingSource) -> Self {
        self.numbering = Some(numbering);
        self
    }

    pub fn with_parameters(mut self, parameters: HuckelParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn update_parameters(&mut self, overrides: &ParameterOverrides) {
        self.parameters = self.parameters.with_overrides(overrides);
    }

    pub fn reset_parameters(&mut self) {
        self.parameters = HuckelParameters::default();
    }

    pub fn current_parameters(&self) -> &HuckelParameters {
        &self.parameters
    }

    fn source(&self) -> Result<&'a dyn StructureSource> {
        self.source.ok_or(HuckelError::MissingEditorState)
    }

    pub fn detect_pi_atoms(&self) -> Result<Vec<PiAtom>> {
        let source = self.source()?;
        Ok(detect_pi_atoms(&source.atoms(), &source.bonds(), self.numbering))
    }

    /// Run a Hückel calculation for the given net molecular charge.
    pub fn calculate(&self, total_charge: i32) -> Result<HuckelResult> {
        let source = self.source()?;
        let bonds = source.bonds();

        let pi_atoms = detect_pi_atoms(&source.atoms(), &bonds, self.numbering);
        if pi_atoms.is_empty() {
            return Err(HuckelError::NoConjugatedSystem);
        }

        let base_electrons: i32 = pi_atoms.iter().map(|a| a.pi_electrons as i32).sum();
        let total_pi_electrons = base_electrons
            .checked_sub(total_charge)
            .ok_or(HuckelError::InvalidCharge {
                charge: total_charge,
                electrons: base_electrons,
            })?;
        info!(
            "Detected {} π atoms, {} π electrons (charge {:+})",
            pi_atoms.len(),
            total_pi_electrons,
            total_charge
        );

        let hamiltonian = build_hamiltonian(&pi_atoms, &bonds, &self.parameters);
        let eig = diagonalize(&hamiltonian)?;
        let orbitals = populate(&eig, total_pi_electrons);
        info!("Total π energy: {}α + {:.4}β", total_pi_electrons, orbitals.total_energy);

        Ok(HuckelResult {
            energies: orbitals.energies,
            coefficients: orbitals.coefficients,
            occupations: orbitals.occupations,
            energy_expressions: orbitals.energy_expressions,
            total_energy: orbitals.total_energy,
            total_pi_electrons,
            pi_bonds: pi_bonds(&pi_atoms, &bonds),
            pi_atoms,
            parameters: self.parameters.clone(),
            hamiltonian,
        })
    }
}
