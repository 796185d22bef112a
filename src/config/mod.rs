//! Configuration management for Hückel calculations
//!
//! A configuration file carries the drawn structure (atoms, bonds and an
//! optional custom numbering), the net charge, parameter overrides and
//! report settings. Missing sections fall back to defaults.

mod args;

pub use args::Args;

use crate::error::Result;
use crate::params::ParameterOverrides;
use crate::structure::{AtomId, AtomView, BondView, Molecule};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub molecule: MoleculeConfig,
    pub charge: Option<i32>,
    pub parameters: Option<ParameterOverrides>,
    pub report: Option<ReportParams>,
}

/// Drawn structure as the editor would hand it over
#[derive(Debug, Deserialize, Serialize)]
pub struct MoleculeConfig {
    pub atoms: Vec<AtomView>,
    #[serde(default)]
    pub bonds: Vec<BondView>,
    #[serde(default, deserialize_with = "numbering_labels")]
    pub numbering: HashMap<AtomId, String>,
}

/// A custom number written either bare (`3: 7`) or quoted (`3: "7a"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLabel {
    Integer(i64),
    Text(String),
}

fn numbering_labels<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<AtomId, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<AtomId, NumberLabel>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, label)| match label {
            NumberLabel::Integer(n) => (id, n.to_string()),
            NumberLabel::Text(text) => (id, text),
        })
        .collect())
}

impl MoleculeConfig {
    /// Build a validated in-memory [`Molecule`]; atoms keep the file order.
    pub fn to_molecule(&self) -> Result<Molecule> {
        let mut mol = Molecule::new();
        for atom in &self.atoms {
            mol.add_atom(atom.id, atom.x, atom.y, atom.label.clone())?;
        }
        for bond in &self.bonds {
            mol.add_bond(bond.begin, bond.end, bond.order)?;
        }
        let mut numbered: Vec<(&AtomId, &String)> = self.numbering.iter().collect();
        numbered.sort();
        for (id, number) in numbered {
            mol.set_custom_number(*id, number.clone())?;
        }
        Ok(mol)
    }
}

/// Report sections to print
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportParams {
    pub coefficients: Option<bool>,
    pub matrices: Option<bool>,
    pub json: Option<String>,
}

impl Default for ReportParams {
    fn default() -> Self {
        ReportParams {
            coefficients: Some(true),
            matrices: Some(true),
            json: None,
        }
    }
}

impl ReportParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.coefficients.is_none() {
            self.coefficients = defaults.coefficients;
        }
        if self.matrices.is_none() {
            self.matrices = defaults.matrices;
        }
        self
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.report = Some(self.report.take().unwrap_or_default().with_defaults());
        self
    }

    /// Command line wins over the file; neutral if neither sets it.
    pub fn resolve_charge(&self, args: &Args) -> i32 {
        args.charge.or(self.charge).unwrap_or(0)
    }

    pub fn show_coefficients(&self, args: &Args) -> bool {
        !args.no_coefficients
            && self
                .report
                .as_ref()
                .and_then(|r| r.coefficients)
                .unwrap_or(true)
    }

    pub fn show_matrices(&self, args: &Args) -> bool {
        !args.no_matrices && self.report.as_ref().and_then(|r| r.matrices).unwrap_or(true)
    }

    pub fn json_path(&self, args: &Args) -> Option<String> {
        args.json
            .clone()
            .or_else(|| self.report.as_ref().and_then(|r| r.json.clone()))
    }

    pub fn parameter_overrides(&self) -> ParameterOverrides {
        self.parameters.clone().unwrap_or_default()
    }
}
