//! Hückel parameter table
//!
//! Heteroatom corrections in units of β: the Coulomb integral of atom X is
//! `α + hX·β` and the resonance integral of bond X–Y is `hXY·β`. Bond keys
//! join two element symbols with `-`; a `2` after a symbol (`C-N2`) selects
//! the value for an adaptive element contributing two π electrons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Elements whose corrections depend on their local π-electron count.
pub const ADAPTIVE_ELEMENTS: [&str; 4] = ["N", "O", "S", "P"];

/// Fallback resonance correction for a bond type missing from the table.
pub const DEFAULT_HXY: f64 = 1.0;

const DEFAULT_HX: [(&str, f64); 10] = [
    ("C", 0.0),
    ("N", 1.37),
    ("O", 2.09),
    ("S", 1.11),
    ("P", 0.75),
    ("Cl", 1.48),
    ("Br", 1.48),
    ("F", 2.71),
    ("B", -0.45),
    ("Si", 0.0),
];

// (element, hX with one π electron, hX with two π electrons)
const ADAPTIVE_HX: [(&str, f64, f64); 4] = [
    ("N", 0.51, 1.37),
    ("O", 0.97, 2.09),
    ("S", 0.46, 1.11),
    ("P", 0.19, 0.75),
];

const DEFAULT_HXY_TABLE: [(&str, f64); 97] = [
    ("C-C", 1.00),
    ("C-B", 0.73),
    ("C-N", 1.02),
    ("C-N2", 0.89),
    ("C-O", 1.06),
    ("C-O2", 0.66),
    ("C-F", 0.52),
    ("C-Si", 0.75),
    ("C-P", 0.77),
    ("C-P2", 0.76),
    ("C-S", 0.81),
    ("C-S2", 0.69),
    ("C-Cl", 0.62),
    ("C-Br", 0.62),
    ("B-B", 0.87),
    ("B-N", 0.66),
    ("B-N2", 0.53),
    ("B-O", 0.60),
    ("B-O2", 0.35),
    ("B-F", 0.26),
    ("B-Si", 0.57),
    ("B-P", 0.53),
    ("B-P2", 0.54),
    ("B-S", 0.51),
    ("B-S2", 0.44),
    ("B-Cl", 0.41),
    ("B-Br", 0.41),
    ("N-N", 1.09),
    ("N-O", 1.14),
    ("N-F", 0.65),
    ("N-Si", 0.72),
    ("N-P", 0.78),
    ("N-S", 0.83),
    ("N-Cl", 0.77),
    ("N-Br", 0.77),
    ("N2-N2", 0.98),
    ("N2-O", 1.13),
    ("N2-O2", 1.02),
    ("N2-F", 0.77),
    ("N2-Si", 0.43),
    ("N2-P", 0.65),
    ("N2-P2", 0.82),
    ("N2-S", 0.64),
    ("N2-S2", 0.85),
    ("N2-Cl", 0.73),
    ("O-O", 1.26),
    ("O-O2", 0.95),
    ("O-F", 0.94),
    ("O-Si", 0.43),
    ("O-P", 0.50),
    ("O-P2", 0.75),
    ("O-S", 0.54),
    ("O-S2", 0.82),
    ("O-Cl", 0.80),
    ("O-Br", 0.80),
    ("O2-O2", 0.95),
    ("O2-F", 0.94),
    ("O2-Si", 0.24),
    ("O2-P", 0.31),
    ("O2-P2", 0.39),
    ("O2-S", 0.48),
    ("O2-S2", 0.54),
    ("O2-Cl", 0.70),
    ("F-F", 1.04),
    ("F-Si", 0.17),
    ("F-P", 0.21),
    ("F-P2", 0.22),
    ("F-S", 0.22),
    ("F-S2", 0.32),
    ("F-Cl", 0.51),
    ("F-Br", 0.51),
    ("Si-Si", 0.64),
    ("Si-P", 0.62),
    ("Si-P2", 0.58),
    ("Si-S", 0.52),
    ("Si-S2", 0.40),
    ("Si-Cl", 0.34),
    ("Si-Br", 0.34),
    ("P-P", 0.63),
    ("P-P2", 0.58),
    ("P-S", 0.58),
    ("P-S2", 0.48),
    ("P-Cl", 0.35),
    ("P-Br", 0.35),
    ("P2-P2", 0.63),
    ("P2-S", 0.65),
    ("P2-S2", 0.60),
    ("P2-Cl", 0.55),
    ("S-S", 0.68),
    ("S-S2", 0.58),
    ("S-Cl", 0.56),
    ("S-Br", 0.56),
    ("S2-S2", 0.63),
    ("S2-Cl", 0.52),
    ("Cl-Cl", 0.68),
    ("Br-Br", 0.65),
    ("Cl-Br", 0.66),
];

pub fn is_adaptive(element: &str) -> bool {
    ADAPTIVE_ELEMENTS.contains(&element)
}

/// Full parameter set: per-element hX and per-bond hXY corrections.
///
/// Treated as an immutable value; updates go through [`HuckelParameters::with_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuckelParameters {
    #[serde(rename = "hX")]
    pub hx: BTreeMap<String, f64>,
    #[serde(rename = "hXY")]
    pub hxy: BTreeMap<String, f64>,
}

impl Default for HuckelParameters {
    fn default() -> Self {
        HuckelParameters {
            hx: DEFAULT_HX
                .iter()
                .map(|(el, v)| (el.to_string(), *v))
                .collect(),
            hxy: DEFAULT_HXY_TABLE
                .iter()
                .map(|(key, v)| (key.to_string(), *v))
                .collect(),
        }
    }
}

/// Partial update of a [`HuckelParameters`]; keys not listed are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    #[serde(rename = "hX", default)]
    pub hx: BTreeMap<String, f64>,
    #[serde(rename = "hXY", default)]
    pub hxy: BTreeMap<String, f64>,
}

impl ParameterOverrides {
    pub fn is_empty(&self) -> bool {
        self.hx.is_empty() && self.hxy.is_empty()
    }

    pub fn hx(mut self, element: impl Into<String>, value: f64) -> Self {
        self.hx.insert(element.into(), value);
        self
    }

    pub fn hxy(mut self, bond: impl Into<String>, value: f64) -> Self {
        self.hxy.insert(bond.into(), value);
        self
    }
}

impl HuckelParameters {
    /// Shallow merge: every override replaces or adds one entry.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> HuckelParameters {
        let mut merged = self.clone();
        merged
            .hx
            .extend(overrides.hx.iter().map(|(k, v)| (k.clone(), *v)));
        merged
            .hxy
            .extend(overrides.hxy.iter().map(|(k, v)| (k.clone(), *v)));
        merged
    }

    /// Diagonal correction for an atom contributing `pi_electrons` electrons.
    ///
    /// Adaptive elements ignore the `hX` map and read the fixed
    /// one-electron/two-electron constants; any count other than 1 uses the
    /// two-electron value.
    pub fn get_hx(&self, element: &str, pi_electrons: u8) -> f64 {
        if let Some((_, one, two)) = ADAPTIVE_HX.iter().find(|(el, _, _)| *el == element) {
            return if pi_electrons == 1 { *one } else { *two };
        }
        self.hx.get(element).copied().unwrap_or(0.0)
    }

    /// Off-diagonal correction for a bond between two π atoms.
    pub fn get_hxy(&self, element_a: &str, element_b: &str, pi_a: u8, pi_b: u8) -> f64 {
        let (first, second) = if element_a <= element_b {
            ((element_a, pi_a), (element_b, pi_b))
        } else {
            ((element_b, pi_b), (element_a, pi_a))
        };

        candidate_keys(first, second)
            .into_iter()
            .chain(candidate_keys(second, first))
            .find_map(|key| self.hxy.get(&key).copied())
            .unwrap_or(DEFAULT_HXY)
    }
}

/// Bond key for a pair, with the `2` marker on lone-pair donor sites.
pub fn bond_key(first: &str, first_donor: bool, second: &str, second_donor: bool) -> String {
    format!(
        "{}{}-{}{}",
        first,
        if first_donor { "2" } else { "" },
        second,
        if second_donor { "2" } else { "" }
    )
}

// Most specific key first so that `C-N2` wins over `C-N` for a donor nitrogen.
fn candidate_keys((a, pi_a): (&str, u8), (b, pi_b): (&str, u8)) -> Vec<String> {
    let a_donor = is_adaptive(a) && pi_a == 2;
    let b_donor = is_adaptive(b) && pi_b == 2;

    let mut keys = Vec::with_capacity(4);
    if a_donor && b_donor {
        keys.push(bond_key(a, true, b, true));
    }
    if a_donor {
        keys.push(bond_key(a, true, b, false));
    }
    if b_donor {
        keys.push(bond_key(a, false, b, true));
    }
    keys.push(bond_key(a, false, b, false));
    keys
}
