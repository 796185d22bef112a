//! π-system detection over a drawn structure

use crate::params::is_adaptive;
use crate::structure::{label_number, AtomId, AtomView, BondType, BondView, NumberingSource};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Atom taking part in the conjugated π system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiAtom {
    pub id: AtomId,
    /// Bare element symbol, numbering digits removed.
    pub element: String,
    /// Electrons this atom contributes to the π system (1 or 2).
    pub pi_electrons: u8,
    /// Number shown to the user; also fixes the matrix row of the atom.
    pub user_number: String,
}

impl PiAtom {
    /// `C1`, `N5`, ...
    pub fn display_label(&self) -> String {
        format!("{}{}", self.element, self.user_number)
    }
}

/// Label the π atoms of a structure, sorted by user number.
///
/// Atoms without a finite 2D position are skipped and do not consume a
/// positional number. An empty result is not an error here.
pub fn detect_pi_atoms(
    atoms: &[AtomView],
    bonds: &[BondView],
    numbering: Option<&dyn NumberingSource>,
) -> Vec<PiAtom> {
    let mut pi_atoms = Vec::new();

    for (position, atom) in atoms
        .iter()
        .filter(|atom| atom.has_valid_position())
        .enumerate()
    {
        let element = atom.element();
        let user_number = user_number(atom, position, numbering);
        let atom_bonds: Vec<&BondView> = bonds.iter().filter(|b| b.touches(atom.id)).collect();

        if !is_in_pi_system(&element, &atom_bonds) {
            debug!(
                "Atom {}{} (id {}): not in π system",
                element, user_number, atom.id
            );
            continue;
        }

        let pi_electrons = pi_electron_count(&element, &atom_bonds);
        debug!(
            "Atom {}{} (id {}): {} π electron(s)",
            element, user_number, atom.id, pi_electrons
        );
        pi_atoms.push(PiAtom {
            id: atom.id,
            element,
            pi_electrons,
            user_number,
        });
    }

    pi_atoms.sort_by(|a, b| compare_user_numbers(&a.user_number, &b.user_number));
    pi_atoms
}

/// Custom number, else digits baked into the label, else drawing position + 1.
fn user_number(atom: &AtomView, position: usize, numbering: Option<&dyn NumberingSource>) -> String {
    numbering
        .and_then(|store| store.custom_number(atom.id))
        .or_else(|| label_number(&atom.label).map(str::to_string))
        .unwrap_or_else(|| (position + 1).to_string())
}

/// Multiple-bonded atoms, plus N/O/S/P lone-pair donors with at most three bonds.
pub fn is_in_pi_system(element: &str, bonds: &[&BondView]) -> bool {
    let has_multiple_bond = bonds.iter().any(|b| b.order.is_multiple());
    has_multiple_bond || (is_adaptive(element) && bonds.len() <= 3)
}

pub fn pi_electron_count(element: &str, bonds: &[&BondView]) -> u8 {
    let has = |order: BondType| bonds.iter().any(|b| b.order == order);
    let has_double_or_aromatic = has(BondType::Double) || has(BondType::Aromatic);

    match element {
        "C" => 1,
        "N" if has(BondType::Triple) => 2,
        "N" if has_double_or_aromatic => 1,
        "N" => 2,
        "O" | "S" | "P" if has_double_or_aromatic => 1,
        "O" | "S" | "P" => 2,
        _ => 1,
    }
}

/// Integers compare numerically and sort before anything else; the rest
/// compare as strings.
pub fn compare_user_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
