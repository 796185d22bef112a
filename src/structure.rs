//! Views over a drawn 2D structure
//!
//! The engine never talks to a structure editor directly. It reads atoms and
//! bonds through [`StructureSource`] and custom atom numbers through
//! [`NumberingSource`]. [`Molecule`] is the in-memory implementation used by
//! the command-line front end and by the tests.

use crate::error::{HuckelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Editor-assigned atom identifier.
pub type AtomId = usize;

/// Read-only view of one drawn atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomView {
    pub id: AtomId,
    pub x: f64,
    pub y: f64,
    /// Display label, e.g. `C`, `N` or `C12` when a number is baked in.
    pub label: String,
}

impl AtomView {
    pub fn new(id: AtomId, x: f64, y: f64, label: impl Into<String>) -> Self {
        AtomView {
            id,
            x,
            y,
            label: label.into(),
        }
    }

    pub fn has_valid_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn element(&self) -> String {
        bare_element(&self.label)
    }
}

/// Bond order as drawn in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BondType {
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

impl BondType {
    /// Double, triple and aromatic bonds all carry π density.
    pub fn is_multiple(self) -> bool {
        !matches!(self, BondType::Single)
    }
}

impl TryFrom<u8> for BondType {
    type Error = String;

    fn try_from(order: u8) -> std::result::Result<Self, Self::Error> {
        match order {
            1 => Ok(BondType::Single),
            2 => Ok(BondType::Double),
            3 => Ok(BondType::Triple),
            4 => Ok(BondType::Aromatic),
            other => Err(format!("unsupported bond order {} (expected 1-4)", other)),
        }
    }
}

impl From<BondType> for u8 {
    fn from(bond: BondType) -> u8 {
        bond as u8
    }
}

/// Read-only view of one drawn bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondView {
    pub begin: AtomId,
    pub end: AtomId,
    pub order: BondType,
}

impl BondView {
    pub fn new(begin: AtomId, end: AtomId, order: BondType) -> Self {
        BondView { begin, end, order }
    }

    pub fn touches(&self, atom: AtomId) -> bool {
        self.begin == atom || self.end == atom
    }
}

/// Anything that can hand out the atoms and bonds of the current drawing.
pub trait StructureSource {
    fn atoms(&self) -> Vec<AtomView>;
    fn bonds(&self) -> Vec<BondView>;
}

/// Optional store of user-chosen atom numbers, keyed by atom id.
pub trait NumberingSource {
    fn custom_number(&self, atom: AtomId) -> Option<String>;
}

impl NumberingSource for HashMap<AtomId, String> {
    fn custom_number(&self, atom: AtomId) -> Option<String> {
        self.get(&atom).cloned()
    }
}

/// Strip the numbering digits from a label, leaving the element symbol.
/// An empty result means an unlabelled vertex, which editors draw as carbon.
pub fn bare_element(label: &str) -> String {
    let symbol: String = label.chars().filter(|c| !c.is_ascii_digit()).collect();
    if symbol.is_empty() {
        "C".to_string()
    } else {
        symbol
    }
}

/// Trailing digits of a label such as `N12`, if any.
pub fn label_number(label: &str) -> Option<&str> {
    let stem = label.trim_end_matches(|c: char| c.is_ascii_digit());
    let suffix = &label[stem.len()..];
    if suffix.is_empty() {
        None
    } else {
        Some(suffix)
    }
}

/// What changed in a [`Molecule`].
#[derive(Debug, Clone, PartialEq)]
pub enum StructureChange {
    AtomAdded(AtomId),
    AtomRemoved(AtomId),
    BondAdded { begin: AtomId, end: AtomId },
    NumberingChanged,
    LabelsRewritten,
}

/// Subscriber notified after every mutation of a [`Molecule`].
pub trait StructureObserver {
    fn structure_changed(&mut self, change: &StructureChange);
}

impl<F: FnMut(&StructureChange)> StructureObserver for F {
    fn structure_changed(&mut self, change: &StructureChange) {
        self(change)
    }
}

/// In-memory molecule: atoms in drawing order, bonds, and a custom numbering store.
#[derive(Default)]
pub struct Molecule {
    atoms: Vec<AtomView>,
    bonds: Vec<BondView>,
    numbering: HashMap<AtomId, String>,
    observers: Vec<Box<dyn StructureObserver>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, id: AtomId, x: f64, y: f64, label: impl Into<String>) -> Result<()> {
        if self.atom(id).is_some() {
            return Err(HuckelError::InvalidStructure(format!(
                "duplicate atom id {}",
                id
            )));
        }
        self.atoms.push(AtomView::new(id, x, y, label));
        self.notify(StructureChange::AtomAdded(id));
        Ok(())
    }

    pub fn add_bond(&mut self, begin: AtomId, end: AtomId, order: BondType) -> Result<()> {
        if begin == end {
            return Err(HuckelError::InvalidStructure(format!(
                "bond from atom {} to itself",
                begin
            )));
        }
        for id in [begin, end] {
            if self.atom(id).is_none() {
                return Err(HuckelError::InvalidStructure(format!(
                    "bond {}-{} references unknown atom {}",
                    begin, end, id
                )));
            }
        }
        self.bonds.push(BondView::new(begin, end, order));
        self.notify(StructureChange::BondAdded { begin, end });
        Ok(())
    }

    /// Remove an atom together with its bonds and numbering entry.
    pub fn remove_atom(&mut self, id: AtomId) -> Option<AtomView> {
        let index = self.atoms.iter().position(|a| a.id == id)?;
        let atom = self.atoms.remove(index);
        self.bonds.retain(|b| !b.touches(id));
        self.numbering.remove(&id);
        self.notify(StructureChange::AtomRemoved(id));
        Some(atom)
    }

    pub fn atom(&self, id: AtomId) -> Option<&AtomView> {
        self.atoms.iter().find(|a| a.id == id)
    }

    pub fn set_custom_number(&mut self, id: AtomId, number: impl Into<String>) -> Result<()> {
        if self.atom(id).is_none() {
            return Err(HuckelError::InvalidStructure(format!(
                "cannot number unknown atom {}",
                id
            )));
        }
        self.numbering.insert(id, number.into());
        self.notify(StructureChange::NumberingChanged);
        Ok(())
    }

    pub fn clear_numbering(&mut self) {
        self.numbering.clear();
        self.notify(StructureChange::NumberingChanged);
    }

    pub fn numbering(&self) -> &HashMap<AtomId, String> {
        &self.numbering
    }

    /// Write the custom numbering back into the atom labels (`C` numbered
    /// `5` becomes `C5`). Atoms without a custom number keep their label.
    pub fn apply_numbering_to_labels(&mut self) {
        for atom in &mut self.atoms {
            if let Some(number) = self.numbering.get(&atom.id) {
                let label = format!("{}{}", bare_element(&atom.label), number);
                debug!("Relabelling atom {}: {} -> {}", atom.id, atom.label, label);
                atom.label = label;
            }
        }
        self.notify(StructureChange::LabelsRewritten);
    }

    pub fn subscribe(&mut self, observer: impl StructureObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: StructureChange) {
        for observer in &mut self.observers {
            observer.structure_changed(&change);
        }
    }
}

impl fmt::Debug for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Molecule")
            .field("atoms", &self.atoms)
            .field("bonds", &self.bonds)
            .field("numbering", &self.numbering)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl StructureSource for Molecule {
    fn atoms(&self) -> Vec<AtomView> {
        self.atoms.clone()
    }

    fn bonds(&self) -> Vec<BondView> {
        self.bonds.clone()
    }
}

impl NumberingSource for Molecule {
    fn custom_number(&self, atom: AtomId) -> Option<String> {
        self.numbering.custom_number(atom)
    }
}
