// Main library file for Hückel π-electron calculations

pub mod app;
pub mod config;
pub mod error;
pub mod huckel_impl;
pub mod io;
pub mod params;
pub mod structure;

pub use error::{HuckelError, Result};
pub use huckel_impl::{HuckelCalculator, HuckelResult, PiAtom};
pub use params::{HuckelParameters, ParameterOverrides};
pub use structure::{
    AtomId, AtomView, BondType, BondView, Molecule, NumberingSource, StructureChange,
    StructureObserver, StructureSource,
};
