use crate::config::Config;
use crate::structure::{bare_element, Molecule};
use color_eyre::eyre::{Result, WrapErr};
use periodic_table_on_an_enum::Element;
use tracing::{info, warn};

/// Build the drawn structure defined in the YAML configuration.
///
/// Unknown element symbols only warn: the parameter table may define them.
pub fn build_molecule(config: &Config) -> Result<Molecule> {
    info!("Preparing structure...");

    for atom in &config.molecule.atoms {
        let symbol = bare_element(&atom.label);
        if Element::from_symbol(&symbol).is_none() {
            warn!(
                "Atom {} has unknown element symbol '{}'; using table defaults",
                atom.id, symbol
            );
        }
    }

    let molecule = config
        .molecule
        .to_molecule()
        .wrap_err("Invalid structure in configuration file")?;

    info!(
        "Structure: {} atoms, {} bonds, {} custom numbers",
        config.molecule.atoms.len(),
        config.molecule.bonds.len(),
        config.molecule.numbering.len()
    );
    Ok(molecule)
}
