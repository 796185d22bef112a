//! Tests for the Hückel pipeline

use super::*;
use crate::error::HuckelError;
use crate::params::ParameterOverrides;
use crate::structure::{BondType, Molecule, StructureSource};
use nalgebra::DMatrix;
use std::collections::HashMap;

const TOL: f64 = 1e-10;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn chain(labels: &[&str], bonds: &[(usize, usize, BondType)]) -> Molecule {
    let mut mol = Molecule::new();
    for (i, label) in labels.iter().enumerate() {
        mol.add_atom(i + 1, i as f64 * 1.4, 0.0, *label).unwrap();
    }
    for &(a, b, order) in bonds {
        mol.add_bond(a, b, order).unwrap();
    }
    mol
}

fn ethylene() -> Molecule {
    chain(&["C", "C"], &[(1, 2, BondType::Double)])
}

fn butadiene() -> Molecule {
    chain(
        &["C", "C", "C", "C"],
        &[
            (1, 2, BondType::Double),
            (2, 3, BondType::Single),
            (3, 4, BondType::Double),
        ],
    )
}

fn ring(labels: &[&str], orders: &[BondType]) -> Molecule {
    let n = labels.len();
    let bonds: Vec<(usize, usize, BondType)> = (0..n)
        .map(|i| (i + 1, (i + 1) % n + 1, orders[i]))
        .collect();
    chain(labels, &bonds)
}

fn benzene() -> Molecule {
    ring(&["C"; 6], &[BondType::Aromatic; 6])
}

/// N1, C2=C3, C4=C5; the nitrogen only has single bonds.
fn pyrrole() -> Molecule {
    ring(
        &["N", "C", "C", "C", "C"],
        &[
            BondType::Single,
            BondType::Double,
            BondType::Single,
            BondType::Double,
            BondType::Single,
        ],
    )
}

fn pyridine() -> Molecule {
    ring(&["N", "C", "C", "C", "C", "C"], &[BondType::Aromatic; 6])
}

fn allyl() -> Molecule {
    chain(
        &["C", "C", "C"],
        &[(1, 2, BondType::Aromatic), (2, 3, BondType::Aromatic)],
    )
}

fn hamiltonian_of(mol: &Molecule) -> DMatrix<f64> {
    let calc = HuckelCalculator::new(mol);
    let pi_atoms = calc.detect_pi_atoms().unwrap();
    build_hamiltonian(&pi_atoms, &mol.bonds(), calc.current_parameters())
}

// === Detection ===

#[test]
fn test_ethylene_detection() {
    let mol = ethylene();
    let pi_atoms = HuckelCalculator::new(&mol).detect_pi_atoms().unwrap();

    assert_eq!(pi_atoms.len(), 2);
    for (atom, number) in pi_atoms.iter().zip(["1", "2"]) {
        assert_eq!(atom.element, "C");
        assert_eq!(atom.pi_electrons, 1);
        assert_eq!(atom.user_number, number);
    }
}

#[test]
fn test_saturated_chain_has_no_pi_system() {
    let mol = chain(
        &["C", "C", "C"],
        &[(1, 2, BondType::Single), (2, 3, BondType::Single)],
    );
    let calc = HuckelCalculator::new(&mol);

    assert!(calc.detect_pi_atoms().unwrap().is_empty());
    assert_eq!(calc.calculate(0).unwrap_err(), HuckelError::NoConjugatedSystem);
}

#[test]
fn test_detached_calculator_reports_missing_editor() {
    let calc = HuckelCalculator::detached();
    assert_eq!(calc.calculate(0).unwrap_err(), HuckelError::MissingEditorState);
    assert_eq!(calc.detect_pi_atoms().unwrap_err(), HuckelError::MissingEditorState);
}

#[test]
fn test_attach_after_construction() {
    let mol = ethylene();
    let mut calc = HuckelCalculator::detached();
    calc.attach(&mol);
    assert_eq!(calc.calculate(0).unwrap().n_orbitals(), 2);
}

#[test]
fn test_heteroatom_electron_counts() {
    // H3C-C≡N
    let nitrile = chain(
        &["C", "C", "N"],
        &[(1, 2, BondType::Single), (2, 3, BondType::Triple)],
    );
    let atoms = HuckelCalculator::new(&nitrile).detect_pi_atoms().unwrap();
    let counts: Vec<(usize, u8)> = atoms.iter().map(|a| (a.id, a.pi_electrons)).collect();
    assert_eq!(counts, vec![(2, 1), (3, 2)]);

    // H2C=O
    let carbonyl = chain(&["C", "O"], &[(1, 2, BondType::Double)]);
    let atoms = HuckelCalculator::new(&carbonyl).detect_pi_atoms().unwrap();
    assert_eq!(atoms[1].element, "O");
    assert_eq!(atoms[1].pi_electrons, 1);

    // vinyl alcohol: C=C-O, the oxygen donates its lone pair
    let enol = chain(
        &["C", "C", "O"],
        &[(1, 2, BondType::Double), (2, 3, BondType::Single)],
    );
    let atoms = HuckelCalculator::new(&enol).detect_pi_atoms().unwrap();
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms[2].pi_electrons, 2);

    // vinyl chloride: the halogen has only a single bond and stays out
    let vinyl_chloride = chain(
        &["C", "C", "Cl"],
        &[(1, 2, BondType::Double), (2, 3, BondType::Single)],
    );
    let atoms = HuckelCalculator::new(&vinyl_chloride).detect_pi_atoms().unwrap();
    assert_eq!(atoms.len(), 2);
    assert!(atoms.iter().all(|a| a.element == "C"));
}

#[test]
fn test_tetravalent_nitrogen_is_excluded() {
    let mut mol = chain(&["N", "C", "C", "C", "C"], &[]);
    for id in 2..=5 {
        mol.add_bond(1, id, BondType::Single).unwrap();
    }
    assert!(HuckelCalculator::new(&mol).detect_pi_atoms().unwrap().is_empty());
}

#[test]
fn test_pyrrole_vs_pyridine_nitrogen() {
    let pyrrole = pyrrole();
    let atoms = HuckelCalculator::new(&pyrrole).detect_pi_atoms().unwrap();
    assert_eq!(atoms.len(), 5);
    assert_eq!(atoms[0].element, "N");
    assert_eq!(atoms[0].pi_electrons, 2);
    assert_eq!(atoms.iter().map(|a| a.pi_electrons as i32).sum::<i32>(), 6);

    let pyridine = pyridine();
    let atoms = HuckelCalculator::new(&pyridine).detect_pi_atoms().unwrap();
    assert_eq!(atoms[0].element, "N");
    assert_eq!(atoms[0].pi_electrons, 1);
}

#[test]
fn test_custom_numbering_overrides_order() {
    let mut mol = butadiene();
    mol.set_custom_number(1, "5").unwrap();

    let calc = HuckelCalculator::new(&mol).with_numbering(&mol);
    let atoms = calc.detect_pi_atoms().unwrap();

    let ids: Vec<usize> = atoms.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 3, 4, 1]);
    assert_eq!(atoms[3].user_number, "5");
}

#[test]
fn test_numbering_map_as_store() {
    let mol = butadiene();
    let store: HashMap<usize, String> = [(4, "0".to_string())].into_iter().collect();
    let atoms = HuckelCalculator::new(&mol)
        .with_numbering(&store)
        .detect_pi_atoms()
        .unwrap();
    assert_eq!(atoms[0].id, 4);
    assert_eq!(atoms[0].user_number, "0");
}

#[test]
fn test_label_numbers_sort_numerically() {
    let mol = chain(&["C12", "C3"], &[(1, 2, BondType::Double)]);
    let atoms = HuckelCalculator::new(&mol).detect_pi_atoms().unwrap();

    assert_eq!(atoms[0].user_number, "3");
    assert_eq!(atoms[1].user_number, "12");
    assert_eq!(atoms[1].element, "C");
    assert_eq!(atoms[1].display_label(), "C12");
}

#[test]
fn test_atoms_without_position_are_skipped() {
    let mut mol = Molecule::new();
    mol.add_atom(1, f64::NAN, 0.0, "C").unwrap();
    mol.add_atom(2, 0.0, 0.0, "C").unwrap();
    mol.add_atom(3, 1.4, 0.0, "C").unwrap();
    mol.add_bond(1, 2, BondType::Double).unwrap();
    mol.add_bond(2, 3, BondType::Double).unwrap();

    let atoms = HuckelCalculator::new(&mol).detect_pi_atoms().unwrap();
    let numbered: Vec<(usize, &str)> = atoms.iter().map(|a| (a.id, a.user_number.as_str())).collect();
    assert_eq!(numbered, vec![(2, "1"), (3, "2")]);
}

#[test]
fn test_compare_user_numbers_is_total() {
    use std::cmp::Ordering;
    assert_eq!(compare_user_numbers("9", "10"), Ordering::Less);
    assert_eq!(compare_user_numbers("10", "1a"), Ordering::Less);
    assert_eq!(compare_user_numbers("1a", "9"), Ordering::Greater);
    assert_eq!(compare_user_numbers("a", "b"), Ordering::Less);
}

// === Hamiltonian ===

#[test]
fn test_ethylene_hamiltonian() {
    let h = hamiltonian_of(&ethylene());
    assert_eq!(h, DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]));
}

#[test]
fn test_hamiltonian_is_symmetric() {
    for mol in [benzene(), pyrrole(), pyridine(), butadiene()] {
        let h = hamiltonian_of(&mol);
        assert_eq!(h, h.transpose());
    }
}

#[test]
fn test_non_bonded_pairs_are_zero() {
    let h = hamiltonian_of(&butadiene());
    assert_eq!(h[(0, 2)], 0.0);
    assert_eq!(h[(0, 3)], 0.0);
    assert_eq!(h[(1, 3)], 0.0);
    assert_eq!(h[(1, 2)], 1.0);
}

#[test]
fn test_adaptive_nitrogen_bond_constant() {
    let h = hamiltonian_of(&pyrrole());
    assert_eq!(h[(0, 0)], 1.37);
    assert_eq!(h[(0, 1)], 0.89);
    assert_eq!(h[(0, 4)], 0.89);

    let h = hamiltonian_of(&pyridine());
    assert_eq!(h[(0, 0)], 0.51);
    assert_eq!(h[(0, 1)], 1.02);
    assert_eq!(h[(0, 5)], 1.02);
}

#[test]
fn test_bonds_to_non_pi_atoms_are_ignored() {
    let mol = chain(
        &["C", "C", "C"],
        &[(1, 2, BondType::Double), (2, 3, BondType::Single)],
    );
    let calc = HuckelCalculator::new(&mol);
    let atoms = calc.detect_pi_atoms().unwrap();
    assert_eq!(atoms.len(), 2);
    assert_eq!(pi_bonds(&atoms, &mol.bonds()), vec![(0, 1)]);
}

// === Eigensolver ===

#[test]
fn test_diagonalize_rejects_asymmetric_matrix() {
    let h = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.5, 0.0]);
    assert!(matches!(
        diagonalize(&h),
        Err(HuckelError::DiagonalizationFailure { .. })
    ));
    assert!(diagonalize(&DMatrix::zeros(0, 0)).is_err());
}

#[test]
fn test_eigenpairs_satisfy_eigen_equation() {
    let h = hamiltonian_of(&pyrrole());
    let eig = diagonalize(&h).unwrap();

    for k in 0..h.nrows() {
        let v = eig.eigenvectors.column(k);
        assert_close(v.norm(), 1.0, 1e-10);
        let residual = &h * v - v * eig.eigenvalues[k];
        assert!(residual.norm() < 1e-9);
    }
}

#[test]
fn test_closed_form_matches_solver() {
    let h = DMatrix::from_row_slice(2, 2, &[0.51, 1.02, 1.02, 0.0]);
    let closed = closed_form_2x2(&h);
    let general = diagonalize(&h).unwrap();

    let mut expected: Vec<f64> = general.eigenvalues.iter().copied().collect();
    expected.sort_by(|a, b| b.total_cmp(a));
    assert_close(closed.eigenvalues[0], expected[0], 1e-12);
    assert_close(closed.eigenvalues[1], expected[1], 1e-12);

    for k in 0..2 {
        let v = closed.eigenvectors.column(k);
        let residual = &h * v - v * closed.eigenvalues[k];
        assert!(residual.norm() < 1e-12);
    }
}

#[test]
fn test_closed_form_diagonal_matrix() {
    let h = DMatrix::from_row_slice(2, 2, &[-0.5, 0.0, 0.0, 2.0]);
    let eig = closed_form_2x2(&h);
    assert_eq!(eig.eigenvalues.as_slice(), &[2.0, -0.5]);
    assert_eq!(eig.eigenvectors[(1, 0)], 1.0);
    assert_eq!(eig.eigenvectors[(0, 1)], 1.0);
}

#[test]
fn test_single_atom_system() {
    let eig = diagonalize(&DMatrix::from_element(1, 1, 0.97)).unwrap();
    assert_eq!(eig.eigenvalues[0], 0.97);
    assert_eq!(eig.eigenvectors[(0, 0)], 1.0);
}

// === Population ===

#[test]
fn test_aufbau_fill() {
    assert_eq!(aufbau_fill(3, 3), vec![2, 1, 0]);
    assert_eq!(aufbau_fill(3, 4), vec![2, 2, 0]);
    assert_eq!(aufbau_fill(3, 0), vec![0, 0, 0]);
    assert_eq!(aufbau_fill(3, -1), vec![0, 0, 0]);
    assert_eq!(aufbau_fill(2, 7), vec![2, 2]);
}

#[test]
fn test_energy_expressions() {
    assert_eq!(energy_expression(0.0004), "α");
    assert_eq!(energy_expression(1.0), "α + β");
    assert_eq!(energy_expression(-1.0), "α - β");
    assert_eq!(energy_expression(2.0), "α + 2β");
    assert_eq!(energy_expression(1.618034), "α + 1.618β");
    assert_eq!(energy_expression(-0.618034), "α - 0.618β");
    assert_eq!(energy_expression(2.0 - 1e-12), "α + 2β");
}

// === Full calculations ===

#[test]
fn test_ethylene_calculation() {
    let mol = ethylene();
    let result = HuckelCalculator::new(&mol).calculate(0).unwrap();

    assert_close(result.energies[0], 1.0, TOL);
    assert_close(result.energies[1], -1.0, TOL);
    assert_eq!(result.occupations, vec![2, 0]);
    assert_eq!(result.total_pi_electrons, 2);
    assert_close(result.total_energy, 2.0, TOL);
    assert_eq!(result.energy_expressions, vec!["α + β", "α - β"]);

    let s = 1.0 / 2f64.sqrt();
    for c in &result.coefficients[0] {
        assert_close(c.abs(), s, 1e-10);
    }
    // bonding orbital: both coefficients share a sign
    assert!(result.coefficients[0][0] * result.coefficients[0][1] > 0.0);
    assert!(result.coefficients[1][0] * result.coefficients[1][1] < 0.0);
}

#[test]
fn test_charged_ethylene() {
    let mol = ethylene();
    let result = HuckelCalculator::new(&mol).calculate(1).unwrap();

    assert_eq!(result.total_pi_electrons, 1);
    assert_eq!(result.occupations, vec![1, 0]);
    assert_close(result.total_energy, 1.0, TOL);
}

#[test]
fn test_out_of_range_charge_is_an_error() {
    let mol = ethylene();
    let calc = HuckelCalculator::new(&mol);

    assert_eq!(
        calc.calculate(i32::MIN).unwrap_err(),
        HuckelError::InvalidCharge {
            charge: i32::MIN,
            electrons: 2
        }
    );
    // large but representable charges still run
    assert!(calc.calculate(i32::MAX).is_ok());
}

#[test]
fn test_benzene_levels() {
    let mol = benzene();
    let result = HuckelCalculator::new(&mol).calculate(0).unwrap();

    let expected = [2.0, 1.0, 1.0, -1.0, -1.0, -2.0];
    for (e, x) in result.energies.iter().zip(expected) {
        assert_close(*e, x, 1e-9);
    }
    assert_eq!(result.occupations, vec![2, 2, 2, 0, 0, 0]);
    assert_close(result.total_energy, 8.0, 1e-9);
    assert_eq!(result.homo(), Some(2));
    assert_eq!(result.lumo(), Some(3));
    assert_close(result.homo_lumo_gap().unwrap(), 2.0, 1e-9);
}

#[test]
fn test_benzene_density_properties() {
    let mol = benzene();
    let result = HuckelCalculator::new(&mol).calculate(0).unwrap();
    let p = result.density_matrix();

    assert_close(p.trace(), 6.0, 1e-9);
    for charge in result.atom_charges() {
        assert_close(charge, 0.0, 1e-9);
    }
    let orders = result.bond_orders();
    assert_eq!(orders.len(), 6);
    for (_, _, order) in orders {
        assert_close(order, 2.0 / 3.0, 1e-9);
    }
}

#[test]
fn test_butadiene_energy() {
    let mol = butadiene();
    let result = HuckelCalculator::new(&mol).calculate(0).unwrap();
    let golden = (1.0 + 5f64.sqrt()) / 2.0;

    assert_close(result.energies[0], golden, 1e-9);
    assert_close(result.energies[1], golden - 1.0, 1e-9);
    assert_close(result.total_energy, 2.0 * (2.0 * golden - 1.0), 1e-9);
    assert_eq!(result.energy_expressions[0], "α + 1.618β");
    assert_eq!(result.energy_expressions[3], "α - 1.618β");
}

#[test]
fn test_allyl_radical_and_cation() {
    let mol = allyl();
    let calc = HuckelCalculator::new(&mol);

    let radical = calc.calculate(0).unwrap();
    assert_eq!(radical.occupations, vec![2, 1, 0]);
    assert_eq!(radical.energy_expressions, vec!["α + 1.414β", "α", "α - 1.414β"]);
    assert_close(radical.total_energy, 2.0 * 2f64.sqrt(), 1e-9);

    let cation = calc.calculate(1).unwrap();
    assert_eq!(cation.occupations, vec![2, 0, 0]);
    assert_eq!(cation.homo(), Some(0));
}

#[test]
fn test_electron_conservation_over_charges() {
    let mol = benzene();
    let calc = HuckelCalculator::new(&mol);

    for charge in -6..=6 {
        let result = calc.calculate(charge).unwrap();
        let electrons = result.total_pi_electrons;
        let occupied: i32 = result.occupations.iter().map(|&o| o as i32).sum();
        assert_eq!(occupied, electrons);

        let singles = result.occupations.iter().filter(|&&o| o == 1).count();
        assert_eq!(singles, (electrons % 2) as usize);

        // 2s, then at most one 1, then 0s
        assert!(result.occupations.windows(2).all(|w| w[0] >= w[1]));
        assert!(result.energies.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_results_are_reproducible() {
    let mol = pyridine();
    let calc = HuckelCalculator::new(&mol);
    let first = calc.calculate(0).unwrap();
    let second = calc.calculate(0).unwrap();

    assert_eq!(first.energies, second.energies);
    assert_eq!(first.coefficients, second.coefficients);
}

#[test]
fn test_orbitals_are_normalized() {
    let mol = pyrrole();
    let result = HuckelCalculator::new(&mol).calculate(0).unwrap();
    for orbital in &result.coefficients {
        let norm: f64 = orbital.iter().map(|c| c * c).sum();
        assert_close(norm, 1.0, 1e-10);
    }
}

// === Parameters ===

#[test]
fn test_update_parameters_round_trip() {
    let mol = ethylene();
    let mut calc = HuckelCalculator::new(&mol);
    let before = calc.current_parameters().clone();

    calc.update_parameters(&ParameterOverrides::default().hx("Se", 0.8));

    let after = calc.current_parameters();
    assert_eq!(after.hx["Se"], 0.8);
    assert_eq!(after.hxy, before.hxy);
    for (element, value) in &before.hx {
        assert_eq!(after.hx[element], *value);
    }
}

#[test]
fn test_updated_parameters_apply_on_next_calculation() {
    let mol = ethylene();
    let mut calc = HuckelCalculator::new(&mol);
    calc.update_parameters(&ParameterOverrides::default().hxy("C-C", 2.0));

    let result = calc.calculate(0).unwrap();
    assert_close(result.energies[0], 2.0, TOL);
    assert_eq!(result.parameters.hxy["C-C"], 2.0);

    calc.reset_parameters();
    let result = calc.calculate(0).unwrap();
    assert_close(result.energies[0], 1.0, TOL);
}

#[test]
fn test_adaptive_hx_ignores_generic_override() {
    let mol = pyridine();
    let mut calc = HuckelCalculator::new(&mol);
    calc.update_parameters(&ParameterOverrides::default().hx("N", 5.0));

    assert_eq!(calc.current_parameters().get_hx("N", 1), 0.51);
    assert_eq!(calc.current_parameters().get_hx("N", 2), 1.37);
    let result = calc.calculate(0).unwrap();
    assert_eq!(result.hamiltonian[(0, 0)], 0.51);
}
