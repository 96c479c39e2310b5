//! Tests for the cosmetic qubit register

use cosmos_core::quantum::{Gate, QuantumRegister, QubitState};
use cosmos_core::tests::test_helpers::approx_eq_f32;
use glam::{Mat2, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_register_is_even_superposition() {
    let register = QuantumRegister::new(3);
    for index in 0..3 {
        let p = register.probability_one(index).unwrap();
        assert!(approx_eq_f32(p, 0.5, 1e-5));
    }
    assert_eq!(register.probability_one(3), None);
}

#[test]
fn test_pauli_x_flips_basis_state() {
    let mut register = QuantumRegister::new(1);
    register.apply(0, Gate::Hadamard); // back to |0>
    assert!(approx_eq_f32(register.probability_one(0).unwrap(), 0.0, 1e-5));

    register.apply(0, Gate::PauliX);
    assert!(approx_eq_f32(register.probability_one(0).unwrap(), 1.0, 1e-5));
}

#[test]
fn test_collapse_freezes_qubit() {
    let mut register = QuantumRegister::new(2);
    let mut rng = StdRng::seed_from_u64(4);

    let outcome = register.collapse(0, &mut rng).expect("qubit 0 exists");
    assert_eq!(register.qubits[0], QubitState::Measured { outcome });

    for _ in 0..100 {
        register.tick(0.1);
        register.apply(0, Gate::PauliX);
    }

    assert_eq!(register.qubits[0], QubitState::Measured { outcome });
    let expected = if outcome { 1.0 } else { 0.0 };
    assert_eq!(register.probability_one(0), Some(expected));
    assert!(matches!(register.qubits[1], QubitState::Evolving { .. }));

    // measuring again keeps the first outcome
    assert_eq!(register.collapse(0, &mut rng), Some(outcome));
}

#[test]
fn test_collapse_of_certain_state_is_deterministic() {
    let mut register = QuantumRegister::new(1);
    register.apply(0, Gate::Hadamard);
    register.apply(0, Gate::PauliX);

    let mut rng = StdRng::seed_from_u64(123);
    assert_eq!(register.collapse(0, &mut rng), Some(true));
}

#[test]
fn test_collapse_unknown_index() {
    let mut register = QuantumRegister::new(1);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(register.collapse(5, &mut rng), None);
    assert!(!register.apply(5, Gate::PauliX));
}

#[test]
fn test_non_orthogonal_gate_keeps_probability_in_range() {
    let mut register = QuantumRegister::new(1);
    let stretch = Mat2::from_cols(Vec2::new(3.0, 0.5), Vec2::new(0.2, 0.1));

    for _ in 0..20 {
        register.apply(0, Gate::Custom(stretch));
        let p = register.probability_one(0).unwrap();
        assert!((0.0..=1.0).contains(&p), "probability {p}");
    }
}

#[test]
fn test_tick_evolves_probability() {
    let mut register = QuantumRegister::new(1);
    let before = register.probability_one(0).unwrap();
    register.tick(0.5);
    let after = register.probability_one(0).unwrap();
    assert!((before - after).abs() > 1e-3);
}

#[test]
fn test_reset_restores_superposition() {
    let mut register = QuantumRegister::new(2);
    let mut rng = StdRng::seed_from_u64(8);
    register.collapse(0, &mut rng);
    register.collapse(1, &mut rng);

    register.reset();

    assert_eq!(register.len(), 2);
    for index in 0..2 {
        assert!(approx_eq_f32(register.probability_one(index).unwrap(), 0.5, 1e-5));
    }
}
