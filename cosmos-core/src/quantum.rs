//! Cosmetic qubit register for the quantum-state overlay
//!
//! Nothing here is a faithful quantum simulation. Amplitudes are two real
//! numbers pushed through arbitrary 2x2 matrices, so their norm drifts
//! whenever a gate is not orthogonal. The displayed probability is taken
//! relative to the current norm, which keeps it inside [0, 1].

use glam::{Mat2, Vec2};
use rand::Rng;
use std::f32::consts::FRAC_1_SQRT_2;

/// Rotation applied per second to every evolving qubit
pub const EVOLUTION_RATE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QubitState {
    /// Amplitudes of |0> and |1>
    Evolving { amplitudes: Vec2 },
    /// Frozen after a collapse
    Measured { outcome: bool },
}

#[derive(Debug, Clone, Copy)]
pub enum Gate {
    Hadamard,
    PauliX,
    Rotation(f32),
    Custom(Mat2),
}

impl Gate {
    pub fn matrix(self) -> Mat2 {
        match self {
            Gate::Hadamard => Mat2::from_cols(
                Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
                Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            ),
            Gate::PauliX => Mat2::from_cols(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)),
            Gate::Rotation(theta) => Mat2::from_angle(theta),
            Gate::Custom(m) => m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuantumRegister {
    pub qubits: Vec<QubitState>,
}

impl QuantumRegister {
    /// `count` qubits, each put in an even superposition
    pub fn new(count: usize) -> Self {
        let mut register = Self {
            qubits: vec![ground(); count],
        };
        for index in 0..count {
            register.apply(index, Gate::Hadamard);
        }
        register
    }

    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Multiply a qubit's amplitudes by the gate matrix. Measured qubits
    /// ignore gates. Returns false for an out-of-range index.
    pub fn apply(&mut self, index: usize, gate: Gate) -> bool {
        match self.qubits.get_mut(index) {
            Some(QubitState::Evolving { amplitudes }) => {
                *amplitudes = gate.matrix() * *amplitudes;
                true
            }
            Some(QubitState::Measured { .. }) => true,
            None => false,
        }
    }

    /// Slowly rotate every evolving qubit
    pub fn tick(&mut self, dt: f32) {
        let gate = Gate::Rotation(EVOLUTION_RATE * dt);
        for index in 0..self.qubits.len() {
            self.apply(index, gate);
        }
    }

    /// Probability of reading 1, as displayed. Measured qubits report
    /// their outcome as 0 or 1.
    pub fn probability_one(&self, index: usize) -> Option<f32> {
        self.qubits.get(index).map(|state| match state {
            QubitState::Evolving { amplitudes } => {
                let norm = amplitudes.length_squared();
                if norm > 0.0 {
                    amplitudes.y * amplitudes.y / norm
                } else {
                    0.0
                }
            }
            QubitState::Measured { outcome } => f32::from(u8::from(*outcome)),
        })
    }

    /// Collapse a qubit from its displayed probability and freeze it.
    /// A qubit already measured keeps its outcome.
    pub fn collapse<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Option<bool> {
        let p = self.probability_one(index)?;
        let state = &mut self.qubits[index];
        let outcome = match *state {
            QubitState::Measured { outcome } => outcome,
            QubitState::Evolving { .. } => rng.gen::<f32>() < p,
        };
        *state = QubitState::Measured { outcome };
        Some(outcome)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.qubits.len());
    }
}

fn ground() -> QubitState {
    QubitState::Evolving {
        amplitudes: Vec2::X,
    }
}
