//! Cosmetic neural-network overlay
//!
//! Weights and input activations are pseudo-random; the "forward pass" only
//! exists so the animation looks plausible. There is no training.

use rand::Rng;

#[derive(Debug, Clone)]
pub struct NetworkView {
    /// activations[layer][neuron], all in [0, 1]
    pub activations: Vec<Vec<f32>>,
    /// weights[layer][to][from] between layer and layer + 1
    pub weights: Vec<Vec<Vec<f32>>>,
    pub refresh_interval: f32,
    /// Edge animation phase in [0, 1)
    pub pulse: f32,
    since_refresh: f32,
}

impl NetworkView {
    pub fn new<R: Rng + ?Sized>(layers: &[usize], refresh_interval: f32, rng: &mut R) -> Self {
        let weights: Vec<Vec<Vec<f32>>> = layers
            .windows(2)
            .map(|pair| {
                (0..pair[1])
                    .map(|_| (0..pair[0]).map(|_| rng.gen_range(-1.0..1.0)).collect())
                    .collect()
            })
            .collect();

        let mut view = Self {
            activations: layers.iter().map(|&n| vec![0.5; n]).collect(),
            weights,
            refresh_interval,
            pulse: 0.0,
            since_refresh: 0.0,
        };
        view.refresh(rng);
        view
    }

    pub fn layer_count(&self) -> usize {
        self.activations.len()
    }

    /// Advance the animation. Returns true when activations were redrawn.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.pulse = (self.pulse + dt).fract();
        self.since_refresh += dt;
        if self.since_refresh < self.refresh_interval {
            return false;
        }
        self.since_refresh = 0.0;
        self.refresh(rng);
        true
    }

    /// Draw new input activations and push them through the weights
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(inputs) = self.activations.first_mut() else {
            return;
        };
        for value in inputs.iter_mut() {
            *value = rng.gen_range(0.0..1.0);
        }

        for layer in 0..self.weights.len() {
            let next: Vec<f32> = self.weights[layer]
                .iter()
                .map(|row| {
                    let sum: f32 = row
                        .iter()
                        .zip(&self.activations[layer])
                        .map(|(w, a)| w * a)
                        .sum();
                    sigmoid(sum)
                })
                .collect();
            self.activations[layer + 1] = next;
        }
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
