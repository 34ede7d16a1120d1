use serde::{Deserialize, Serialize};

/// Shape of the synthetic loss and accuracy curves.
///
/// ```text
/// loss(step)     = max(loss_floor, base_loss * exp(-step / loss_decay) + noise)
/// accuracy(step) = clamp(1 - exp(-step / accuracy_decay) + noise, 0, accuracy_ceiling)
/// ```
///
/// Noise is drawn uniformly from `[-amplitude, amplitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossCurve {
    /// Loss at step 0.
    pub base_loss: f64,
    /// Steps for the loss to decay by a factor of e.
    pub loss_decay: f64,
    /// Lowest reported loss.
    pub loss_floor: f64,
    /// Steps for the accuracy gap to shrink by a factor of e.
    pub accuracy_decay: f64,
    /// Highest reported accuracy.
    pub accuracy_ceiling: f64,
    /// Loss noise amplitude.
    pub loss_noise: f64,
    /// Accuracy noise amplitude.
    pub accuracy_noise: f64,
}

impl Default for LossCurve {
    fn default() -> Self {
        Self {
            base_loss: 2.5,
            loss_decay: 300.0,
            loss_floor: 0.1,
            accuracy_decay: 200.0,
            accuracy_ceiling: 0.99,
            loss_noise: 0.1,
            accuracy_noise: 0.05,
        }
    }
}

impl LossCurve {
    /// Returns the loss at `step` with `noise` added, clamped to the floor.
    #[must_use]
    pub fn loss_at(&self, step: u32, noise: f64) -> f64 {
        let decayed = self.base_loss * (-f64::from(step) / self.loss_decay).exp();
        (decayed + noise).max(self.loss_floor)
    }

    /// Returns the accuracy at `step` with `noise` added, clamped to
    /// `[0, accuracy_ceiling]`.
    #[must_use]
    pub fn accuracy_at(&self, step: u32, noise: f64) -> f64 {
        let learned = 1.0 - (-f64::from(step) / self.accuracy_decay).exp();
        (learned + noise).max(0.0).min(self.accuracy_ceiling)
    }
}
