use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LossCurve;

/// The dataset a run pretends to train on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Constraint (sudoku) puzzles.
    #[default]
    #[display("sudoku")]
    Sudoku,
    /// Pattern transformation (ARC) tasks.
    #[display("arc")]
    Arc,
    /// Maze route finding.
    #[display("maze")]
    Maze,
}

impl DatasetKind {
    /// All dataset kinds.
    pub const ALL: [Self; 3] = [Self::Sudoku, Self::Arc, Self::Maze];
}

/// Error returned when parsing an unknown dataset name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown dataset {name:?} (expected sudoku, arc or maze)")]
pub struct ParseDatasetKindError {
    name: String,
}

impl FromStr for DatasetKind {
    type Err = ParseDatasetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDatasetKindError { name: s.to_owned() })
    }
}

/// Model and optimiser settings shown alongside a run.
///
/// These values do not affect the simulated curve; they only feed the run
/// seed so that different settings produce different curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperParameters {
    /// Hidden dimension.
    pub hidden_size: u32,
    /// Number of high-level layers.
    pub h_layers: u32,
    /// Number of low-level layers.
    pub l_layers: u32,
    /// Optimiser learning rate.
    pub learning_rate: f64,
    /// Global batch size.
    pub batch_size: u32,
    /// Dataset augmentation factor.
    pub augmentation: u32,
}

impl Default for HyperParameters {
    fn default() -> Self {
        Self {
            hidden_size: 512,
            h_layers: 4,
            l_layers: 4,
            learning_rate: 1e-4,
            batch_size: 768,
            augmentation: 1000,
        }
    }
}

/// Configuration of a [`TrainingRun`](crate::TrainingRun).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Dataset being "trained" on.
    pub dataset: DatasetKind,
    /// Displayed hyper-parameters.
    pub hyper: HyperParameters,
    /// Step at which the run stops by itself.
    pub target_steps: u32,
    /// Steps added by each tick.
    pub steps_per_tick: u32,
    /// Curve shape.
    pub curve: LossCurve,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetKind::default(),
            hyper: HyperParameters::default(),
            target_steps: 1000,
            steps_per_tick: 10,
            curve: LossCurve::default(),
        }
    }
}

/// Reasons a [`TrainingConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainingConfigError {
    /// The target step count is zero.
    #[display("target step count must be positive")]
    ZeroTarget,
    /// Ticks would not advance the run.
    #[display("steps per tick must be positive")]
    ZeroIncrement,
    /// A decay constant is zero, negative or not finite.
    #[display("{name} must be positive, got {value}")]
    NonPositiveDecay {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A noise amplitude is negative or not finite.
    #[display("{name} must be a finite non-negative amplitude, got {value}")]
    InvalidNoise {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The loss floor or accuracy ceiling is outside its valid range.
    #[display("loss floor {loss_floor} must be >= 0 and accuracy ceiling {accuracy_ceiling} within [0, 1]")]
    InvalidBounds {
        /// Configured loss floor.
        loss_floor: f64,
        /// Configured accuracy ceiling.
        accuracy_ceiling: f64,
    },
}

impl TrainingConfig {
    /// Checks that the configuration describes a well-formed run.
    ///
    /// # Errors
    ///
    /// Returns the first [`TrainingConfigError`] found.
    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        if self.target_steps == 0 {
            return Err(TrainingConfigError::ZeroTarget);
        }
        if self.steps_per_tick == 0 {
            return Err(TrainingConfigError::ZeroIncrement);
        }

        let curve = &self.curve;
        for (name, value) in [
            ("loss_decay", curve.loss_decay),
            ("accuracy_decay", curve.accuracy_decay),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrainingConfigError::NonPositiveDecay { name, value });
            }
        }
        for (name, value) in [
            ("loss_noise", curve.loss_noise),
            ("accuracy_noise", curve.accuracy_noise),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TrainingConfigError::InvalidNoise { name, value });
            }
        }

        let floor_ok = curve.loss_floor.is_finite() && curve.loss_floor >= 0.0;
        let ceiling_ok = (0.0..=1.0).contains(&curve.accuracy_ceiling);
        if !(floor_ok && ceiling_ok && curve.base_loss.is_finite()) {
            return Err(TrainingConfigError::InvalidBounds {
                loss_floor: curve.loss_floor,
                accuracy_ceiling: curve.accuracy_ceiling,
            });
        }
        Ok(())
    }

    /// Returns the number of ticks a run from step 0 takes.
    #[must_use]
    pub fn total_ticks(&self) -> u32 {
        self.target_steps.div_ceil(self.steps_per_tick.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrainingConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_ticks(), 100);
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        let base = TrainingConfig::default();

        let config = TrainingConfig {
            target_steps: 0,
            ..base
        };
        assert_eq!(config.validate(), Err(TrainingConfigError::ZeroTarget));

        let config = TrainingConfig {
            steps_per_tick: 0,
            ..base
        };
        assert_eq!(config.validate(), Err(TrainingConfigError::ZeroIncrement));

        let mut config = base;
        config.curve.loss_decay = 0.0;
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::NonPositiveDecay {
                name: "loss_decay",
                ..
            })
        ));

        let mut config = base;
        config.curve.accuracy_noise = -0.1;
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::InvalidNoise {
                name: "accuracy_noise",
                ..
            })
        ));

        let mut config = base;
        config.curve.accuracy_ceiling = 1.5;
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_dataset_kind_parses_case_insensitively() {
        assert_eq!("ARC".parse::<DatasetKind>(), Ok(DatasetKind::Arc));
        assert_eq!("maze".parse::<DatasetKind>(), Ok(DatasetKind::Maze));
        assert!("chess".parse::<DatasetKind>().is_err());
        assert_eq!(DatasetKind::Sudoku.to_string(), "sudoku");
    }
}
