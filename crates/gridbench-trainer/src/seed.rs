use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::TrainingConfig;

/// 32-byte seed for the noise of a training run.
///
/// Formats as 64 lowercase hex digits and parses from the same.
///
/// # Examples
///
/// ```
/// use gridbench_trainer::RunSeed;
///
/// let seed: RunSeed = "00".repeat(31).chars().chain("2a".chars()).collect::<String>().parse()?;
/// assert_eq!(seed.as_bytes()[31], 0x2a);
/// assert!(seed.to_string().ends_with("2a"));
/// # Ok::<(), gridbench_trainer::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunSeed([u8; 32]);

impl RunSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives a seed from the dataset and hyper-parameters of `config`.
    ///
    /// Identical configurations always derive the same seed.
    #[must_use]
    pub fn derive(config: &TrainingConfig) -> Self {
        let hyper = &config.hyper;
        let mut hasher = Sha256::new();
        hasher.update(config.dataset.to_string().as_bytes());
        for value in [
            hyper.hidden_size,
            hyper.h_layers,
            hyper.l_layers,
            hyper.batch_size,
            hyper.augmentation,
            config.target_steps,
            config.steps_per_tick,
        ] {
            hasher.update(value.to_le_bytes());
        }
        hasher.update(hyper.learning_rate.to_bits().to_le_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for RunSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`RunSeed`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The text is not 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// A character is not a hex digit.
    #[display("invalid hex digit {found:?} at index {index}")]
    InvalidDigit {
        /// Character index.
        index: usize,
        /// The offending character.
        found: char,
    },
}

impl FromStr for RunSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(ParseSeedError::InvalidLength { len });
        }

        let mut bytes = [0; 32];
        let mut nibbles = s.chars().enumerate().map(|(index, found)| {
            found
                .to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(ParseSeedError::InvalidDigit { index, found })
        });
        for byte in &mut bytes {
            let (Some(high), Some(low)) = (nibbles.next(), nibbles.next()) else {
                return Err(ParseSeedError::InvalidLength { len });
            };
            *byte = (high? << 4) | low?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for RunSeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::DatasetKind;

    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        let seed = RunSeed::from_bytes(std::array::from_fn(|i| u8::try_from(i * 7).unwrap()));
        let text = seed.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("00070e15"));
        assert_eq!(text.parse::<RunSeed>(), Ok(seed));
        assert_eq!(text.to_uppercase().parse::<RunSeed>(), Ok(seed));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<RunSeed>(),
            Err(ParseSeedError::InvalidLength { len: 3 })
        );
        let mut text = "0".repeat(64);
        text.replace_range(10..11, "g");
        assert_eq!(
            text.parse::<RunSeed>(),
            Err(ParseSeedError::InvalidDigit {
                index: 10,
                found: 'g'
            })
        );
    }

    #[test]
    fn test_derive_depends_on_config() {
        let config = TrainingConfig::default();
        assert_eq!(RunSeed::derive(&config), RunSeed::derive(&config));

        let maze = TrainingConfig {
            dataset: DatasetKind::Maze,
            ..config
        };
        assert_ne!(RunSeed::derive(&config), RunSeed::derive(&maze));

        let mut faster = config;
        faster.hyper.learning_rate = 3e-4;
        assert_ne!(RunSeed::derive(&config), RunSeed::derive(&faster));
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let seed = RunSeed::from_bytes([0xab; 32]);
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            format!("\"{}\"", "ab".repeat(32))
        );
    }
}
