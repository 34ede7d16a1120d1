use std::time::Duration;

/// Static description of the impersonated model.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{architecture} ({parameters} parameters, {device}, {precision})")]
pub struct ModelCard {
    /// Architecture name.
    pub architecture: String,
    /// Human-readable parameter count.
    pub parameters: String,
    /// Execution device.
    pub device: String,
    /// Numeric precision.
    pub precision: String,
    /// Simulated time to load the weights.
    pub load_delay: Duration,
}

impl Default for ModelCard {
    fn default() -> Self {
        Self {
            architecture: "HRM-ACT-V1".to_owned(),
            parameters: "27M".to_owned(),
            device: "CPU".to_owned(),
            precision: "FP32".to_owned(),
            load_delay: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_card_display() {
        assert_eq!(
            ModelCard::default().to_string(),
            "HRM-ACT-V1 (27M parameters, CPU, FP32)"
        );
    }
}
