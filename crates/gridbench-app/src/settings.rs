use std::time::Duration;

use gridbench_puzzle::Domain;

/// Timing of a solve and its reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    /// Simulated computation time of the stand-in model.
    pub solve_delay: Duration,
    /// Pause before each revealed cell.
    pub reveal_interval: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self::for_domain(Domain::Constraint)
    }
}

impl PlaybackSettings {
    /// Returns the stock timing of a domain.
    ///
    /// The transform domain has a zero interval; its cells are still revealed
    /// one per update.
    #[must_use]
    pub const fn for_domain(domain: Domain) -> Self {
        let (delay_ms, interval_ms) = match domain {
            Domain::Constraint => (2000, 50),
            Domain::Transform => (3000, 0),
            Domain::Path => (2000, 100),
        };
        Self {
            solve_delay: Duration::from_millis(delay_ms),
            reveal_interval: Duration::from_millis(interval_ms),
        }
    }

    /// Multiplies both durations by `factor`.
    ///
    /// Negative, NaN or overflowing results collapse to zero.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor).unwrap_or(Duration::ZERO)
        };
        Self {
            solve_delay: scale(self.solve_delay),
            reveal_interval: scale(self.reveal_interval),
        }
    }
}
