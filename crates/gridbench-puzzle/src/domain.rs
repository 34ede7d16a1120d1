use std::str::FromStr;

/// The puzzle family a grid belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum Domain {
    /// Digit filling (Sudoku-like).
    #[display("constraint")]
    Constraint,
    /// Pattern transformation over a colour palette (ARC-like).
    #[display("transform")]
    Transform,
    /// Start/goal pathfinding through a maze.
    #[display("path")]
    Path,
}

impl Domain {
    /// All domains, in display order.
    pub const ALL: [Self; 3] = [Self::Constraint, Self::Transform, Self::Path];
}

/// Error returned when parsing an unknown domain name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown domain {name:?} (expected constraint, transform or path)")]
pub struct ParseDomainError {
    name: String,
}

impl FromStr for Domain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDomainError { name: s.to_owned() })
    }
}
