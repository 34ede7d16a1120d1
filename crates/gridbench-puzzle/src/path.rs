use std::collections::HashSet;

use gridbench_core::{Grid, GridError, Position};

use crate::{CellEditPolicy, CellWrite, Domain, Prerequisite, PuzzleError, RevealOrder};

/// A maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum MazeCell {
    /// Walkable, unmarked cell.
    #[default]
    Open,
    /// Blocked cell.
    Wall,
    /// The route's start marker.
    Start,
    /// The route's goal marker.
    Goal,
    /// A cell on a revealed route.
    Trail,
}

impl MazeCell {
    /// Returns `true` if a route may pass through this cell.
    #[must_use]
    pub fn is_walkable(self) -> bool {
        !self.is_wall()
    }
}

/// The singleton markers of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Marker {
    /// Start marker.
    #[display("start")]
    Start,
    /// Goal marker.
    #[display("goal")]
    Goal,
}

impl Marker {
    fn cell(self) -> MazeCell {
        match self {
            Marker::Start => MazeCell::Start,
            Marker::Goal => MazeCell::Goal,
        }
    }
}

/// The editing tool applied by a maze click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum PathTool {
    /// Toggle a wall on or off. Placing a wall over a marker removes it.
    #[default]
    Wall,
    /// Place the start marker, removing any previous one.
    Start,
    /// Place the goal marker, removing any previous one.
    Goal,
}

/// Locations of the start and goal markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathMarkers {
    /// Start marker position, if placed.
    pub start: Option<Position>,
    /// Goal marker position, if placed.
    pub goal: Option<Position>,
}

impl PathMarkers {
    /// Finds the markers of `grid`.
    ///
    /// If a grid somehow holds several markers of a kind, the first in
    /// row-major order is reported.
    #[must_use]
    pub fn locate(grid: &Grid<MazeCell>) -> Self {
        Self {
            start: grid.position_where(|c| c.is_start()),
            goal: grid.position_where(|c| c.is_goal()),
        }
    }

    /// Returns both markers, or the first missing prerequisite.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MissingPrerequisite`] if either marker is absent.
    pub fn require(&self) -> Result<(Position, Position), PuzzleError> {
        let start = self.start.ok_or(PuzzleError::MissingPrerequisite {
            missing: Prerequisite::StartMarker,
        })?;
        let goal = self.goal.ok_or(PuzzleError::MissingPrerequisite {
            missing: Prerequisite::GoalMarker,
        })?;
        Ok((start, goal))
    }
}

/// Edit rules for mazes.
///
/// Walls and markers are clues; trail cells are derived and may be
/// overwritten by a later reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathPolicy;

impl PathPolicy {
    fn place_marker(
        grid: &Grid<MazeCell>,
        pos: Position,
        marker: Marker,
    ) -> Vec<CellWrite<MazeCell>> {
        let cell = marker.cell();
        if grid[pos] == cell {
            return Vec::new();
        }
        let mut writes: Vec<_> = grid
            .iter()
            .filter(|(_, c)| **c == cell)
            .map(|(p, _)| CellWrite::new(p, MazeCell::Open))
            .collect();
        writes.push(CellWrite::new(pos, cell));
        writes
    }
}

impl CellEditPolicy for PathPolicy {
    type Cell = MazeCell;
    type Input = PathTool;

    const DOMAIN: Domain = Domain::Path;

    fn empty_cell(&self) -> MazeCell {
        MazeCell::Open
    }

    fn is_clue(&self, cell: &MazeCell) -> bool {
        matches!(cell, MazeCell::Wall | MazeCell::Start | MazeCell::Goal)
    }

    fn plan_edit(
        &self,
        grid: &Grid<MazeCell>,
        pos: Position,
        input: &PathTool,
    ) -> Result<Vec<CellWrite<MazeCell>>, GridError> {
        let current = *grid.get(pos)?;
        let writes = match input {
            PathTool::Wall => {
                let next = if current.is_wall() {
                    MazeCell::Open
                } else {
                    MazeCell::Wall
                };
                vec![CellWrite::new(pos, next)]
            }
            PathTool::Start => Self::place_marker(grid, pos, Marker::Start),
            PathTool::Goal => Self::place_marker(grid, pos, Marker::Goal),
        };
        Ok(writes)
    }

    fn validate(&self, grid: &Grid<MazeCell>) -> Result<(), PuzzleError> {
        for marker in [Marker::Start, Marker::Goal] {
            let cell = marker.cell();
            let mut found = grid.iter().filter(|(_, c)| **c == cell).map(|(p, _)| p);
            if let (Some(first), Some(second)) = (found.next(), found.next()) {
                return Err(PuzzleError::DuplicateMarker {
                    marker,
                    first,
                    second,
                });
            }
        }
        Ok(())
    }

    fn check_ready(&self, grid: &Grid<MazeCell>) -> Result<(), PuzzleError> {
        PathMarkers::locate(grid).require().map(|_| ())
    }

    /// Walks the trail of `result` from the start marker towards the goal.
    ///
    /// Trail cells that cannot be reached by following adjacent trail cells
    /// from the start are left to the row-major remainder.
    fn reveal_order(&self, result: &Grid<MazeCell>) -> RevealOrder {
        let Some(start) = PathMarkers::locate(result).start else {
            return RevealOrder::RowMajor;
        };

        let mut order = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut current = start;
        loop {
            let next = result
                .dims()
                .neighbors(current)
                .find(|p| result[*p].is_trail() && !visited.contains(p));
            let Some(next) = next else {
                break;
            };
            visited.insert(next);
            order.push(next);
            current = next;
        }
        RevealOrder::Explicit(order)
    }

    fn glyph(&self, cell: &MazeCell) -> char {
        match cell {
            MazeCell::Open => '.',
            MazeCell::Wall => '#',
            MazeCell::Start => 'S',
            MazeCell::Goal => 'G',
            MazeCell::Trail => 'o',
        }
    }

    fn parse_glyph(&self, glyph: char) -> Option<MazeCell> {
        match glyph {
            '.' | ' ' => Some(MazeCell::Open),
            '#' => Some(MazeCell::Wall),
            'S' => Some(MazeCell::Start),
            'G' => Some(MazeCell::Goal),
            'o' => Some(MazeCell::Trail),
            _ => None,
        }
    }
}
