use std::collections::VecDeque;

use gridbench_core::{Grid, Position};
use gridbench_puzzle::{Marker, MazeCell, PathMarkers};
use tinyvec::ArrayVec;

use crate::{InferenceError, StandInModel};

/// Stand-in maze model: breadth-first search from start to goal.
///
/// Walls block movement; open and trail cells are walkable. The result is
/// the submitted maze with any previous trail removed and the interior of a
/// shortest route marked as [`MazeCell::Trail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathFinder;

impl PathFinder {
    /// Finds a shortest 4-connected route between the markers of `maze`.
    ///
    /// The route includes both the start and the goal. Among routes of
    /// equal length, the one exploring up, left, right, down first wins.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingMarker`] if a marker is absent and
    /// [`InferenceError::NoRoute`] if the goal is unreachable.
    pub fn find_route(maze: &Grid<MazeCell>) -> Result<Vec<Position>, InferenceError> {
        let markers = PathMarkers::locate(maze);
        let start = markers.start.ok_or(InferenceError::MissingMarker {
            marker: Marker::Start,
        })?;
        let goal = markers.goal.ok_or(InferenceError::MissingMarker {
            marker: Marker::Goal,
        })?;

        let mut came_from = maze.map(None, |_| None);
        came_from.set(start, Some(start))?;
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            if pos == goal {
                let route = backtrack(&came_from, start, goal);
                log::debug!("route of {} cells from {start} to {goal}", route.len());
                return Ok(route);
            }
            for next in walkable_neighbors(maze, pos) {
                if came_from[next].is_none() {
                    came_from.set(next, Some(pos))?;
                    queue.push_back(next);
                }
            }
        }

        Err(InferenceError::NoRoute { start, goal })
    }
}

impl StandInModel<MazeCell> for PathFinder {
    fn name(&self) -> &str {
        "breadth-first path finder"
    }

    fn infer(&self, input: &Grid<MazeCell>) -> Result<Grid<MazeCell>, InferenceError> {
        let route = Self::find_route(input)?;
        let mut result = input.map(*input.default_value(), |cell| match cell {
            MazeCell::Trail => MazeCell::Open,
            other => *other,
        });
        let interior = route.len().saturating_sub(2);
        for &pos in route.iter().skip(1).take(interior) {
            result.set(pos, MazeCell::Trail)?;
        }
        Ok(result)
    }
}

fn walkable_neighbors(maze: &Grid<MazeCell>, pos: Position) -> ArrayVec<[Position; 4]> {
    maze.dims()
        .neighbors(pos)
        .filter(|p| maze[*p].is_walkable())
        .collect()
}

fn backtrack(came_from: &Grid<Option<Position>>, start: Position, goal: Position) -> Vec<Position> {
    let mut route = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(prev) = came_from[current] else {
            break;
        };
        route.push(prev);
        current = prev;
    }
    route.reverse();
    route
}
