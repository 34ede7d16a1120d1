use std::{collections::VecDeque, num::NonZero};

use gridbench_puzzle::{CellEditPolicy, PuzzleInstance, PuzzleSnapshot};

/// Bounded undo/redo history of puzzle snapshots.
///
/// The entry under the cursor always mirrors the puzzle as currently shown.
/// Pushing after an undo discards the redo branch; pushing at capacity drops
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct History<C> {
    entries: VecDeque<PuzzleSnapshot<C>>,
    capacity: NonZero<usize>,
    cursor: usize,
}

impl<C: Clone> History<C> {
    #[must_use]
    pub fn new(capacity: NonZero<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> NonZero<usize> {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and records `puzzle` as the new base.
    pub fn reset<P>(&mut self, puzzle: &PuzzleInstance<P>)
    where
        P: CellEditPolicy<Cell = C>,
    {
        self.entries.clear();
        self.entries.push_back(puzzle.snapshot());
        self.cursor = 0;
    }

    pub fn push<P>(&mut self, puzzle: &PuzzleInstance<P>)
    where
        P: CellEditPolicy<Cell = C>,
    {
        let snapshot = puzzle.snapshot();
        if self.entries.is_empty() {
            self.entries.push_back(snapshot);
            self.cursor = 0;
            return;
        }

        self.entries.truncate(self.cursor + 1);
        if self.entries.len() == self.capacity.get() {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Restores the previous entry onto `puzzle`.
    ///
    /// Returns `false` if there is nothing to undo or the entry no longer
    /// fits the puzzle's extents; the cursor is left unchanged then.
    pub fn undo<P>(&mut self, puzzle: &mut PuzzleInstance<P>) -> bool
    where
        P: CellEditPolicy<Cell = C>,
    {
        if !self.can_undo() {
            return false;
        }
        self.move_to(self.cursor - 1, puzzle)
    }

    pub fn redo<P>(&mut self, puzzle: &mut PuzzleInstance<P>) -> bool
    where
        P: CellEditPolicy<Cell = C>,
    {
        if !self.can_redo() {
            return false;
        }
        self.move_to(self.cursor + 1, puzzle)
    }

    fn move_to<P>(&mut self, cursor: usize, puzzle: &mut PuzzleInstance<P>) -> bool
    where
        P: CellEditPolicy<Cell = C>,
    {
        let Some(snapshot) = self.entries.get(cursor).cloned() else {
            return false;
        };
        if let Err(err) = puzzle.restore(snapshot) {
            log::debug!("history entry {cursor} not restored: {err}");
            return false;
        }
        self.cursor = cursor;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use gridbench_core::Position;
    use gridbench_puzzle::{ConstraintPolicy, PuzzleInstance};

    use super::History;

    fn puzzle() -> PuzzleInstance<ConstraintPolicy> {
        PuzzleInstance::new(ConstraintPolicy::default(), 3, 3).unwrap()
    }

    fn tracked(capacity: usize) -> (PuzzleInstance<ConstraintPolicy>, History<u8>) {
        let puzzle = puzzle();
        let mut history = History::new(NonZero::new(capacity).unwrap());
        history.reset(&puzzle);
        (puzzle, history)
    }

    fn edit(
        puzzle: &mut PuzzleInstance<ConstraintPolicy>,
        history: &mut History<u8>,
        col: usize,
        digit: char,
    ) {
        puzzle.edit(Position::new(0, col), &digit).unwrap();
        history.push(puzzle);
    }

    #[test]
    fn undo_and_redo_restore_both_grids() {
        let (mut puzzle, mut history) = tracked(10);
        edit(&mut puzzle, &mut history, 0, '1');
        edit(&mut puzzle, &mut history, 1, '2');

        assert!(history.undo(&mut puzzle));
        assert_eq!(puzzle.working()[Position::new(0, 1)], 0);
        assert!(!puzzle.is_given(Position::new(0, 1)).unwrap());
        assert!(puzzle.is_given(Position::new(0, 0)).unwrap());

        assert!(history.undo(&mut puzzle));
        assert_eq!(puzzle.stats().filled, 0);
        assert!(!history.undo(&mut puzzle));

        assert!(history.redo(&mut puzzle));
        assert!(history.redo(&mut puzzle));
        assert_eq!(puzzle.stats().given, 2);
        assert!(!history.redo(&mut puzzle));
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let (mut puzzle, mut history) = tracked(10);
        edit(&mut puzzle, &mut history, 0, '1');
        edit(&mut puzzle, &mut history, 1, '2');
        assert!(history.undo(&mut puzzle));

        edit(&mut puzzle, &mut history, 2, '3');
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);

        assert!(history.undo(&mut puzzle));
        assert_eq!(puzzle.working()[Position::new(0, 0)], 1);
        assert_eq!(puzzle.working()[Position::new(0, 2)], 0);
    }

    #[test]
    fn capacity_drops_oldest_entry() {
        let (mut puzzle, mut history) = tracked(3);
        for (col, digit) in ['1', '2', '3'].into_iter().enumerate() {
            edit(&mut puzzle, &mut history, col, digit);
        }

        assert_eq!(history.len(), 3);
        assert!(history.undo(&mut puzzle));
        assert!(history.undo(&mut puzzle));
        assert!(!history.undo(&mut puzzle));
        // The empty base fell off; the oldest kept entry has one digit.
        assert_eq!(puzzle.stats().filled, 1);
    }

    #[test]
    fn reset_clears_history() {
        let (mut puzzle, mut history) = tracked(10);
        edit(&mut puzzle, &mut history, 0, '1');
        puzzle.reset();
        history.reset(&puzzle);

        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn mismatched_snapshot_is_not_restored() {
        let (mut puzzle, mut history) = tracked(10);
        edit(&mut puzzle, &mut history, 0, '1');

        let mut larger = PuzzleInstance::new(ConstraintPolicy::default(), 4, 4).unwrap();
        assert!(!history.undo(&mut larger));
        assert!(history.can_undo());
        assert_eq!(larger.stats().filled, 0);
    }
}
