use std::mem;

use gridbench_core::Grid;
use gridbench_model::{InferenceError, ModelCard};
use gridbench_puzzle::CellWrite;

use crate::{model_loader::ModelLoadError, session::SessionId};

/// Requests emitted by solve and reveal flows.
///
/// Every action names the session it belongs to; the workbench drops
/// actions for any session other than the current one.
#[derive(Debug)]
pub enum SessionAction<C> {
    InferenceFinished {
        id: SessionId,
        outcome: Result<Grid<C>, InferenceError>,
    },
    RevealCell {
        id: SessionId,
        write: CellWrite<C>,
    },
    RevealFinished {
        id: SessionId,
    },
}

impl<C> SessionAction<C> {
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::InferenceFinished { id, .. }
            | Self::RevealCell { id, .. }
            | Self::RevealFinished { id } => *id,
        }
    }
}

/// Requests emitted by the training ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingAction {
    /// One cadence tick of the ticker started as `generation`.
    Tick { generation: u64 },
}

/// Requests emitted by the model load flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAction {
    LoadFinished {
        outcome: Result<ModelCard, ModelLoadError>,
    },
}

/// FIFO buffer of actions drained from the flow executor.
#[derive(Debug)]
pub struct ActionRequestQueue<A> {
    actions: Vec<A>,
}

impl<A> Default for ActionRequestQueue<A> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<A> ActionRequestQueue<A> {
    pub fn request(&mut self, action: A) {
        self.actions.push(action);
    }

    pub fn take_all(&mut self) -> Vec<A> {
        mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use gridbench_core::Position;

    use super::{ActionRequestQueue, SessionAction};
    use crate::session::SessionId;

    #[test]
    fn take_all_returns_actions_in_order_and_clears_queue() {
        let mut queue = ActionRequestQueue::default();
        let id = SessionId::new(3);
        queue.request(SessionAction::RevealCell {
            id,
            write: gridbench_puzzle::CellWrite::new(Position::new(0, 1), 5u8),
        });
        queue.request(SessionAction::RevealFinished { id });

        let drained = queue.take_all();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], SessionAction::RevealCell { .. }));
        assert!(matches!(drained[1], SessionAction::RevealFinished { .. }));
        assert!(drained.iter().all(|a| a.session_id() == id));

        assert!(queue.take_all().is_empty());
    }
}
