//! Simulated model weight loading.

use std::rc::Rc;

use gridbench_model::ModelCard;

use crate::{
    action::{ActionRequestQueue, ModelAction},
    clock::Clock,
    flow::{FlowExecutor, tasks},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelLoadError {
    #[display("model card has an empty {field}")]
    EmptyField { field: &'static str },
}

/// Load status as shown next to the solve controls.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ModelStatus {
    Idle,
    Loading,
    Ready(ModelCard),
    Error(ModelLoadError),
}

/// Checks that every descriptive field of `card` is filled in.
pub fn validate_card(card: &ModelCard) -> Result<(), ModelLoadError> {
    let fields = [
        ("architecture", &card.architecture),
        ("parameter count", &card.parameters),
        ("device", &card.device),
        ("precision", &card.precision),
    ];
    match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ModelLoadError::EmptyField { field }),
        None => Ok(()),
    }
}

/// Drives [`ModelStatus`] through `Idle -> Loading -> Ready | Error`.
///
/// Solving never waits on the loader; the status is informational.
#[derive(Debug)]
pub struct ModelLoader {
    status: ModelStatus,
    executor: FlowExecutor<ModelAction>,
    queue: ActionRequestQueue<ModelAction>,
}

impl ModelLoader {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            status: ModelStatus::Idle,
            executor: FlowExecutor::new(clock),
            queue: ActionRequestQueue::default(),
        }
    }

    #[must_use]
    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    /// Starts loading `card`. Ignored while a load is already in flight.
    ///
    /// Returns `true` if a load was started.
    pub fn load(&mut self, card: ModelCard) -> bool {
        if self.status.is_loading() {
            return false;
        }
        log::info!("loading model {card}");
        self.status = ModelStatus::Loading;
        tasks::spawn_model_load_flow(&mut self.executor, card);
        true
    }

    /// Advances the load flow; returns `true` if the status changed.
    pub fn update(&mut self) -> bool {
        self.executor.poll(&mut self.queue);
        let mut changed = false;
        for action in self.queue.take_all() {
            let ModelAction::LoadFinished { outcome } = action;
            self.status = match outcome {
                Ok(card) => {
                    log::info!("model {card} ready");
                    ModelStatus::Ready(card)
                }
                Err(err) => {
                    log::info!("model load failed: {err}");
                    ModelStatus::Error(err)
                }
            };
            changed = true;
        }
        changed
    }
}
