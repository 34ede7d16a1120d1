use std::{rc::Rc, time::Duration};

use futures_channel::oneshot;
use gridbench_core::Grid;
use gridbench_model::{InferenceError, StandInModel};

use crate::{
    action::SessionAction,
    cancel::CancelFlag,
    flow::{FlowExecutor, FlowHandle},
    session::SessionId,
};

/// Everything a solve flow needs from the session that started it.
#[derive(Debug)]
pub struct SolveRequest<C> {
    pub id: SessionId,
    pub submitted: Grid<C>,
    pub delay: Duration,
    pub cancel: CancelFlag,
}

/// Spawns the stand-in computation and the flow awaiting its answer.
///
/// The computation always runs to completion once its delay has passed. If
/// the session was cancelled by then, the awaiting flow drops the outcome
/// instead of reporting it.
pub fn spawn_solve_flow<C: 'static>(
    executor: &mut FlowExecutor<SessionAction<C>>,
    model: Rc<dyn StandInModel<C>>,
    request: SolveRequest<C>,
) {
    let (sender, receiver) = oneshot::channel();
    let SolveRequest {
        id,
        submitted,
        delay,
        cancel,
    } = request;

    let handle = executor.handle();
    executor.spawn(inference_flow(
        handle.clone(),
        model,
        submitted,
        delay,
        sender,
    ));
    executor.spawn(await_inference_flow(handle, id, cancel, receiver));
}

async fn inference_flow<C>(
    handle: FlowHandle<SessionAction<C>>,
    model: Rc<dyn StandInModel<C>>,
    submitted: Grid<C>,
    delay: Duration,
    sender: oneshot::Sender<Result<Grid<C>, InferenceError>>,
) {
    handle.sleep(delay).await;
    let outcome = model.infer(&submitted);
    if sender.send(outcome).is_err() {
        log::debug!("{} finished with nobody waiting", model.name());
    }
}

async fn await_inference_flow<C>(
    handle: FlowHandle<SessionAction<C>>,
    id: SessionId,
    cancel: CancelFlag,
    receiver: oneshot::Receiver<Result<Grid<C>, InferenceError>>,
) {
    let Ok(outcome) = receiver.await else {
        log::debug!("session {id}: inference dropped without an answer");
        return;
    };
    if cancel.is_cancelled() {
        log::debug!("session {id}: discarding late inference result");
        return;
    }
    handle.request_action(SessionAction::InferenceFinished { id, outcome });
}
