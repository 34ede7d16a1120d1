use std::time::Duration;

use crate::{
    action::TrainingAction,
    cancel::CancelFlag,
    flow::{FlowExecutor, FlowHandle},
};

/// Spawns a ticker requesting one [`TrainingAction::Tick`] per `interval`
/// until `cancel` is set.
pub fn spawn_training_ticker(
    executor: &mut FlowExecutor<TrainingAction>,
    generation: u64,
    interval: Duration,
    cancel: CancelFlag,
) {
    let handle = executor.handle();
    executor.spawn(ticker_flow(handle, generation, interval, cancel));
}

async fn ticker_flow(
    handle: FlowHandle<TrainingAction>,
    generation: u64,
    interval: Duration,
    cancel: CancelFlag,
) {
    loop {
        handle.sleep(interval).await;
        if cancel.is_cancelled() {
            log::debug!("training ticker {generation} stopped");
            return;
        }
        handle.request_action(TrainingAction::Tick { generation });
    }
}
