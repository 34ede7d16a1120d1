use gridbench_model::ModelCard;

use crate::{
    action::ModelAction,
    flow::{FlowExecutor, FlowHandle},
    model_loader::validate_card,
};

/// Spawns the simulated weight load for `card`.
pub fn spawn_model_load_flow(executor: &mut FlowExecutor<ModelAction>, card: ModelCard) {
    let handle = executor.handle();
    executor.spawn(model_load_flow(handle, card));
}

async fn model_load_flow(handle: FlowHandle<ModelAction>, card: ModelCard) {
    handle.sleep(card.load_delay).await;
    let outcome = validate_card(&card).map(|()| card);
    handle.request_action(ModelAction::LoadFinished { outcome });
}
