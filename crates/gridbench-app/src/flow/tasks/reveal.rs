use crate::{
    action::SessionAction,
    flow::{FlowExecutor, FlowHandle},
    reveal::{RevealAnimator, RevealStep},
    session::SessionId,
};

/// Spawns the flow that plays back `animator` one cell per interval.
pub fn spawn_reveal_flow<C: 'static>(
    executor: &mut FlowExecutor<SessionAction<C>>,
    id: SessionId,
    animator: RevealAnimator<C>,
) {
    let handle = executor.handle();
    executor.spawn(reveal_flow(handle, id, animator));
}

async fn reveal_flow<C>(
    handle: FlowHandle<SessionAction<C>>,
    id: SessionId,
    mut animator: RevealAnimator<C>,
) {
    loop {
        handle.sleep(animator.interval()).await;
        match animator.next_step() {
            RevealStep::Apply(write) => {
                handle.request_action(SessionAction::RevealCell { id, write });
            }
            RevealStep::Finished => {
                handle.request_action(SessionAction::RevealFinished { id });
                return;
            }
            RevealStep::Cancelled => {
                log::debug!(
                    "session {id}: reveal stopped after {} cells",
                    animator.applied()
                );
                return;
            }
        }
    }
}
