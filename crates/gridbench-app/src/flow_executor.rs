use std::{
    cell::RefCell,
    fmt,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
    time::Duration,
};

use crate::{action::ActionRequestQueue, clock::Clock};

/// Lightweight single-threaded executor for timed flows.
///
/// The owner polls this executor from its `update()` step. Flows are
/// futures that sleep on the shared [`Clock`] and emit actions of type `A`
/// through a [`FlowHandle`]; the owner applies those actions after each
/// poll. Nothing runs between polls, so no flow ever observes state changing
/// underneath it.
pub struct FlowExecutor<A> {
    state: Rc<RefCell<FlowState<A>>>,
    clock: Rc<dyn Clock>,
    tasks: Vec<FlowTask>,
}

impl<A> fmt::Debug for FlowExecutor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowExecutor")
            .field("tasks", &self.tasks.len())
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

impl<A: 'static> FlowExecutor<A> {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(FlowState::default())),
            clock,
            tasks: Vec::new(),
        }
    }

    /// Returns a handle for flows to request actions and sleep.
    #[must_use]
    pub fn handle(&self) -> FlowHandle<A> {
        FlowHandle {
            state: Rc::clone(&self.state),
            clock: Rc::clone(&self.clock),
        }
    }

    /// Returns true if no flows are currently running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Spawn a new flow future.
    pub fn spawn(&mut self, future: impl Future<Output = ()> + 'static) {
        self.tasks.push(FlowTask {
            future: Box::pin(future),
        });
    }

    /// Poll all active flows and drain any queued actions into `action_queue`.
    ///
    /// Actions are delivered in the order they were requested.
    pub fn poll(&mut self, action_queue: &mut ActionRequestQueue<A>) {
        self.drain_actions(action_queue);

        let mut cx = Context::from_waker(Waker::noop());

        // `remove` keeps flows, and so their actions, in spawn order.
        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            if task.future.as_mut().poll(&mut cx).is_ready() {
                self.tasks.remove(i);
            } else {
                i += 1;
            }
        }

        self.drain_actions(action_queue);
    }

    fn drain_actions(&mut self, action_queue: &mut ActionRequestQueue<A>) {
        let mut state = self.state.borrow_mut();
        for action in state.pending_actions.drain(..) {
            action_queue.request(action);
        }
    }
}

/// Flow handle used by async flows to request actions and wait for time to
/// pass.
pub struct FlowHandle<A> {
    state: Rc<RefCell<FlowState<A>>>,
    clock: Rc<dyn Clock>,
}

impl<A> Clone for FlowHandle<A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<A> FlowHandle<A> {
    pub fn request_action(&self, action: A) {
        self.state.borrow_mut().pending_actions.push(action);
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Suspends the flow until `duration` has passed on the clock.
    ///
    /// The returned future is pending on its first poll even for a zero
    /// duration, so consecutive steps of a flow never share one poll.
    #[must_use]
    pub fn sleep(&self, duration: Duration) -> Sleep {
        Sleep {
            clock: Rc::clone(&self.clock),
            deadline: self.clock.now() + duration,
            yielded: false,
        }
    }
}

/// Future returned by [`FlowHandle::sleep`].
#[derive(Debug)]
pub struct Sleep {
    clock: Rc<dyn Clock>,
    deadline: Duration,
    yielded: bool,
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded && self.clock.now() >= self.deadline {
            Poll::Ready(())
        } else {
            self.yielded = true;
            Poll::Pending
        }
    }
}

struct FlowTask {
    future: Pin<Box<dyn Future<Output = ()>>>,
}

struct FlowState<A> {
    pending_actions: Vec<A>,
}

impl<A> Default for FlowState<A> {
    fn default() -> Self {
        Self {
            pending_actions: Vec::new(),
        }
    }
}
