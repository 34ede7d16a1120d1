use std::{cell::Cell, rc::Rc};

/// Shared cooperative cancellation token.
///
/// Flows check the flag at their suspension points; setting it never
/// interrupts work in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Rc<Cell<bool>>,
}

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
