//! Timed flows driven by [`FlowExecutor`].

pub use crate::flow_executor::{FlowExecutor, FlowHandle, Sleep};

pub mod tasks;
