//! Flow bodies and their spawn helpers.
//!
//! Flows never touch owned state directly. Each one sleeps on the clock,
//! checks its cancellation flag, and requests an action that the owner
//! validates and applies on its next `update()`.

pub use self::{model_load::*, reveal::*, solve::*, training::*};

mod model_load;
mod reveal;
mod solve;
mod training;
