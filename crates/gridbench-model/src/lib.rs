//! Stand-in reasoning model and sample data.
//!
//! Nothing here performs real inference. A [`StandInModel`] turns a
//! submitted grid into a result grid: [`Precomputed`] hands back a fixed
//! payload, and [`PathFinder`] runs a breadth-first search so that edited
//! mazes still get a sensible route. The [`samples`] module provides the
//! demo puzzles and payloads for each domain, and [`ModelCard`] describes
//! the model being impersonated.
//!
//! # Examples
//!
//! ```
//! use gridbench_model::{PathFinder, StandInModel as _, samples};
//!
//! let maze = samples::maze_puzzle();
//! let solved = PathFinder.infer(&maze)?;
//! assert!(solved.count_where(|c| c.is_trail()) > 0);
//! # Ok::<(), gridbench_model::InferenceError>(())
//! ```

pub use self::{error::*, model_card::*, path_finder::*, stand_in::*};

mod error;
mod model_card;
mod path_finder;
pub mod samples;
mod stand_in;
