//! Sunlight casting and flood-fill light propagation over a [`lumen_world::World`].
//!
//! Light runs from 0 (dark) to [`lumen_blocks::MAXIMUM_LIGHT_LEVEL`]. A pass
//! first casts sunlight straight down each column, then spreads it sideways
//! from sunlit blocks, losing one level per step, into caves and under
//! overhangs, across chunk borders when needed.
#![forbid(unsafe_code)]

mod pass;
mod propagate;

pub use pass::{LightingReport, calculate_lighting, light_chunks, relight_around, set_initial_lighting};
pub use propagate::{LightPropagator, LightingOperation};
