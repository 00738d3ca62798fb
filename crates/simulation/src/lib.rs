//! Simulated "live" airport activity.
//!
//! There is no data source. Every value is a function of the hour of day and
//! a caller-supplied random number generator, so seeded generators give fully
//! reproducible snapshots.

pub mod activity;
pub mod bands;
pub mod counter;
pub mod status;
pub mod wind;

pub use activity::*;
pub use bands::*;
pub use counter::*;
pub use status::*;
pub use wind::*;
