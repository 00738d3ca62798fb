//! Deferred third-party embeds: which container loads what, when, and how its
//! placeholder goes away.
//!
//! Nothing here touches the DOM. The page host feeds visibility changes and
//! load signals in and applies the returned actions.

pub mod descriptor;
pub mod loader;
pub mod transition;

pub use descriptor::*;
pub use loader::*;
pub use transition::*;
