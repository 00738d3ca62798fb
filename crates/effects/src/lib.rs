pub mod anchor;
pub mod navbar;
pub mod reveal;

pub use anchor::*;
pub use navbar::*;
pub use reveal::*;
