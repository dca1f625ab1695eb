pub mod catalog;
pub mod game;

pub use catalog::*;
pub use game::*;
