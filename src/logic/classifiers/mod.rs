pub mod frost;
pub mod heat;
pub mod irrigation;
pub mod priority;
pub mod spraying;

pub use priority::build_advisory;
