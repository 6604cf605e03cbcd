pub mod advisory;
pub mod daily;
pub mod indices;
pub mod market;
pub mod measurement;

pub use advisory::*;
pub use daily::*;
pub use indices::*;
pub use market::*;
pub use measurement::*;
