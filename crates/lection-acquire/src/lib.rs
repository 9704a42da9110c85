pub mod fetch;
pub mod strip;

pub use fetch::*;
pub use strip::*;
