pub mod passage;
pub mod verse_range;

pub use passage::*;
pub use verse_range::*;
