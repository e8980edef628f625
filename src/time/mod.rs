pub mod duration;
pub mod error;
pub mod timestamp;
