pub mod format;
pub mod input;
pub mod progress;
