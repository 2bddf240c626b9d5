//! Common utility functions

pub mod input;
pub mod phone;

// Re-export commonly used utilities
pub use input::*;
pub use phone::*;
