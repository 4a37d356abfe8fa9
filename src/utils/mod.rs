//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file management
//! - [`content`] - Binary detection and line numbering
//! - [`patterns`] - Loading pattern sets from arguments and files
//! - [`progress`] - Optional progress spinner

pub mod app_data;
pub mod content;
pub mod patterns;
pub mod progress;

pub use app_data::*;
pub use content::*;
pub use patterns::*;
