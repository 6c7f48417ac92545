//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod analysis;
pub mod image;
pub mod session;
pub mod settings;

pub use analysis::*;
pub use image::*;
pub use session::*;
pub use settings::*;
