//! Core abstractions shared by the flowchart encoder and its adapters
//!
//! Errors, logging setup, identifier generation, text helpers, the closed
//! keyword sets of the output format, and the renderer trait.

mod error;
pub mod ids;
pub mod logging;
mod renderer;
mod text;
mod types;

pub use error::*;
pub use ids::IdGenerator;
pub use logging::{init_logging, LogFormat};
pub use renderer::*;
pub use text::*;
pub use types::*;
