// src/lib.rs
//! Petri
//!
//! A GPU-resident Conway's Game of Life engine built on wgpu and winit.
//! Cell state lives in a pair of ping-pong textures, a compute pass
//! advances one generation per frame, and a render pass blits the
//! currently selected texture to the window as a full-screen quad.

pub mod app;
pub mod error;
pub mod gfx;
pub mod sim;

// Re-export main types for convenience
pub use app::PetriApp;
pub use error::{EngineError, Result};

/// Creates a default Petri application instance
pub fn default() -> Result<PetriApp> {
    PetriApp::new()
}
