//! GPU rendering infrastructure
//!
//! Device/surface ownership, the full-screen presenter, and the vertex
//! format for the blit quad.

pub mod engine;
pub mod presenter;
pub mod vertex;

pub use engine::RenderEngine;
pub use presenter::Presenter;
pub use vertex::Vertex;
