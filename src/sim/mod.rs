//! Simulation state and scheduling
//!
//! Owns everything about the automaton that is not a GPU pipeline: the
//! ping-pong grid textures, the random seed, the frame driver that decides
//! buffer roles each frame, and a CPU reference of the transition rule
//! used to verify the engine without hardware.

pub mod compute;
pub mod driver;
pub mod grid;
pub mod rule;
pub mod seed;

pub use compute::LifeCompute;
pub use driver::FrameDriver;
pub use grid::{source_and_dest, BufferSlot, GridBuffers};
pub use seed::seed;
