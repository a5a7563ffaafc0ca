//! Rigid-body integration adapter for the Outrider simulation.
//!
//! The simulation core only talks to the [`Space`] trait: attach or
//! detach a circular body, apply forces and impulses, step time, read the
//! result back. [`PointSpace`] is the bundled deterministic in-memory
//! integrator; an external engine can be swapped in behind the same seam.

pub mod point_space;
pub mod space;

pub use point_space::PointSpace;
pub use space::{BodyId, BodyState, Space};
