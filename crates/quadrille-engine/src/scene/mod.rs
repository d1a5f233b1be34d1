//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw descriptors for the shared quad mesh
//! - provide deterministic ordering (insertion order is draw order)

mod descriptor;
mod list;

pub use descriptor::DrawDescriptor;
pub use list::DrawList;
