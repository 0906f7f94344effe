//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.
//! The follow camera owns viewport and aspect math for resizes.

pub mod camera;
pub mod sdf_pipeline;

pub use camera::{FollowCamera, Viewport};
pub use sdf_pipeline::SdfRenderState;
