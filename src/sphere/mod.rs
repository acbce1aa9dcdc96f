//! Audio-reactive sphere: geometry, shape mapping and surface shading.

mod color;
mod mesh;
mod shape;
mod system;

// Re-export public types
pub use color::{material_color, rim_factor, rim_glow, MaterialColor, RimGlow, Shading};
pub use mesh::{SphereMesh, Vertex};
pub use shape::ShapeDriver;
pub use system::{FrameOutput, SphereSystem};
