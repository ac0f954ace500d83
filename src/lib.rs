//! Two small OpenGL demos, an indexed square and a per-vertex colored
//! triangle, drawn with [glow] in a [glutin] window.
//!
//! Each demo is a [`Demo`]: a fixed [`Shape`] plus the vertex and fragment
//! [`ShaderSource`]s that draw it. [`run`] opens an OpenGL 3.3 core window,
//! compiles the program and uploads the mesh once, then drives a
//! [`FrameLoop`] that draws and presents one frame per iteration until the
//! quit key or a close request.
//!
//! # Safety
//!
//! [`ShapeRenderer`] and the mesh helpers issue raw GL calls and require a
//! valid, current OpenGL context; those methods are `unsafe`.
//!
//! [glow]: https://docs.rs/glow
//! [glutin]: https://docs.rs/glutin

pub mod config;
pub mod demo;
mod error;
pub mod frame_loop;
pub mod logging;
mod mesh;
mod render;
pub mod shaders;
pub mod types;
mod window;

pub use config::{ViewportPolicy, WindowConfig};
pub use demo::Demo;
pub use error::{Error, Result, Severity};
pub use frame_loop::{FrameLoop, FrameTarget, Key, LoopControl, LoopEvent, LoopState};
pub use mesh::GlMesh;
pub use render::ShapeRenderer;
pub use shaders::{ShaderSource, ShaderStage};
pub use types::{DrawCall, Shape};
pub use window::run;
