//! The renderer: owns the linked program and the uploaded mesh, and issues
//! the frame's clear and draw.

use std::sync::Arc;

use glow::HasContext;

use crate::error::Result;
use crate::mesh::GlMesh;
use crate::shaders;
use crate::types::{DrawCall, Shape};

/// Convert a pixel dimension to the `i32` GL viewport calls take.
///
/// Window sizes never approach `i32::MAX`; saturate rather than wrap.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Draws one fixed shape with one shader program.
///
/// All GL objects are created in [`new`](Self::new) and released in
/// [`destroy`](Self::destroy); per-frame work is limited to binding and
/// drawing.
///
/// # Example
///
/// ```no_run
/// # use glow_shapes::{ShapeRenderer, Shape, shaders};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) -> glow_shapes::Result<()> {
/// // During setup (with a current GL context):
/// let renderer = unsafe {
///     ShapeRenderer::new(
///         gl,
///         &Shape::square(),
///         shaders::SQUARE_VERTEX_SRC,
///         shaders::SQUARE_FRAGMENT_SRC,
///         [0.5, 0.5, 0.5, 0.5],
///     )
/// }?;
///
/// // Each frame:
/// unsafe { renderer.draw_frame() };
///
/// // After the loop:
/// unsafe { renderer.destroy() };
/// # Ok(())
/// # }
/// ```
pub struct ShapeRenderer {
    /// The OpenGL context, shared with the window layer.
    gl: Arc<glow::Context>,

    /// Linked vertex + fragment program.
    program: glow::Program,

    /// Vertex array and buffers for the shape.
    mesh: GlMesh,

    /// RGBA clear color.
    clear_color: [f32; 4],
}

impl ShapeRenderer {
    /// Compile the program and upload the shape.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must ensure
    /// that [`destroy`](Self::destroy) is called before the context is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns the compile or link error with its info log, or a GL object
    /// creation error. Nothing is left allocated on failure.
    pub unsafe fn new(
        gl: Arc<glow::Context>,
        shape: &Shape,
        vertex_src: &str,
        fragment_src: &str,
        clear_color: [f32; 4],
    ) -> Result<Self> {
        let program = unsafe { shaders::compile_program(&gl, vertex_src, fragment_src) }?;

        let mesh = match unsafe { GlMesh::new(&gl, shape) } {
            Ok(mesh) => mesh,
            Err(e) => {
                unsafe { gl.delete_program(program) };
                return Err(e);
            }
        };

        Ok(Self {
            gl,
            program,
            mesh,
            clear_color,
        })
    }

    /// The draw command issued each frame.
    #[must_use]
    pub fn draw_call(&self) -> DrawCall {
        self.mesh.draw_call()
    }

    /// Clear the color buffer, activate the program, and draw the shape once.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn draw_frame(&self) {
        let gl = &self.gl;
        let [r, g, b, a] = self.clear_color;

        unsafe {
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.program));
            self.mesh.draw(gl);
        }
    }

    /// Set the drawable viewport.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, gl_size(width), gl_size(height)) };
    }

    /// Clean up all GL resources owned by this renderer.
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that was used to create the
    /// renderer, and must be called exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.use_program(None);
            gl.delete_program(self.program);
            self.mesh.destroy(gl);
        }
    }
}
