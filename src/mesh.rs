//! GPU-side copy of a [`Shape`]: one vertex array, one vertex buffer, and an
//! optional element buffer, uploaded once and drawn every frame.

use glow::HasContext;

use crate::error::Result;
use crate::types::{DrawCall, Shape};

/// Vertex array plus the buffers it references.
pub struct GlMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    draw: DrawCall,
}

impl GlMesh {
    /// Create the GL objects for `shape` and upload its data with
    /// `STATIC_DRAW`.
    ///
    /// The element buffer binding is captured by the vertex array, so it is
    /// bound while the VAO is bound and left bound when the VAO is unbound.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context. The caller must call
    /// [`destroy`](Self::destroy) with the same context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GlObject`](crate::Error::GlObject) if any object
    /// cannot be created. Objects created before the failure are deleted.
    pub unsafe fn new(gl: &glow::Context, shape: &Shape) -> Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e.into());
                }
            };
            let ebo = match shape.indices {
                Some(_) => match gl.create_buffer() {
                    Ok(ebo) => Some(ebo),
                    Err(e) => {
                        gl.delete_buffer(vbo);
                        gl.delete_vertex_array(vao);
                        return Err(e.into());
                    }
                },
                None => None,
            };

            gl.bind_vertex_array(Some(vao));

            if let (Some(ebo), Some(indices)) = (ebo, shape.indices.as_deref()) {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(indices),
                    glow::STATIC_DRAW,
                );
            }

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &shape.vertices, glow::STATIC_DRAW);

            for attr in shape.layout.attributes {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    shape.layout.stride,
                    attr.offset,
                );
                gl.enable_vertex_attrib_array(attr.location);
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            log::debug!(
                "uploaded mesh: {} vertex bytes, {} indices, {} attributes",
                shape.vertices.len(),
                shape.indices.as_ref().map_or(0, Vec::len),
                shape.layout.attributes.len(),
            );

            Ok(Self {
                vao,
                vbo,
                ebo,
                draw: shape.draw,
            })
        }
    }

    /// The draw command this mesh issues.
    #[must_use]
    pub fn draw_call(&self) -> DrawCall {
        self.draw
    }

    /// Bind the vertex array, issue the single draw call, and unbind.
    ///
    /// # Safety
    ///
    /// Requires the context passed to [`new`](Self::new) to be current, with a
    /// linked program in use.
    pub unsafe fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            match self.draw {
                DrawCall::Arrays { count } => gl.draw_arrays(glow::TRIANGLES, 0, count),
                DrawCall::Elements { count } => {
                    gl.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0);
                }
            }
            gl.bind_vertex_array(None);
        }
    }

    /// Delete the vertex array and buffers.
    ///
    /// # Safety
    ///
    /// Must be called with the context used in [`new`](Self::new), exactly
    /// once.
    pub unsafe fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }
        }
    }
}
