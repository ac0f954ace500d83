//! Vertex formats and the fixed shape data drawn by the demos.
//!
//! Layouts are plain data so they can be checked without a GL context; the
//! mesh module turns them into `glVertexAttribPointer` calls.

use std::mem::{offset_of, size_of};
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

/// Size of one `f32` component, in bytes.
const FLOAT_BYTES: usize = size_of::<f32>();

/// Convert a byte count to the `i32` GL expects for strides and offsets.
///
/// Vertex structs here are a few dozen bytes at most.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn gl_bytes(bytes: usize) -> i32 {
    bytes as i32
}

/// Position-only vertex used by the indexed square.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionVertex {
    /// Clip-space position.
    pub position: [f32; 3],
}

/// Interleaved position + color vertex used by the colored triangle.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorVertex {
    /// Clip-space position.
    pub position: [f32; 3],
    /// Linear RGB.
    pub color: [f32; 3],
}

/// One shader input attribute inside an interleaved vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout (location = N)` in the vertex shader.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

impl VertexAttribute {
    /// Bytes of a vertex this attribute reads.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn byte_range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.components as usize * FLOAT_BYTES
    }
}

/// How the bytes of one vertex map onto shader attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    /// Distance in bytes between consecutive vertices.
    pub stride: i32,
    /// Attributes, in location order.
    pub attributes: &'static [VertexAttribute],
}

/// A vertex type that can be uploaded as-is.
pub trait VertexFormat: Pod {
    /// Attribute layout matching the struct's `#[repr(C)]` fields.
    const LAYOUT: VertexLayout;
}

impl VertexFormat for PositionVertex {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: gl_bytes(size_of::<PositionVertex>()),
        attributes: &[VertexAttribute {
            location: 0,
            components: 3,
            offset: gl_bytes(offset_of!(PositionVertex, position)),
        }],
    };
}

impl VertexFormat for ColorVertex {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: gl_bytes(size_of::<ColorVertex>()),
        attributes: &[
            VertexAttribute {
                location: 0,
                components: 3,
                offset: gl_bytes(offset_of!(ColorVertex, position)),
            },
            VertexAttribute {
                location: 1,
                components: 3,
                offset: gl_bytes(offset_of!(ColorVertex, color)),
            },
        ],
    };
}

/// The single draw command issued for a shape each frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    /// `glDrawArrays(GL_TRIANGLES, 0, count)`.
    Arrays {
        /// Vertices to draw.
        count: i32,
    },
    /// `glDrawElements(GL_TRIANGLES, count, GL_UNSIGNED_INT, 0)`.
    Elements {
        /// Indices to draw.
        count: i32,
    },
}

/// Two triangles sharing the `(-0.5, 1)`/`(0, 0)` edge.
pub const SQUARE_VERTICES: [PositionVertex; 4] = [
    PositionVertex {
        position: [-0.5, 0.0, 0.0],
    },
    PositionVertex {
        position: [-0.5, 1.0, 0.0],
    },
    PositionVertex {
        position: [0.0, 0.0, 0.0],
    },
    PositionVertex {
        position: [0.0, 1.0, 0.0],
    },
];

/// Index list for [`SQUARE_VERTICES`].
pub const SQUARE_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

/// One triangle with a distinct color per corner.
pub const TRIANGLE_VERTICES: [ColorVertex; 3] = [
    ColorVertex {
        position: [0.5, 0.0, 0.0],
        color: [0.3, 0.6, 0.2],
    },
    ColorVertex {
        position: [-0.5, 0.0, 0.0],
        color: [0.4, 0.2, 0.7],
    },
    ColorVertex {
        position: [0.0, 1.0, 0.0],
        color: [0.5, 0.7, 0.3],
    },
];

/// CPU-side geometry for one shape, ready to upload.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Raw interleaved vertex bytes.
    pub vertices: Vec<u8>,
    /// Index list, when drawn with an element buffer.
    pub indices: Option<Vec<u32>>,
    /// Attribute layout of [`vertices`](Self::vertices).
    pub layout: VertexLayout,
    /// Draw command matching the data.
    pub draw: DrawCall,
}

impl Shape {
    /// Build a shape from typed vertices and an optional index list.
    ///
    /// # Panics
    ///
    /// Panics if the vertex or index count exceeds `i32::MAX`.
    #[must_use]
    pub fn new<V: VertexFormat>(vertices: &[V], indices: Option<&[u32]>) -> Self {
        let draw = match indices {
            Some(indices) => DrawCall::Elements {
                count: i32::try_from(indices.len()).expect("index count exceeds i32::MAX"),
            },
            None => DrawCall::Arrays {
                count: i32::try_from(vertices.len()).expect("vertex count exceeds i32::MAX"),
            },
        };

        Self {
            vertices: bytemuck::cast_slice(vertices).to_vec(),
            indices: indices.map(<[u32]>::to_vec),
            layout: V::LAYOUT,
            draw,
        }
    }

    /// The indexed square.
    #[must_use]
    pub fn square() -> Self {
        Self::new(&SQUARE_VERTICES, Some(&SQUARE_INDICES))
    }

    /// The per-vertex colored triangle.
    #[must_use]
    pub fn triangle() -> Self {
        Self::new(&TRIANGLE_VERTICES, None)
    }

    /// Number of whole vertices in [`vertices`](Self::vertices).
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride as usize
    }
}
