//! The two demo programs, described as data.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shaders::{ShaderSource, SQUARE_FRAGMENT_SRC, SQUARE_VERTEX_SRC};
use crate::types::Shape;

/// Directory holding the triangle's shader files.
pub const SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

/// A shape plus the shader sources that draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Demo {
    /// Short name used in logs.
    pub name: &'static str,
    /// Geometry to upload.
    pub shape: Shape,
    /// Vertex stage source.
    pub vertex: ShaderSource,
    /// Fragment stage source.
    pub fragment: ShaderSource,
}

impl Demo {
    /// An orange square built from two indexed triangles, with inline shaders.
    #[must_use]
    pub fn indexed_square() -> Self {
        Self {
            name: "square",
            shape: Shape::square(),
            vertex: ShaderSource::Inline(SQUARE_VERTEX_SRC),
            fragment: ShaderSource::Inline(SQUARE_FRAGMENT_SRC),
        }
    }

    /// A triangle with per-vertex colors, shaders read from [`SHADER_DIR`].
    #[must_use]
    pub fn colored_triangle() -> Self {
        Self::colored_triangle_from(Path::new(SHADER_DIR))
    }

    /// Same as [`colored_triangle`](Self::colored_triangle), reading
    /// `triangle.vert` and `triangle.frag` from `dir`.
    #[must_use]
    pub fn colored_triangle_from(dir: &Path) -> Self {
        Self {
            name: "triangle",
            shape: Shape::triangle(),
            vertex: ShaderSource::File(dir.join("triangle.vert")),
            fragment: ShaderSource::File(dir.join("triangle.frag")),
        }
    }

    /// Load both stages' text, vertex first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShaderSource`](crate::Error::ShaderSource) for the
    /// first file that cannot be read.
    pub fn load_sources(&self) -> Result<(String, String)> {
        Ok((self.vertex.load()?, self.fragment.load()?))
    }

    /// Paths this demo reads at startup, if any.
    #[must_use]
    pub fn source_files(&self) -> Vec<PathBuf> {
        [&self.vertex, &self.fragment]
            .into_iter()
            .filter_map(|src| match src {
                ShaderSource::File(path) => Some(path.clone()),
                ShaderSource::Inline(_) => None,
            })
            .collect()
    }
}
