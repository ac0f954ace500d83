//! GLSL shader sources and compilation helpers.
//!
//! All shaders target GLSL 3.30 core, matching the OpenGL 3.3 core context
//! requested by the window bootstrap.

use std::fmt;
use std::path::{Path, PathBuf};

use glow::HasContext;

use crate::error::{Error, Result};

/// Vertex shader for the indexed square.
///
/// Passes the 3-component position straight through; no transform.
pub const SQUARE_VERTEX_SRC: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Fragment shader for the indexed square: a single flat orange.
pub const SQUARE_FRAGMENT_SRC: &str = r"#version 330 core
out vec4 FragColor;

void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

/// A programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per rasterized fragment.
    Fragment,
}

impl ShaderStage {
    /// The GL shader type enum for this stage.
    #[must_use]
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Where a shader stage's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Source compiled into the binary.
    Inline(&'static str),
    /// Source read from disk each time [`load`](Self::load) is called.
    File(PathBuf),
}

impl ShaderSource {
    /// Produce the shader text.
    ///
    /// Inline sources are returned as-is. File sources are read in full with
    /// no preprocessing; the text reaches the compiler byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShaderSource`] if the file cannot be read.
    pub fn load(&self) -> Result<String> {
        match self {
            ShaderSource::Inline(src) => Ok((*src).to_owned()),
            ShaderSource::File(path) => read_source(path),
        }
    }
}

/// Read a whole shader file into a string.
///
/// # Errors
///
/// Returns [`Error::ShaderSource`] carrying the path when the file is missing,
/// unreadable, or not valid UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Compile a shader program from vertex and fragment source strings.
///
/// The shader objects are deleted whether or not linking succeeds, so only
/// the returned program handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`Error::ShaderCompile`] with the compiler log, or
/// [`Error::ProgramLink`] with the linker log.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program> {
    let vs = unsafe { compile_shader(gl, ShaderStage::Vertex, vertex_src) }?;
    let fs = match unsafe { compile_shader(gl, ShaderStage::Fragment, fragment_src) } {
        Ok(fs) => fs,
        Err(e) => {
            unsafe { gl.delete_shader(vs) };
            return Err(e);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(Error::GlObject(e));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(program)
        };

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !linked {
            gl.delete_program(program);
            return Err(Error::ProgramLink { log });
        }

        log::debug!("linked shader program");
        Ok(program)
    }
}

/// Compile a single shader stage from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(stage.gl_type())?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::ShaderCompile { stage, log });
        }

        log::debug!("compiled {stage} shader ({} bytes)", source.len());
        Ok(shader)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A file under the system temp dir that is removed on drop.
    struct TempFile(PathBuf);

    impl TempFile {
        fn with_contents(name: &str, contents: &[u8]) -> Self {
            let path = std::env::temp_dir()
                .join(format!("glow-shapes-{}-{name}", std::process::id()));
            std::fs::write(&path, contents).unwrap();
            TempFile(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn inline_source_is_returned_unchanged() {
        let src = ShaderSource::Inline(SQUARE_VERTEX_SRC);
        assert_eq!(src.load().unwrap(), SQUARE_VERTEX_SRC);
    }

    #[test]
    fn file_source_round_trips_exactly() {
        let vertex = "#version 330 core\r\nlayout (location = 0) in vec3 aPos;\n\tvoid main() {}\n";
        let fragment = "#version 330 core\nout vec4 FragColor;\nvoid main() { FragColor = vec4(1.0); }";
        let vs = TempFile::with_contents("roundtrip.vert", vertex.as_bytes());
        let fs = TempFile::with_contents("roundtrip.frag", fragment.as_bytes());

        let read_vs = ShaderSource::File(vs.0.clone()).load().unwrap();
        let read_fs = ShaderSource::File(fs.0.clone()).load().unwrap();

        assert_eq!(read_vs.as_bytes(), vertex.as_bytes());
        assert_eq!(read_fs.as_bytes(), fragment.as_bytes());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("glow-shapes-definitely-missing.vert");
        let err = read_source(&path).unwrap_err();
        match err {
            Error::ShaderSource { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_file_is_rejected() {
        let file = TempFile::with_contents("binary.frag", &[0xff, 0xfe, 0x00, 0x80]);
        let err = read_source(&file.0).unwrap_err();
        assert!(matches!(err, Error::ShaderSource { .. }));
    }

    #[test]
    fn inline_sources_target_330_core() {
        for src in [SQUARE_VERTEX_SRC, SQUARE_FRAGMENT_SRC] {
            assert!(src.starts_with("#version 330 core\n"));
            assert!(src.contains("void main()"));
        }
        assert!(SQUARE_VERTEX_SRC.contains("layout (location = 0) in vec3 aPos;"));
    }

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
    }
}
