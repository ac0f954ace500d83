//! Error type shared by the bootstrap, shader, and render layers.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::shaders::ShaderStage;

/// How far an error reaches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    /// The process cannot continue; the loop is torn down and the binary exits.
    Fatal,
    /// Only the current frame is lost; the loop keeps running.
    Frame,
}

/// Everything that can go wrong between opening the window and closing it.
#[derive(Debug)]
pub enum Error {
    /// glutin could not create the window or its GL context.
    WindowCreation(String),
    /// The GL context could not be made current on this thread.
    ContextCurrent(String),
    /// Function loading produced a context below the requested version.
    GlLoader {
        /// Version that was asked for, as `(major, minor)`.
        requested: (u8, u8),
        /// Version the driver actually reported.
        found: (u32, u32),
    },
    /// A shader source file could not be read.
    ShaderSource {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// A shader stage failed to compile.
    ShaderCompile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Compiler info log.
        log: String,
    },
    /// The program failed to link.
    ProgramLink {
        /// Linker info log.
        log: String,
    },
    /// A `create_*` call on the GL context failed.
    GlObject(String),
    /// Swapping the back buffer failed.
    Present(String),
}

impl Error {
    /// Every variant currently ends the process: all GL objects are built
    /// before the first frame, and a failed swap means the context is gone.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Error::WindowCreation(_)
            | Error::ContextCurrent(_)
            | Error::GlLoader { .. }
            | Error::ShaderSource { .. }
            | Error::ShaderCompile { .. }
            | Error::ProgramLink { .. }
            | Error::GlObject(_)
            | Error::Present(_) => Severity::Fatal,
        }
    }

    /// Numeric process status for this error.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | `1`  | window, context, or loader      |
    /// | `2`  | shader file could not be read   |
    /// | `3`  | shader compilation              |
    /// | `4`  | program linking                 |
    /// | `5`  | GL object creation or present   |
    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Error::WindowCreation(_) | Error::ContextCurrent(_) | Error::GlLoader { .. } => 1,
            Error::ShaderSource { .. } => 2,
            Error::ShaderCompile { .. } => 3,
            Error::ProgramLink { .. } => 4,
            Error::GlObject(_) | Error::Present(_) => 5,
        }
    }

    /// [`status`](Self::status) wrapped for returning from `main`.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowCreation(msg) => write!(f, "can't create window: {msg}"),
            Error::ContextCurrent(msg) => write!(f, "can't make GL context current: {msg}"),
            Error::GlLoader { requested, found } => write!(
                f,
                "can't load OpenGL {}.{} core (driver reports {}.{})",
                requested.0, requested.1, found.0, found.1
            ),
            Error::ShaderSource { path, source } => {
                write!(f, "can't read shader source {}: {source}", path.display())
            }
            Error::ShaderCompile { stage, log } => {
                write!(f, "failed to compile {stage} shader: {}", log.trim_end())
            }
            Error::ProgramLink { log } => write!(f, "failed to link program: {}", log.trim_end()),
            Error::GlObject(msg) => write!(f, "GL object creation failed: {msg}"),
            Error::Present(msg) => write!(f, "failed to swap buffers: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ShaderSource { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// glow reports object creation failures as plain strings.
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::GlObject(msg)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<Error> {
        vec![
            Error::WindowCreation("no display".into()),
            Error::ContextCurrent("lost".into()),
            Error::GlLoader {
                requested: (3, 3),
                found: (2, 1),
            },
            Error::ShaderSource {
                path: PathBuf::from("missing.vert"),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            },
            Error::ShaderCompile {
                stage: ShaderStage::Vertex,
                log: "0:1(1): error: syntax error\n".into(),
            },
            Error::ProgramLink {
                log: "undefined output".into(),
            },
            Error::GlObject("out of names".into()),
            Error::Present("context lost".into()),
        ]
    }

    #[test]
    fn every_error_is_fatal() {
        for err in all_variants() {
            assert_eq!(err.severity(), Severity::Fatal, "{err}");
        }
    }

    #[test]
    fn status_codes_are_non_zero() {
        for err in all_variants() {
            assert_ne!(err.status(), 0, "{err}");
        }
    }

    #[test]
    fn shader_failures_have_distinct_codes() {
        let source = Error::ShaderSource {
            path: PathBuf::from("a"),
            source: io::Error::new(io::ErrorKind::NotFound, "x"),
        };
        let compile = Error::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "x".into(),
        };
        let link = Error::ProgramLink { log: "x".into() };
        let bootstrap = Error::WindowCreation("x".into());

        let codes = [
            bootstrap.status(),
            source.status(),
            compile.status(),
            link.status(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn compile_message_names_stage_and_log() {
        let err = Error::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: `FragColr' undeclared\n".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("FragColr"));
        assert!(!msg.ends_with('\n'));
    }

    #[test]
    fn shader_source_exposes_io_source() {
        let err = Error::ShaderSource {
            path: PathBuf::from("shaders/nope.vert"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("shaders/nope.vert"));
    }

    #[test]
    fn glow_strings_become_object_errors() {
        let err: Error = String::from("create_buffer failed").into();
        assert!(matches!(err, Error::GlObject(_)));
        assert_eq!(err.status(), 5);
    }
}
