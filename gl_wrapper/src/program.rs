use std::ffi::CString;
use std::fmt::{Display, Formatter};
use std::path::Path;

use gl::types::{GLchar, GLint, GLsizei, GLuint};
use thiserror::Error;

const LOG_BUF_LEN: usize = 1024;

/// Raw text of one shader, read from disk and NUL-terminated for the driver.
#[derive(Debug)]
pub struct ShaderSource {
    src: CString,
}

impl ShaderSource {
    /// Reads the whole file as bytes, without line-ending translation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProgramError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| ProgramError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let src = CString::new(bytes)
            .map_err(|_| ProgramError::InteriorNul(path.display().to_string()))?;

        Ok(Self { src })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.src.as_bytes()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn gl_kind(&self) -> gl::types::GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("VERTEX"),
            ShaderKind::Fragment => f.write_str("FRAGMENT"),
        }
    }
}

/// A successfully compiled shader object. A failed compile never produces
/// one of these, so only valid shaders can reach [`Program::link`].
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    pub fn compile(source: &ShaderSource, kind: ShaderKind) -> Result<Self, ProgramError> {
        let mut success: GLint = 0;

        unsafe {
            let id = gl::CreateShader(kind.gl_kind());

            gl::ShaderSource(id, 1, &source.src.as_ptr(), std::ptr::null());
            gl::CompileShader(id);

            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
            if success != 1 {
                let log = info_log(id, LogSource::Shader);
                gl::DeleteShader(id);
                return Err(ProgramError::Compilation(kind, log));
            }

            Ok(Self { id, kind })
        }
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

/// A linked vertex + fragment program, the long-lived renderable artifact.
pub struct Program {
    id: GLuint,
}

impl Program {
    /// Links the two shaders into a program. Both shaders are consumed:
    /// after a link attempt, successful or not, they are released.
    pub fn link(vert: Shader, frag: Shader) -> Result<Self, ProgramError> {
        let mut success: GLint = 0;

        unsafe {
            let id = gl::CreateProgram();
            gl::AttachShader(id, vert.id);
            gl::AttachShader(id, frag.id);
            gl::LinkProgram(id);

            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
            if success != 1 {
                let log = info_log(id, LogSource::Program);
                gl::DeleteProgram(id);
                return Err(ProgramError::Linking(log));
            }

            Ok(Self { id })
        }
    }

    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        unsafe { gl::ProgramUniform1f(self.id, self.location(name), value) }
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        unsafe { gl::ProgramUniform1i(self.id, self.location(name), value) }
    }

    pub fn set_vec2(&self, name: &str, value: [f32; 2]) {
        unsafe { gl::ProgramUniform2f(self.id, self.location(name), value[0], value[1]) }
    }

    // An unknown name resolves to -1, which the driver ignores.
    fn location(&self, name: &str) -> GLint {
        let name = CString::new(name).unwrap();
        unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

enum LogSource {
    Shader,
    Program,
}

fn info_log(id: GLuint, source: LogSource) -> String {
    let mut buf = [0_u8; LOG_BUF_LEN];
    let mut len: GLsizei = 0;

    unsafe {
        match source {
            LogSource::Shader => gl::GetShaderInfoLog(
                id,
                LOG_BUF_LEN as GLsizei,
                &mut len,
                buf.as_mut_ptr() as *mut GLchar,
            ),
            LogSource::Program => gl::GetProgramInfoLog(
                id,
                LOG_BUF_LEN as GLsizei,
                &mut len,
                buf.as_mut_ptr() as *mut GLchar,
            ),
        }
    }

    let len = (len.max(0) as usize).min(LOG_BUF_LEN);
    String::from_utf8_lossy(&buf[..len]).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("could not read shader source '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("shader source '{0}' contains a NUL byte")]
    InteriorNul(String),
    #[error("ERROR::SHADER::{0}::COMPILATION_FAILED\n{1}")]
    Compilation(ShaderKind, String),
    #[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{0}")]
    Linking(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gl_wrapper-test-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn load_reads_exact_bytes() {
        let path = temp_path("vert.glsl");
        let content = b"#version 450 core\r\nvoid main() {}\n";
        std::fs::write(&path, content).unwrap();

        let source = ShaderSource::load(&path).unwrap();
        assert_eq!(source.as_bytes(), content);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = ShaderSource::load("no/such/shader.glsl").unwrap_err();

        match err {
            ProgramError::Io { ref path, .. } => assert_eq!(path, "no/such/shader.glsl"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_rejects_interior_nul() {
        let path = temp_path("nul.glsl");
        std::fs::write(&path, b"void\0main").unwrap();

        let err = ShaderSource::load(&path).unwrap_err();
        assert!(matches!(err, ProgramError::InteriorNul(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn diagnostic_tags_match_observed_format() {
        let err = ProgramError::Compilation(ShaderKind::Vertex, "0:1(1): error".into());
        assert!(err
            .to_string()
            .starts_with("ERROR::SHADER::VERTEX::COMPILATION_FAILED"));

        let err = ProgramError::Compilation(ShaderKind::Fragment, String::new());
        assert!(err
            .to_string()
            .starts_with("ERROR::SHADER::FRAGMENT::COMPILATION_FAILED"));

        let err = ProgramError::Linking("attribute mismatch".into());
        assert!(err
            .to_string()
            .starts_with("ERROR::SHADER::PROGRAM::LINKING_FAILED"));
        assert!(err.to_string().contains("attribute mismatch"));
    }
}
