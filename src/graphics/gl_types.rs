//! The seam between the shader wrapper and whatever actually talks to the graphics driver.
//!
//! Everything [`ShaderProgram`](super::shader::ShaderProgram) needs from OpenGL goes through the
//! [`GlApi`] trait. In the real program that's [`GlFunctions`](super::opengl::GlFunctions), which
//! forwards to the function pointers loaded by the `gl` crate. Keeping the trait small means the
//! compile/link/report logic can be exercised without a window or a GPU.

use std::fmt;

use gl::types::*;

/// The name OpenGL hands back for a shader or program object. Zero is never a valid object.
pub type GlObject = GLuint;

/// The location of a uniform inside a linked program. `-1` means "no such uniform", and writes to
/// it are silently ignored by the driver.
pub type GlUniformLocation = GLint;

/// The sentinel location returned for names the program doesn't declare.
pub const INVALID_UNIFORM_LOCATION: GlUniformLocation = -1;

/// Which half of the pipeline a shader stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlShaderType {
    Vertex = gl::VERTEX_SHADER as isize,
    Fragment = gl::FRAGMENT_SHADER as isize,
}

impl GlShaderType {
    pub fn gl_enum(self) -> GLenum { self as GLenum }

    /// The label used in diagnostics, e.g. `VERTEX`.
    pub fn label(self) -> &'static str {
        match self {
            GlShaderType::Vertex => "VERTEX",
            GlShaderType::Fragment => "FRAGMENT",
        }
    }
}

impl fmt::Display for GlShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The subset of the OpenGL API used to build shader programs and feed them uniforms.
///
/// Methods mirror the GL entry points one-to-one (`create_shader` is `glCreateShader`, and so on)
/// so that implementations stay dumb. Info logs come back whole; bounding them for display is the
/// caller's job.
pub trait GlApi {
    fn create_shader(&mut self, kind: GlShaderType) -> GlObject;
    fn shader_source(&mut self, shader: GlObject, source: &str);
    fn compile_shader(&mut self, shader: GlObject);
    fn shader_compile_status(&mut self, shader: GlObject) -> bool;
    fn shader_info_log(&mut self, shader: GlObject) -> String;
    fn delete_shader(&mut self, shader: GlObject);

    fn create_program(&mut self) -> GlObject;
    fn attach_shader(&mut self, program: GlObject, shader: GlObject);
    fn link_program(&mut self, program: GlObject);
    fn program_link_status(&mut self, program: GlObject) -> bool;
    fn program_info_log(&mut self, program: GlObject) -> String;
    fn use_program(&mut self, program: GlObject);
    fn delete_program(&mut self, program: GlObject);

    /// Looks `name` up in `program`. Unknown names yield [`INVALID_UNIFORM_LOCATION`].
    fn uniform_location(&mut self, program: GlObject, name: &str) -> GlUniformLocation;

    // The uniform writers below target whichever program is current, not a program argument.
    fn uniform_1i(&mut self, location: GlUniformLocation, value: GLint);
    fn uniform_1f(&mut self, location: GlUniformLocation, value: GLfloat);
    fn uniform_4f(&mut self, location: GlUniformLocation, value: [GLfloat; 4]);
    fn uniform_matrix_4fv(&mut self, location: GlUniformLocation, value: &[GLfloat; 16]);
}
