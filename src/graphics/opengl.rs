//! The real driver, plus thin wrappers over the buffer calls the sample programs need.
//!
//! Everything here is a direct call into the function pointers the `gl` crate loads, so a context
//! has to be current on this thread before any of it runs. [`GlFunctions::load_with`] does the
//! loading and is the only way to get hold of one.

use std::ffi::{c_void, CString};
use std::mem::size_of;
use std::ptr::null;

use gl::types::*;

use super::gl_types::*;
use super::utils::{create_ws_buffer_with_len, info_log_from_buffer};

/// [`GlApi`] backed by the loaded OpenGL function pointers.
pub struct GlFunctions {
    _loaded: (),
}

impl GlFunctions {
    /// Loads every GL entry point through `loader`, typically the context's `get_proc_address`.
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self { _loaded: () }
    }
}

impl GlApi for GlFunctions {
    fn create_shader(&mut self, kind: GlShaderType) -> GlObject {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn shader_source(&mut self, shader: GlObject, source: &str) {
        // An explicit length means the source needs no NUL terminator
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
        }
    }

    fn compile_shader(&mut self, shader: GlObject) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&mut self, shader: GlObject) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&mut self, shader: GlObject) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }

        let mut buf = create_ws_buffer_with_len(len as usize);
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        }

        info_log_from_buffer(buf, written.max(0) as usize)
    }

    fn delete_shader(&mut self, shader: GlObject) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&mut self) -> GlObject {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: GlObject, shader: GlObject) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&mut self, program: GlObject) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&mut self, program: GlObject) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&mut self, program: GlObject) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }

        let mut buf = create_ws_buffer_with_len(len as usize);
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        }

        info_log_from_buffer(buf, written.max(0) as usize)
    }

    fn use_program(&mut self, program: GlObject) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&mut self, program: GlObject) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn uniform_location(&mut self, program: GlObject, name: &str) -> GlUniformLocation {
        // A name with an interior NUL can't name anything in GLSL
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetUniformLocation(program, name.as_ptr()) },
            Err(_) => INVALID_UNIFORM_LOCATION,
        }
    }

    fn uniform_1i(&mut self, location: GlUniformLocation, value: GLint) {
        unsafe { gl::Uniform1i(location, value) }
    }

    fn uniform_1f(&mut self, location: GlUniformLocation, value: GLfloat) {
        unsafe { gl::Uniform1f(location, value) }
    }

    fn uniform_4f(&mut self, location: GlUniformLocation, [x, y, z, w]: [GLfloat; 4]) {
        unsafe { gl::Uniform4f(location, x, y, z, w) }
    }

    fn uniform_matrix_4fv(&mut self, location: GlUniformLocation, value: &[GLfloat; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) }
    }
}

pub enum GlBufferType {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize,
}

/// A vertex array object (VAO), which remembers the buffer bindings and attribute layout set up
/// while it's bound, so drawing only needs to bind it again.
pub struct GlVertexArray {
    id: u32,
}

impl GlVertexArray {
    pub fn id(&self) -> u32 { self.id }

    pub fn generate() -> Self {
        let mut vao = 0u32;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        Self { id: vao }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) }
    }

    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) }
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) }
    }
}

/// Represents a [vertex buffer object (VBO)](vbo): vertex data sent to the graphics card.
///
/// [vbo]: https://en.wikipedia.org/wiki/Vertex_buffer_object
pub struct GlVertexBuffer {
    id: u32,
}

impl GlVertexBuffer {
    pub fn id(&self) -> u32 { self.id }

    pub fn init(data: &[f32]) -> Self {
        let vbo = Self::generate();
        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * size_of::<f32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        vbo
    }

    pub fn generate() -> Self {
        let mut vbo = 0u32;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        Self { id: vbo }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id) }
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

/// An element buffer object (EBO): a list of vertex indices, so shared vertices of adjacent
/// triangles are only uploaded once.
pub struct GlElementBuffer {
    id: u32,
    len: usize,
}

impl GlElementBuffer {
    pub fn id(&self) -> u32 { self.id }

    /// Number of indices uploaded.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Uploads `data`. The element binding is captured by whichever vertex array is bound, so bind
    /// that first.
    pub fn init(data: &[u32]) -> Self {
        let mut ebo = 0u32;
        unsafe {
            gl::GenBuffers(1, &mut ebo);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (data.len() * size_of::<u32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        Self { id: ebo, len: data.len() }
    }
}

impl Drop for GlElementBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

pub fn unbind_buffers(buffer_type: GlBufferType) {
    unsafe { gl::BindBuffer(buffer_type as GLenum, 0) }
}

/// Describes attribute `index` as `size` floats starting `offset` floats into each vertex of
/// `stride` floats, reading from the bound array buffer.
pub fn set_vertex_attrib(index: u32, offset: usize, size: i32, stride: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size,
            gl::FLOAT,
            gl::FALSE,
            (stride * size_of::<f32>()) as GLsizei,
            (offset * size_of::<f32>()) as *const c_void,
        );
        gl::EnableVertexAttribArray(index);
    }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) }
}

pub fn clear(rgba: [f32; 4]) {
    unsafe {
        gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    }
}

pub fn set_wireframe(enabled: bool) {
    let mode = if enabled { gl::LINE } else { gl::FILL };
    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) }
}

pub fn draw_triangles(first: i32, count: usize) {
    unsafe { gl::DrawArrays(gl::TRIANGLES, first, count as GLsizei) }
}

pub fn draw_elements(count: usize) {
    unsafe { gl::DrawElements(gl::TRIANGLES, count as GLsizei, gl::UNSIGNED_INT, null()) }
}
