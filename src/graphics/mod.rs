//! A simple set of wrappers around the OpenGL API.
//!
//! Drawing a triangle takes dozens of cryptic, unsafe function calls, so this wraps the parts that
//! carry any logic (building a shader program and reporting why it didn't build) in a safe
//! interface, and keeps the rest as thin as possible.
//!
//! A knowledge of OpenGL is *necessary* to follow any of this. [Learn OpenGL](learnopengl) is a
//! classic set of tutorials with C++ examples, and there is
//! [a Rust port of all the example code](learnopengl-rs).
//!
//! [learnopengl]: https://learnopengl.com/
//! [learnopengl-rs]: https://github.com/bwasty/learn-opengl-rs

pub mod context;
pub mod gl_types;
pub mod opengl;
pub mod scene;
pub mod shader;
pub mod utils;

#[cfg(test)]
mod mock;

pub use self::context::GlContext;
pub use self::gl_types::{GlApi, GlShaderType};
pub use self::opengl::GlFunctions;
pub use self::shader::{BuildError, Diagnostic, ShaderProgram};
