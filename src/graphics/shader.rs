//! Building a shader program out of a vertex and a fragment source file.
//!
//! Construction never fails outright. Each problem along the way (an unreadable file, a stage
//! that doesn't compile, a pair that doesn't link) is logged as soon as it happens and recorded
//! on the program, and construction carries on with whatever it has. Callers that would rather
//! stop can check [`ShaderProgram::is_valid`] or call [`ShaderProgram::into_result`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use thiserror::Error;

use super::context::GlContext;
use super::gl_types::*;
use super::utils::truncate_info_log;

/// Something that went wrong while building a program. The `Display` form is what gets logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("ERROR::SHADER::FILE_NOT_SUCCESSFULLY_READ: {}: {reason}", .path.display())]
    FileRead {
        stage: GlShaderType,
        path: PathBuf,
        reason: String,
    },

    #[error("ERROR::SHADER_COMPILATION_ERROR of type: {stage}\n{log}\n -- --------------------------------------------------- -- ")]
    Compile { stage: GlShaderType, log: String },

    #[error("ERROR::PROGRAM_LINKING_ERROR of type: PROGRAM\n{log}\n -- --------------------------------------------------- -- ")]
    Link { log: String },
}

impl Diagnostic {
    /// `VERTEX`, `FRAGMENT` or `PROGRAM`.
    pub fn label(&self) -> &'static str {
        match self {
            Diagnostic::FileRead { stage, .. } | Diagnostic::Compile { stage, .. } => stage.label(),
            Diagnostic::Link { .. } => "PROGRAM",
        }
    }
}

/// Returned by [`ShaderProgram::into_result`] when construction recorded any diagnostics. The
/// program is handed back so its handle can still be released.
#[derive(Debug, Error)]
#[error("shader program {} failed to build with {} diagnostic(s)", .program.id(), .program.diagnostics().len())]
pub struct BuildError {
    program: ShaderProgram,
}

impl BuildError {
    pub fn diagnostics(&self) -> &[Diagnostic] { self.program.diagnostics() }

    pub fn into_program(self) -> ShaderProgram { self.program }
}

/// A linked vertex + fragment program.
///
/// The handle isn't released on drop, since that needs the context. Call
/// [`delete`](ShaderProgram::delete) when you're done with it.
#[derive(Debug)]
pub struct ShaderProgram {
    id: GlObject,
    linked: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ShaderProgram {
    /// Reads, compiles and links the two shader files.
    pub fn new<A: GlApi>(
        ctx: &mut GlContext<A>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Self {
        let mut diagnostics = Vec::new();

        let vertex_src = read_source(GlShaderType::Vertex, vertex_path.as_ref(), &mut diagnostics);
        let fragment_src = read_source(GlShaderType::Fragment, fragment_path.as_ref(), &mut diagnostics);

        // The pair is read as a unit: if either file failed, neither stage gets any source
        let (vertex_src, fragment_src) = match (vertex_src, fragment_src) {
            (Some(vertex), Some(fragment)) => (vertex, fragment),
            _ => (String::new(), String::new()),
        };

        let mut program = Self::from_sources(ctx, &vertex_src, &fragment_src);
        diagnostics.append(&mut program.diagnostics);
        program.diagnostics = diagnostics;

        program
    }

    /// Compiles and links two in-memory sources.
    pub fn from_sources<A: GlApi>(ctx: &mut GlContext<A>, vertex_src: &str, fragment_src: &str) -> Self {
        let mut diagnostics = Vec::new();
        let api = ctx.api_mut();

        let vertex = compile_stage(api, GlShaderType::Vertex, vertex_src, &mut diagnostics);
        let fragment = compile_stage(api, GlShaderType::Fragment, fragment_src, &mut diagnostics);

        let id = api.create_program();
        api.attach_shader(id, vertex);
        api.attach_shader(id, fragment);
        api.link_program(id);

        let linked = api.program_link_status(id);
        if !linked {
            let log = api.program_info_log(id);
            report(&mut diagnostics, Diagnostic::Link { log: truncate_info_log(&log).to_owned() });
        }

        // The program keeps what it needs once linked
        api.delete_shader(vertex);
        api.delete_shader(fragment);

        if linked {
            debug!("Linked shader program {}", id);
        }

        Self { id, linked, diagnostics }
    }

    pub fn id(&self) -> GlObject { self.id }

    /// Whether the program linked.
    pub fn is_valid(&self) -> bool { self.linked }

    /// Everything logged while building the program, in the order it happened.
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Treats any diagnostic as a failure.
    pub fn into_result(self) -> Result<Self, BuildError> {
        if self.linked && self.diagnostics.is_empty() {
            Ok(self)
        } else {
            Err(BuildError { program: self })
        }
    }

    /// Makes this the program subsequent draw calls use.
    pub fn activate<A: GlApi>(&self, ctx: &mut GlContext<A>) {
        ctx.use_program(self.id);
    }

    /// Releases the program object.
    pub fn delete<A: GlApi>(self, ctx: &mut GlContext<A>) {
        ctx.delete_program(self.id);
    }

    // The setters look the name up in this program but the write lands in whichever program the
    // context has current. Activate first. Names the program doesn't declare are ignored.

    pub fn set_bool<A: GlApi>(&self, ctx: &mut GlContext<A>, name: &str, value: bool) {
        let api = ctx.api_mut();
        let location = api.uniform_location(self.id, name);
        api.uniform_1i(location, value as i32);
    }

    pub fn set_int<A: GlApi>(&self, ctx: &mut GlContext<A>, name: &str, value: i32) {
        let api = ctx.api_mut();
        let location = api.uniform_location(self.id, name);
        api.uniform_1i(location, value);
    }

    pub fn set_float<A: GlApi>(&self, ctx: &mut GlContext<A>, name: &str, value: f32) {
        let api = ctx.api_mut();
        let location = api.uniform_location(self.id, name);
        api.uniform_1f(location, value);
    }

    pub fn set_vec4<A: GlApi>(&self, ctx: &mut GlContext<A>, name: &str, value: [f32; 4]) {
        let api = ctx.api_mut();
        let location = api.uniform_location(self.id, name);
        api.uniform_4f(location, value);
    }

    /// `value` is column-major, as GLSL expects.
    pub fn set_mat4<A: GlApi>(&self, ctx: &mut GlContext<A>, name: &str, value: &[f32; 16]) {
        let api = ctx.api_mut();
        let location = api.uniform_location(self.id, name);
        api.uniform_matrix_4fv(location, value);
    }
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    error!("{}", diagnostic);
    diagnostics.push(diagnostic);
}

/// Reports an unreadable file and yields `None` for it.
fn read_source(stage: GlShaderType, path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(e) => {
            report(diagnostics, Diagnostic::FileRead {
                stage,
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            None
        }
    }
}

fn compile_stage<A: GlApi>(
    api: &mut A,
    stage: GlShaderType,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> GlObject {
    let id = api.create_shader(stage);
    api.shader_source(id, source);
    api.compile_shader(id);

    if !api.shader_compile_status(id) {
        let log = api.shader_info_log(id);
        report(diagnostics, Diagnostic::Compile { stage, log: truncate_info_log(&log).to_owned() });
    }

    id
}
