//! A software stand-in for the driver so the shader wrapper can be tested without a GPU.
//!
//! It doesn't parse GLSL. It accepts anything that has a `#version` line, a `main` function and
//! balanced brackets, refuses to link a vertex stage that never writes `gl_Position`, and
//! assigns uniform locations from `uniform <type> <name>;` declarations. That's enough to drive
//! every path through the wrapper.

use std::collections::HashMap;

use super::gl_types::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
}

struct MockShader {
    kind: GlShaderType,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct MockProgram {
    attached: Vec<GlObject>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
    values: HashMap<GlUniformLocation, UniformValue>,
    deleted: bool,
}

pub struct MockGl {
    next_object: GlObject,
    shaders: HashMap<GlObject, MockShader>,
    programs: HashMap<GlObject, MockProgram>,
    bound: GlObject,
    use_program_calls: usize,
    deleted_shaders: Vec<GlObject>,
    log_repeat: usize,
}

impl MockGl {
    pub fn new() -> Self {
        Self {
            next_object: 1,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            bound: 0,
            use_program_calls: 0,
            deleted_shaders: Vec::new(),
            log_repeat: 1,
        }
    }

    /// Repeats every info log line `times` times, for drivers that don't know when to stop.
    pub fn with_log_repeat(mut self, times: usize) -> Self {
        self.log_repeat = times.max(1);
        self
    }

    pub fn bound_program(&self) -> GlObject { self.bound }

    pub fn use_program_calls(&self) -> usize { self.use_program_calls }

    pub fn deleted_shaders(&self) -> &[GlObject] { &self.deleted_shaders }

    pub fn live_shaders(&self) -> usize { self.shaders.len() }

    pub fn is_program_deleted(&self, program: GlObject) -> bool {
        self.programs.get(&program).map_or(false, |p| p.deleted)
    }

    pub fn attached_shaders(&self, program: GlObject) -> Vec<GlObject> {
        self.programs.get(&program).map(|p| p.attached.clone()).unwrap_or_default()
    }

    /// The value last written to `name` in `program`, if any.
    pub fn uniform_value(&self, program: GlObject, name: &str) -> Option<UniformValue> {
        let program = self.programs.get(&program)?;
        let location = program.uniforms.iter().position(|u| u == name)? as GlUniformLocation;
        program.values.get(&location).copied()
    }

    /// Total number of uniform writes that actually landed somewhere.
    pub fn stored_uniform_values(&self) -> usize {
        self.programs.values().map(|p| p.values.len()).sum()
    }

    fn allocate(&mut self) -> GlObject {
        let id = self.next_object;
        self.next_object += 1;
        id
    }

    fn repeat_log(&self, line: &str) -> String {
        let mut log = String::new();
        for _ in 0..self.log_repeat {
            log.push_str(line);
            log.push('\n');
        }
        log
    }

    fn check_source(source: &str) -> Result<(), String> {
        if source.trim().is_empty() {
            return Err("0:1(1): error: syntax error, unexpected end of file".to_owned());
        }

        if !source.trim_start().starts_with("#version") {
            return Err("0:1(1): error: missing #version directive".to_owned());
        }

        let mut depth = 0i32;
        for (line_no, line) in source.lines().enumerate() {
            for c in line.chars() {
                match c {
                    '{' | '(' => depth += 1,
                    '}' | ')' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    return Err(format!("0:{}(1): error: syntax error, unexpected '{}'", line_no + 1, c));
                }
            }
        }
        if depth != 0 {
            return Err("0:1(1): error: syntax error, unexpected end of file".to_owned());
        }

        if !source.contains("void main") {
            return Err("error: no function with name 'main'".to_owned());
        }

        Ok(())
    }

    fn declared_uniforms(source: &str) -> Vec<String> {
        source
            .lines()
            .filter_map(|line| {
                let mut words = line.split_whitespace();
                if words.next()? != "uniform" {
                    return None;
                }
                let _ty = words.next()?;
                let name = words.next()?.trim_end_matches(';');
                Some(name.to_owned())
            })
            .collect()
    }

    fn store(&mut self, location: GlUniformLocation, value: UniformValue) {
        if location == INVALID_UNIFORM_LOCATION {
            return;
        }

        if let Some(program) = self.programs.get_mut(&self.bound) {
            if program.linked && (location as usize) < program.uniforms.len() {
                program.values.insert(location, value);
            }
        }
    }
}

impl GlApi for MockGl {
    fn create_shader(&mut self, kind: GlShaderType) -> GlObject {
        let id = self.allocate();
        self.shaders.insert(id, MockShader { kind, source: String::new(), compiled: false, log: String::new() });
        id
    }

    fn shader_source(&mut self, shader: GlObject, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.source = source.to_owned();
        }
    }

    fn compile_shader(&mut self, shader: GlObject) {
        let result = match self.shaders.get(&shader) {
            Some(s) => Self::check_source(&s.source),
            None => return,
        };
        let log = match &result {
            Ok(()) => String::new(),
            Err(line) => self.repeat_log(line),
        };

        if let Some(s) = self.shaders.get_mut(&shader) {
            s.compiled = result.is_ok();
            s.log = log;
        }
    }

    fn shader_compile_status(&mut self, shader: GlObject) -> bool {
        self.shaders.get(&shader).map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&mut self, shader: GlObject) -> String {
        self.shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: GlObject) {
        if self.shaders.remove(&shader).is_some() {
            self.deleted_shaders.push(shader);
        }
    }

    fn create_program(&mut self) -> GlObject {
        let id = self.allocate();
        self.programs.insert(id, MockProgram::default());
        id
    }

    fn attach_shader(&mut self, program: GlObject, shader: GlObject) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: GlObject) {
        let attached = match self.programs.get(&program) {
            Some(p) => p.attached.clone(),
            None => return,
        };

        let mut error = None;
        let mut uniforms = Vec::new();
        let mut has_vertex = false;
        let mut has_fragment = false;

        for shader in attached.iter().filter_map(|id| self.shaders.get(id)) {
            if !shader.compiled {
                error = Some("error: linking with uncompiled/unspecialized shader".to_owned());
                break;
            }
            match shader.kind {
                GlShaderType::Vertex => {
                    has_vertex = true;
                    if !shader.source.contains("gl_Position") {
                        error = Some("error: vertex shader does not write to `gl_Position'".to_owned());
                    }
                }
                GlShaderType::Fragment => has_fragment = true,
            }
            for name in Self::declared_uniforms(&shader.source) {
                if !uniforms.contains(&name) {
                    uniforms.push(name);
                }
            }
        }

        if error.is_none() && !(has_vertex && has_fragment) {
            error = Some("error: program needs both a vertex and a fragment stage".to_owned());
        }

        let log = error.as_deref().map(|line| self.repeat_log(line)).unwrap_or_default();
        if let Some(p) = self.programs.get_mut(&program) {
            p.linked = error.is_none();
            p.log = log;
            p.uniforms = if p.linked { uniforms } else { Vec::new() };
            p.values.clear();
        }
    }

    fn program_link_status(&mut self, program: GlObject) -> bool {
        self.programs.get(&program).map_or(false, |p| p.linked)
    }

    fn program_info_log(&mut self, program: GlObject) -> String {
        self.programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&mut self, program: GlObject) {
        self.use_program_calls += 1;
        self.bound = program;
    }

    fn delete_program(&mut self, program: GlObject) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.deleted = true;
        }
    }

    fn uniform_location(&mut self, program: GlObject, name: &str) -> GlUniformLocation {
        self.programs
            .get(&program)
            .filter(|p| p.linked)
            .and_then(|p| p.uniforms.iter().position(|u| u == name))
            .map_or(INVALID_UNIFORM_LOCATION, |i| i as GlUniformLocation)
    }

    fn uniform_1i(&mut self, location: GlUniformLocation, value: i32) {
        self.store(location, UniformValue::Int(value));
    }

    fn uniform_1f(&mut self, location: GlUniformLocation, value: f32) {
        self.store(location, UniformValue::Float(value));
    }

    fn uniform_4f(&mut self, location: GlUniformLocation, value: [f32; 4]) {
        self.store(location, UniformValue::Vec4(value));
    }

    fn uniform_matrix_4fv(&mut self, location: GlUniformLocation, value: &[f32; 16]) {
        self.store(location, UniformValue::Mat4(*value));
    }
}
