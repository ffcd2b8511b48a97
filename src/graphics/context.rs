use super::gl_types::{GlApi, GlObject};

/// A current OpenGL context, as far as shader programs are concerned.
///
/// OpenGL keeps a single "current program" per context, and every draw call and uniform write goes
/// to it. Rather than leave that hidden in driver state, the context tracks it here, and the only
/// way to change it is [`use_program`](GlContext::use_program). Everything that touches the driver
/// borrows the context mutably, so there's never more than one caller at a time.
pub struct GlContext<A: GlApi> {
    api: A,
    current_program: GlObject,
}

impl<A: GlApi> GlContext<A> {
    /// Wraps a driver whose context has already been made current.
    pub fn new(api: A) -> Self {
        Self { api, current_program: 0 }
    }

    pub fn api(&self) -> &A { &self.api }

    pub(crate) fn api_mut(&mut self) -> &mut A { &mut self.api }

    /// The program the next draw call will run, or `0` if none is bound.
    pub fn current_program(&self) -> GlObject { self.current_program }

    pub fn use_program(&mut self, program: GlObject) {
        self.api.use_program(program);
        self.current_program = program;
    }

    /// Deletes a program, unbinding it first if it's the current one.
    pub fn delete_program(&mut self, program: GlObject) {
        if program != 0 && self.current_program == program {
            self.use_program(0);
        }

        self.api.delete_program(program);
    }
}
