//! The sample programs: a blank window, a triangle, an indexed quad and a triangle whose color is
//! pushed through a uniform every frame.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use log::{info, warn};

use super::context::GlContext;
use super::gl_types::GlApi;
use super::opengl::*;
use super::shader::ShaderProgram;

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
    0.0, 0.5, 0.0,
];

const QUAD: [f32; 12] = [
    0.5, 0.5, 0.0,
    0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.5, 0.5, 0.0,
];

const QUAD_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Window,
    Triangle,
    Quad,
    Uniform,
}

impl Demo {
    pub const ALL: [Demo; 4] = [Demo::Window, Demo::Triangle, Demo::Quad, Demo::Uniform];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Window => "window",
            Demo::Triangle => "triangle",
            Demo::Quad => "quad",
            Demo::Uniform => "uniform",
        }
    }

    pub fn needs_shaders(self) -> bool {
        self != Demo::Window
    }

    pub fn default_vertex_shader(self) -> PathBuf {
        shader_dir().join("basic.vert")
    }

    pub fn default_fragment_shader(self) -> PathBuf {
        match self {
            Demo::Uniform => shader_dir().join("uniform_color.frag"),
            _ => shader_dir().join("basic.frag"),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .iter()
            .copied()
            .find(|demo| demo.name() == s)
            .ok_or_else(|| format!("unknown demo '{}'", s))
    }
}

/// Relative to the working directory, like any other relative path on the command line.
fn shader_dir() -> PathBuf {
    PathBuf::from("shaders")
}

enum Geometry {
    None,
    Arrays {
        vao: GlVertexArray,
        _vbo: GlVertexBuffer,
        count: usize,
    },
    Elements {
        vao: GlVertexArray,
        _vbo: GlVertexBuffer,
        ebo: GlElementBuffer,
    },
}

impl Geometry {
    /// Uploads tightly packed xyz positions as attribute 0.
    fn upload(vertices: &[f32], indices: Option<&[u32]>) -> Self {
        let vao = GlVertexArray::generate();
        vao.bind();

        let vbo = GlVertexBuffer::init(vertices);
        let ebo = indices.map(GlElementBuffer::init);
        set_vertex_attrib(0, 0, 3, 3);

        unbind_buffers(GlBufferType::Array);
        GlVertexArray::unbind();

        match ebo {
            Some(ebo) => Geometry::Elements { vao, _vbo: vbo, ebo },
            None => Geometry::Arrays { vao, _vbo: vbo, count: vertices.len() / 3 },
        }
    }

    fn draw(&self) {
        match self {
            Geometry::None => {}
            Geometry::Arrays { vao, count, .. } => {
                vao.bind();
                draw_triangles(0, *count);
            }
            Geometry::Elements { vao, ebo, .. } => {
                vao.bind();
                draw_elements(ebo.len());
            }
        }
    }
}

/// Everything one demo needs on the GPU.
pub struct Scene {
    demo: Demo,
    program: Option<ShaderProgram>,
    geometry: Geometry,
    started: Instant,
}

impl Scene {
    pub fn new<A: GlApi>(
        ctx: &mut GlContext<A>,
        demo: Demo,
        vertex_path: &Path,
        fragment_path: &Path,
        wireframe: bool,
    ) -> Self {
        let program = if demo.needs_shaders() {
            let program = ShaderProgram::new(ctx, vertex_path, fragment_path);
            if !program.is_valid() {
                warn!("Shader program for '{}' is unusable, expect nothing to be drawn", demo);
            }
            Some(program)
        } else {
            None
        };

        let geometry = match demo {
            Demo::Window => Geometry::None,
            Demo::Triangle | Demo::Uniform => Geometry::upload(&TRIANGLE, None),
            Demo::Quad => Geometry::upload(&QUAD, Some(&QUAD_INDICES[..])),
        };

        set_wireframe(wireframe);
        info!("Running the '{}' demo", demo);

        Self { demo, program, geometry, started: Instant::now() }
    }

    pub fn demo(&self) -> Demo { self.demo }

    pub fn draw<A: GlApi>(&self, ctx: &mut GlContext<A>) {
        clear(CLEAR_COLOR);

        if let Some(program) = &self.program {
            program.activate(ctx);

            if self.demo == Demo::Uniform {
                let t = self.started.elapsed().as_secs_f32();
                let green = t.sin() / 2.0 + 0.5;
                program.set_vec4(ctx, "ourColor", [0.0, green, 0.0, 1.0]);
            }
        }

        self.geometry.draw();
    }

    /// Releases the shader program and the buffers.
    pub fn delete<A: GlApi>(self, ctx: &mut GlContext<A>) {
        if let Some(program) = self.program {
            program.delete(ctx);
        }
        drop(self.geometry);
    }
}
