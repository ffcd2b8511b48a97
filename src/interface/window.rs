use std::path::Path;

use glutin::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
    Api, ContextBuilder, ContextError, CreationError, GlProfile, GlRequest,
};
use log::{debug, error, info};
use thiserror::Error;

use crate::graphics::opengl::set_viewport;
use crate::graphics::scene::Scene;
use crate::graphics::{BuildError, GlContext, GlFunctions, ShaderProgram};
use crate::interface::cli::Config;

const GL_VERSION: (u8, u8) = (3, 3);

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create an OpenGL context: {0}")]
    Creation(#[from] CreationError),

    #[error("failed to make the OpenGL context current: {0}")]
    MakeCurrent(#[from] ContextError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

fn context_builder<'a>() -> ContextBuilder<'a, glutin::NotCurrent> {
    ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
        .with_gl_profile(GlProfile::Core)
}

/// Opens the window and runs the demo until it's closed or Escape is pressed. Only returns on
/// setup failure.
pub fn run(config: Config) -> Result<(), WindowError> {
    let events = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .with_resizable(config.resizable);

    let win_context = context_builder().build_windowed(window, &events)?;
    let win_context = unsafe { win_context.make_current().map_err(|(_, e)| e)? };

    let api = GlFunctions::load_with(|s| win_context.get_proc_address(s) as *const _);
    let mut ctx = GlContext::new(api);

    let size = win_context.window().inner_size();
    set_viewport(size.width, size.height);

    let mut scene = Some(Scene::new(&mut ctx, config.demo, &config.vertex, &config.fragment, config.wireframe));

    events.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input: KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        ..
                    },
                    ..
                } => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    win_context.resize(size);
                    set_viewport(size.width, size.height);
                }
                _ => {}
            },
            Event::MainEventsCleared => win_context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                if let Some(scene) = &scene {
                    scene.draw(&mut ctx);
                }
                if let Err(e) = win_context.swap_buffers() {
                    error!("Failed to swap buffers: {}", e);
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => {
                if let Some(scene) = scene.take() {
                    debug!("Releasing the '{}' demo", scene.demo());
                    scene.delete(&mut ctx);
                }
                info!("Window closed");
            }
            _ => {}
        }
    })
}

/// Builds a shader program against an invisible context, failing if anything was reported.
pub fn check(vertex: &Path, fragment: &Path) -> Result<(), WindowError> {
    let events = EventLoop::new();
    let context = context_builder().build_headless(&events, PhysicalSize::new(1, 1))?;
    let context = unsafe { context.make_current().map_err(|(_, e)| e)? };

    let api = GlFunctions::load_with(|s| context.get_proc_address(s) as *const _);
    let mut ctx = GlContext::new(api);

    let program = ShaderProgram::new(&mut ctx, vertex, fragment).into_result()?;
    info!("{} + {} linked cleanly", vertex.display(), fragment.display());
    program.delete(&mut ctx);

    Ok(())
}
