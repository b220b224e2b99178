use std::ffi::CString;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Instant;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::{GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramError, Shader, ShaderKind, ShaderSource};
use gl_wrapper::renderer::{GlRenderer, Primitive};
use gl_wrapper::{BORDER_INDICES, QUAD, QUAD_INDICES};

use crate::args::Args;
use crate::view::ViewConfig;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    program: Program,
    view: ViewConfig,
}

impl App {
    pub fn new(args: &Args, view: ViewConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(args.width, args.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title("Ember");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .unwrap();

        let handle = window.as_ref().map(|w| w.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
            .build(handle);

        let gl_window = GlWindow::new(window.unwrap(), &gl_config);

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attr)
                .unwrap()
        }
        .make_current(&gl_window.surface)
        .unwrap();

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        let program = build_program(&args.vertex, &args.fragment)?;

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            program,
            view,
        })
    }

    pub fn run(self) -> ! {
        let fill = GeometryBuilder::new(&QUAD)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&QUAD_INDICES)
            .build()
            .unwrap();

        let border = GeometryBuilder::new(&QUAD)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&BORDER_INDICES)
            .build()
            .unwrap();

        let mut gl_renderer = GlRenderer::new();
        gl_renderer.enable_alpha_blending();

        let started = Instant::now();

        self.event_loop
            .run(move |event, _window_target, control_flow| {
                *control_flow = ControlFlow::Wait;
                match event {
                    Event::RedrawEventsCleared => {
                        self.gl_window.window.request_redraw();
                        self.gl_window
                            .surface
                            .swap_buffers(&self.gl_context)
                            .unwrap();
                    }
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::Resized(size) => {
                            if size.width != 0 && size.height != 0 {
                                self.gl_window.surface.resize(
                                    &self.gl_context,
                                    NonZeroU32::new(size.width).unwrap(),
                                    NonZeroU32::new(size.height).unwrap(),
                                );
                                gl_renderer.resize(size.width, size.height);
                            }
                        }
                        WindowEvent::CloseRequested => {
                            control_flow.set_exit();
                        }
                        _ => (),
                    },
                    Event::RedrawRequested(_) => {
                        gl_renderer.clear_color(0.0, 0.0, 0.0);

                        self.program.set_vec2("center", self.view.center.into());
                        self.program.set_f32("scale", self.view.scale);
                        self.program.set_f32("time", started.elapsed().as_secs_f32());

                        self.program.set_i32("is_border", 0);
                        gl_renderer.draw(&fill, &self.program, Primitive::Triangles);

                        self.program.set_i32("is_border", 1);
                        gl_renderer.draw(&border, &self.program, Primitive::LineStrip);
                    }
                    _ => (),
                }
            })
    }
}

/// Loader -> compiler -> linker. Any failure short-circuits, so nothing
/// is ever compiled after a failed load, or linked after a failed compile.
fn build_program(vertex: &Path, fragment: &Path) -> Result<Program, ProgramError> {
    let vert_src = ShaderSource::load(vertex)?;
    let vert = Shader::compile(&vert_src, ShaderKind::Vertex)?;

    let frag_src = ShaderSource::load(fragment)?;
    let frag = Shader::compile(&frag_src, ShaderKind::Fragment)?;

    Program::link(vert, frag)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Self {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe {
            config
                .display()
                .create_window_surface(config, &attrs)
                .unwrap()
        };

        Self { window, surface }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Program(#[from] ProgramError),
}
