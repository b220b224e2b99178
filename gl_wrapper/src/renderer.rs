use crate::geometry::Geometry;
use crate::program::Program;

#[derive(Copy, Clone)]
pub enum Primitive {
    Triangles,
    LineStrip,
}

impl Primitive {
    fn gl_mode(&self) -> gl::types::GLenum {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::LineStrip => gl::LINE_STRIP,
        }
    }
}

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program, primitive: Primitive) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }

        unsafe {
            gl::BindVertexArray(geometry.vao());

            if geometry.is_indexed() {
                gl::DrawElements(
                    primitive.gl_mode(),
                    geometry.elements() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                );
            } else {
                gl::DrawArrays(primitive.gl_mode(), 0, geometry.elements() as i32);
            }
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn enable_alpha_blending(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
