//! Thin RAII wrappers over the parts of OpenGL this project touches:
//! shader program building, vertex/index buffer upload and drawing.

#[rustfmt::skip]
pub const QUAD: [f32; 8] = [
    -1.0, -1.0,
    1.0, -1.0,
    1.0, 1.0,
    -1.0, 1.0,
];

/// Two triangles covering the quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Closed outline of the quad, drawn as a line strip.
pub const BORDER_INDICES: [u32; 5] = [0, 1, 2, 3, 0];

pub mod geometry;
pub mod program;
pub mod renderer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_address_quad_vertices() {
        let vertices = QUAD.len() as u32 / 2;
        assert!(QUAD_INDICES.iter().all(|i| *i < vertices));
        assert!(BORDER_INDICES.iter().all(|i| *i < vertices));
    }

    #[test]
    fn border_strip_is_closed() {
        assert_eq!(BORDER_INDICES.first(), BORDER_INDICES.last());
    }
}
