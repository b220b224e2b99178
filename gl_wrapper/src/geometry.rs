use std::ffi::c_void;

use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        let vertices = vertex_count(self.data.len(), total_len)?;

        if let Some(indices) = self.indices {
            check_indices(indices, vertices)?;
        }

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (total_len * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            // The element buffer binding is recorded in the VAO.
            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    (indices.len() * std::mem::size_of::<u32>()) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        let elements = match self.indices {
            Some(indices) => indices.len(),
            None => vertices,
        };

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            elements,
        })
    }
}

fn vertex_count(data_len: usize, stride: usize) -> Result<usize, GeometryError> {
    if stride == 0 || data_len % stride != 0 {
        return Err(GeometryError::InvalidDataLength);
    }

    Ok(data_len / stride)
}

fn check_indices(indices: &[u32], vertices: usize) -> Result<(), GeometryError> {
    for index in indices {
        if *index as usize >= vertices {
            return Err(GeometryError::IndexOutOfBounds(*index));
        }
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {0} addresses no uploaded vertex")]
    IndexOutOfBounds(u32),
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    elements: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    /// Indices to draw for indexed geometry, vertices otherwise.
    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, (&ebo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_requires_whole_vertices() {
        assert_eq!(vertex_count(8, 2).unwrap(), 4);
        assert_eq!(vertex_count(12, 3).unwrap(), 4);
        assert!(matches!(
            vertex_count(7, 2),
            Err(GeometryError::InvalidDataLength)
        ));
        assert!(matches!(
            vertex_count(8, 0),
            Err(GeometryError::InvalidDataLength)
        ));
    }

    #[test]
    fn indices_must_address_uploaded_vertices() {
        assert!(check_indices(&[0, 1, 2, 2, 3, 0], 4).is_ok());
        assert!(matches!(
            check_indices(&[0, 1, 4], 4),
            Err(GeometryError::IndexOutOfBounds(4))
        ));
    }

    #[test]
    fn attribute_sizes() {
        assert_eq!(VertexAttribute::Float.size(), 1);
        assert_eq!(VertexAttribute::Vec2.size(), 2);
        assert_eq!(VertexAttribute::Vec3.size(), 3);
    }
}
