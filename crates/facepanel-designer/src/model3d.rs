//! # 3D Model Module
//!
//! Triangle mesh used for the panel solid.
//!
//! ## Features
//! - Mesh construction from triangles or from an STL indexed mesh
//! - Bounding box tracking
//! - Coordinate transformation, translation and re-centering
//! - Flat position/normal/index buffers for renderers

use nalgebra::{Matrix4, Point3, Vector3};
use tracing::debug;

fn face_normal(v1: &Point3<f32>, v2: &Point3<f32>, v3: &Point3<f32>) -> Vector3<f32> {
    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    edge1
        .cross(&edge2)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// A 3D triangle made up of three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
}

impl Triangle3D {
    /// Create a triangle; the normal follows the counter-clockwise winding
    pub fn new(v1: Point3<f32>, v2: Point3<f32>, v3: Point3<f32>) -> Self {
        let normal = face_normal(&v1, &v2, &v3);
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }

    /// Get bounding box of the triangle
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices[1..] {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    /// Twice the triangle area
    pub fn doubled_area(&self) -> f32 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).norm()
    }
}

/// A 3D mesh model
#[derive(Debug, Clone)]
pub struct Mesh3D {
    pub triangles: Vec<Triangle3D>,
    pub bounds_min: Point3<f32>,
    pub bounds_max: Point3<f32>,
}

impl Mesh3D {
    pub fn new(triangles: Vec<Triangle3D>) -> Self {
        let mut mesh = Self {
            triangles,
            bounds_min: Point3::new(0.0, 0.0, 0.0),
            bounds_max: Point3::new(0.0, 0.0, 0.0),
        };
        mesh.calculate_bounds();
        mesh
    }

    pub fn from_stl_mesh(stl_mesh: &stl_io::IndexedMesh) -> Self {
        let vertex_count = stl_mesh.vertices.len();
        let triangles = stl_mesh
            .faces
            .iter()
            .filter(|face| face.vertices.iter().all(|&i| i < vertex_count))
            .map(|face| {
                let [a, b, c] = face.vertices.map(|i| {
                    let v = stl_mesh.vertices[i];
                    Point3::new(v[0], v[1], v[2])
                });
                Triangle3D::new(a, b, c)
            })
            .collect();

        Self::new(triangles)
    }

    fn calculate_bounds(&mut self) {
        let Some((first, rest)) = self.triangles.split_first() else {
            return;
        };

        let (mut min, mut max) = first.bounds();
        for triangle in rest {
            let (tri_min, tri_max) = triangle.bounds();
            min.x = min.x.min(tri_min.x);
            min.y = min.y.min(tri_min.y);
            min.z = min.z.min(tri_min.z);
            max.x = max.x.max(tri_max.x);
            max.y = max.y.max(tri_max.y);
            max.z = max.z.max(tri_max.z);
        }

        self.bounds_min = min;
        self.bounds_max = max;
    }

    /// Transform the mesh using a 4x4 transformation matrix
    pub fn transform(&mut self, transform: &Matrix4<f32>) {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                *vertex = transform.transform_point(vertex);
            }
            let [v1, v2, v3] = &triangle.vertices;
            triangle.normal = face_normal(v1, v2, v3);
        }

        self.calculate_bounds();
    }

    /// Translate the mesh
    pub fn translate(&mut self, offset: Vector3<f32>) {
        let transform = Matrix4::new_translation(&offset);
        self.transform(&transform);
    }

    /// Center the mesh's bounding box on the origin
    pub fn center(&mut self) {
        let center = (self.bounds_min + self.bounds_max.coords) * 0.5;
        debug!("Centering mesh, offset {:?}", center);
        self.translate(-center.coords);
    }

    /// Extent of the bounding box
    pub fn size(&self) -> Vector3<f32> {
        self.bounds_max - self.bounds_min
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flat-shaded render buffers, three vertices per triangle
    pub fn to_buffers(&self) -> MeshBuffers {
        let mut buffers = MeshBuffers {
            positions: Vec::with_capacity(self.triangles.len() * 3),
            normals: Vec::with_capacity(self.triangles.len() * 3),
            indices: Vec::with_capacity(self.triangles.len() * 3),
        };

        for triangle in &self.triangles {
            let normal = [triangle.normal.x, triangle.normal.y, triangle.normal.z];
            for vertex in &triangle.vertices {
                buffers.indices.push(buffers.positions.len() as u32);
                buffers.positions.push([vertex.x, vertex.y, vertex.z]);
                buffers.normals.push(normal);
            }
        }

        buffers
    }
}

/// Position, normal and index buffers ready for upload to a renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
