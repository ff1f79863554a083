/// Geometry primitives for 3D rendering
use crate::vector::{self, Vector3};

/// A triangle defined by three points
///
/// Winding order matters: the normal follows the right-hand rule over
/// `points[0] -> points[1] -> points[2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector3; 3],
}

impl Triangle {
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { points: [a, b, c] }
    }

    /// Unit face normal, `normalize((B - A) x (C - A))`.
    ///
    /// Zero-area triangles yield NaN components.
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = self.points;

        let ab = b - a;
        let ac = c - a;

        vector::normalize(ab.cross(&ac))
    }

    /// Copy of this triangle with `f` applied to every point.
    pub fn map<F>(&self, mut f: F) -> Triangle
    where
        F: FnMut(&Vector3) -> Vector3,
    {
        Triangle {
            points: [f(&self.points[0]), f(&self.points[1]), f(&self.points[2])],
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Unit cube centered on the origin.
    ///
    /// Faces are laid out on `[0, 1]` with outward winding and then shifted
    /// by -0.5 on every axis.
    pub fn cube() -> Self {
        const FACES: [[[f32; 3]; 3]; 12] = [
            // South (z = 0)
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            // East (x = 1)
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            // North (z = 1)
            [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            [[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
            // West (x = 0)
            [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            // Top (y = 1)
            [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            [[0.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            // Bottom (y = 0)
            [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]],
            [[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        ];

        let offset = Vector3::new(-0.5, -0.5, -0.5);
        let mut mesh = Self::with_capacity(FACES.len());

        for [a, b, c] in FACES {
            let triangle = Triangle::new(Vector3::from(a), Vector3::from(b), Vector3::from(c));
            mesh.add_triangle(triangle.map(|p| p + offset));
        }

        mesh
    }
}
