use serde::{Deserialize, Serialize};

use rbe_types::{Point3d, Vec3};

use crate::errors::AssemblyError;

/// A single rigid polyhedral unit of an assembly.
///
/// Faces are index loops into `vertices`, counter-clockwise when viewed
/// from outside, without repeating the first vertex. Identity is assigned
/// by the owning assembly; a block on its own is anonymous geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Vec<usize>>,
}

impl Block {
    pub fn new(vertices: Vec<Point3d>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Check that every face is a loop of at least 3 in-range vertex indices.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        for (f, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(AssemblyError::DegenerateFace {
                    face: f,
                    count: face.len(),
                });
            }
            for &v in face {
                if v >= self.vertices.len() {
                    return Err(AssemblyError::FaceVertexOutOfRange {
                        face: f,
                        vertex: v,
                        count: self.vertices.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Signed volume of the closed polyhedron via the divergence theorem.
    ///
    /// Each face is fan-triangulated from its first vertex; consistent
    /// outward-facing loops yield a positive volume.
    pub fn volume(&self) -> f64 {
        let mut six_v = 0.0;
        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            let a = self.vertices[face[0]].to_vec3();
            for i in 1..face.len() - 1 {
                let b = self.vertices[face[i]].to_vec3();
                let c = self.vertices[face[i + 1]].to_vec3();
                six_v += a.dot(&b.cross(&c));
            }
        }
        six_v / 6.0
    }

    /// Centroid of the vertex positions.
    pub fn centroid(&self) -> Point3d {
        if self.vertices.is_empty() {
            return Point3d::ORIGIN;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.to_vec3());
        let n = self.vertices.len() as f64;
        Point3d::new(sum.x / n, sum.y / n, sum.z / n)
    }

    /// Unique undirected edges derived from the face loops, each as an
    /// ordered `(lo, hi)` index pair, sorted. Used for wireframe drawing.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut set = std::collections::BTreeSet::new();
        for face in &self.faces {
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                set.insert((a.min(b), a.max(b)));
            }
        }
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Axis-aligned box from (0,0,0) to (w,h,d) with outward face loops.
    fn make_box(w: f64, h: f64, d: f64) -> Block {
        let vertices = vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(w, 0.0, 0.0),
            Point3d::new(w, h, 0.0),
            Point3d::new(0.0, h, 0.0),
            Point3d::new(0.0, 0.0, d),
            Point3d::new(w, 0.0, d),
            Point3d::new(w, h, d),
            Point3d::new(0.0, h, d),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom, normal -z
            vec![4, 5, 6, 7], // top, normal +z
            vec![0, 1, 5, 4], // front, normal -y
            vec![2, 3, 7, 6], // back, normal +y
            vec![1, 2, 6, 5], // right, normal +x
            vec![0, 4, 7, 3], // left, normal -x
        ];
        Block::new(vertices, faces)
    }

    #[test]
    fn test_box_volume() {
        let b = make_box(2.0, 3.0, 4.0);
        approx::assert_relative_eq!(b.volume(), 24.0, max_relative = 1e-12);
    }

    #[test]
    fn test_box_centroid() {
        let b = make_box(2.0, 2.0, 2.0);
        let c = b.centroid();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 1.0).abs() < 1e-12);
        assert!((c.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_box_edge_count() {
        let b = make_box(1.0, 1.0, 1.0);
        assert_eq!(b.edges().len(), 12);
    }

    #[test]
    fn test_validate_catches_out_of_range_index() {
        let b = Block::new(vec![Point3d::ORIGIN], vec![vec![0, 0, 9]]);
        assert!(matches!(
            b.validate(),
            Err(AssemblyError::FaceVertexOutOfRange { vertex: 9, .. })
        ));
    }

    #[test]
    fn test_validate_catches_degenerate_face() {
        let b = Block::new(
            vec![Point3d::ORIGIN, Point3d::new(1.0, 0.0, 0.0)],
            vec![vec![0, 1]],
        );
        assert!(matches!(
            b.validate(),
            Err(AssemblyError::DegenerateFace { count: 2, .. })
        ));
    }

    #[test]
    fn test_tetrahedron_volume() {
        // Unit right tetrahedron: V = 1/6.
        let vertices = vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
        ];
        let faces = vec![
            vec![0, 2, 1],
            vec![0, 1, 3],
            vec![0, 3, 2],
            vec![1, 2, 3],
        ];
        let b = Block::new(vertices, faces);
        approx::assert_relative_eq!(b.volume(), 1.0 / 6.0, max_relative = 1e-12);
    }
}
