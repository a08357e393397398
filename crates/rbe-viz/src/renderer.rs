//! The seam to the host scene graph.
//!
//! The pipeline hands fully-described primitives to a [`Renderer`] and
//! keeps only the returned opaque handles. [`RecordingRenderer`] is the
//! deterministic test double.

use std::collections::BTreeMap;

use rbe_types::{Color, Point3d};

/// Opaque handle to a drawn primitive. Valid only for the renderer that
/// issued it; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderHandle(pub u64);

/// A filled polygon. Points form a closed loop without repeating the
/// first point.
#[derive(Debug, Clone, PartialEq)]
pub struct FacePrimitive {
    pub points: Vec<Point3d>,
    pub color: Color,
    pub name: String,
}

/// A line segment, optionally arrow-headed at its end point.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub start: Point3d,
    pub end: Point3d,
    pub color: Color,
    pub name: String,
    pub arrow_end: bool,
}

/// A single marker point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    pub position: Point3d,
    pub color: Color,
    pub name: String,
}

pub trait Renderer {
    fn draw_face(&mut self, face: FacePrimitive) -> RenderHandle;
    fn draw_line(&mut self, line: LinePrimitive) -> RenderHandle;
    fn draw_point(&mut self, point: PointPrimitive) -> RenderHandle;

    /// Assign per-vertex colors to a previously drawn face. Returns
    /// `false` when the handle no longer resolves; the caller skips that
    /// item (lookup misses are non-fatal).
    fn set_vertex_colors(&mut self, handle: RenderHandle, colors: &[Color]) -> bool;

    /// Remove a primitive. Unknown handles are ignored.
    fn remove(&mut self, handle: RenderHandle);
}

/// In-memory renderer that records everything it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    faces: BTreeMap<RenderHandle, FacePrimitive>,
    lines: BTreeMap<RenderHandle, LinePrimitive>,
    points: BTreeMap<RenderHandle, PointPrimitive>,
    vertex_colors: BTreeMap<RenderHandle, Vec<Color>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> RenderHandle {
        self.next_handle += 1;
        RenderHandle(self.next_handle)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn faces(&self) -> impl Iterator<Item = &FacePrimitive> {
        self.faces.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.lines.values()
    }

    pub fn points(&self) -> impl Iterator<Item = &PointPrimitive> {
        self.points.values()
    }

    pub fn face_named(&self, name: &str) -> Option<&FacePrimitive> {
        self.faces.values().find(|f| f.name == name)
    }

    pub fn line_named(&self, name: &str) -> Option<&LinePrimitive> {
        self.lines.values().find(|l| l.name == name)
    }

    pub fn lines_named(&self, name: &str) -> Vec<&LinePrimitive> {
        self.lines.values().filter(|l| l.name == name).collect()
    }

    pub fn vertex_colors_of(&self, name: &str) -> Option<&[Color]> {
        let (handle, _) = self.faces.iter().find(|(_, f)| f.name == name)?;
        self.vertex_colors.get(handle).map(Vec::as_slice)
    }
}

impl Renderer for RecordingRenderer {
    fn draw_face(&mut self, face: FacePrimitive) -> RenderHandle {
        let handle = self.alloc();
        self.faces.insert(handle, face);
        handle
    }

    fn draw_line(&mut self, line: LinePrimitive) -> RenderHandle {
        let handle = self.alloc();
        self.lines.insert(handle, line);
        handle
    }

    fn draw_point(&mut self, point: PointPrimitive) -> RenderHandle {
        let handle = self.alloc();
        self.points.insert(handle, point);
        handle
    }

    fn set_vertex_colors(&mut self, handle: RenderHandle, colors: &[Color]) -> bool {
        if !self.faces.contains_key(&handle) {
            return false;
        }
        self.vertex_colors.insert(handle, colors.to_vec());
        true
    }

    fn remove(&mut self, handle: RenderHandle) {
        self.faces.remove(&handle);
        self.lines.remove(&handle);
        self.points.remove(&handle);
        self.vertex_colors.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut r = RecordingRenderer::new();
        let a = r.draw_point(PointPrimitive {
            position: Point3d::ORIGIN,
            color: Color::BLACK,
            name: "a".into(),
        });
        let b = r.draw_point(PointPrimitive {
            position: Point3d::ORIGIN,
            color: Color::BLACK,
            name: "b".into(),
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_vertex_colors_on_removed_face_misses() {
        let mut r = RecordingRenderer::new();
        let h = r.draw_face(FacePrimitive {
            points: vec![Point3d::ORIGIN; 3],
            color: Color::WHITE,
            name: "f".into(),
        });
        assert!(r.set_vertex_colors(h, &[Color::RED; 3]));
        r.remove(h);
        assert!(!r.set_vertex_colors(h, &[Color::RED; 3]));
    }
}
