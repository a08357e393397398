//! Full-rebuild view pipeline.
//!
//! Every `apply` clears each primitive category it owns and redraws it
//! from the current assembly state and visibility flags; there is no
//! diffing against what was drawn before. Stages run in a fixed order and
//! a disabled stage still clears its category. Not reentrant; the caller
//! serializes invocations.

use tracing::{debug, instrument};

use rbe_assembly::Assembly;

use crate::registry::{PrimCategory, PrimKey, PrimitiveRegistry};
use crate::renderer::{FacePrimitive, LinePrimitive, PointPrimitive, Renderer};
use crate::settings::Settings;
use crate::shading::interface_colors;
use crate::vectors::{interface_force_lines, selfweight_lines, ForceVectorStyle};

/// Counts of what one `apply` cleared and drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub cleared: usize,
    pub assembly_vertices: usize,
    pub assembly_edges: usize,
    pub block_primitives: usize,
    pub interfaces: usize,
    pub recolored_interfaces: usize,
    /// Interfaces whose recolor target was missing in the renderer.
    pub skipped_recolors: usize,
    pub force_vectors: usize,
    pub selfweight_vectors: usize,
}

#[derive(Default)]
pub struct ViewPipeline {
    registry: PrimitiveRegistry,
}

impl ViewPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// Rebuild the view of `assembly` according to `settings`.
    #[instrument(skip_all, fields(assembly = %assembly.name()))]
    pub fn apply<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        self.stage_assembly_wireframe(assembly, settings, renderer, &mut report);
        self.stage_blocks(assembly, settings, renderer, &mut report);
        self.stage_interfaces(assembly, settings, renderer, &mut report);
        self.stage_forces(assembly, settings, renderer, &mut report);
        self.stage_selfweight(assembly, settings, renderer, &mut report);

        debug!(
            cleared = report.cleared,
            interfaces = report.interfaces,
            force_vectors = report.force_vectors,
            "view rebuilt"
        );
        report
    }

    fn stage_assembly_wireframe<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
        report: &mut RenderReport,
    ) {
        report.cleared += self
            .registry
            .clear_category(PrimCategory::AssemblyVertices, renderer);
        report.cleared += self
            .registry
            .clear_category(PrimCategory::AssemblyEdges, renderer);

        if settings.visibility.assembly_vertices {
            for (id, node) in assembly.nodes() {
                let color = if node.is_support {
                    settings.color.support
                } else {
                    settings.color.assembly_vertex
                };
                let handle = renderer.draw_point(PointPrimitive {
                    position: node.block.centroid(),
                    color,
                    name: format!("{}.vertex.{}", assembly.name(), id),
                });
                self.registry.insert(PrimKey::AssemblyVertex { block: id }, handle);
                report.assembly_vertices += 1;
            }
        }

        if settings.visibility.assembly_edges {
            for edge in assembly.interfaces() {
                // Endpoints exist by the assembly's edge invariant.
                let (Some(a), Some(b)) = (assembly.block(edge.u), assembly.block(edge.v)) else {
                    continue;
                };
                let handle = renderer.draw_line(LinePrimitive {
                    start: a.centroid(),
                    end: b.centroid(),
                    color: settings.color.assembly_edge,
                    name: format!("{}.edge.{}-{}", assembly.name(), edge.u, edge.v),
                    arrow_end: false,
                });
                self.registry
                    .insert(PrimKey::AssemblyEdge { u: edge.u, v: edge.v }, handle);
                report.assembly_edges += 1;
            }
        }
    }

    fn stage_blocks<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
        report: &mut RenderReport,
    ) {
        report.cleared += self.registry.clear_category(PrimCategory::Blocks, renderer);

        let visibility = &settings.visibility;
        if !(visibility.block_edges || visibility.block_faces || visibility.block_vertices) {
            return;
        }

        for (id, node) in assembly.nodes() {
            let block = &node.block;
            let base = format!("{}.block.{}", assembly.name(), id);

            if visibility.block_edges {
                for (e, (a, b)) in block.edges().into_iter().enumerate() {
                    let handle = renderer.draw_line(LinePrimitive {
                        start: block.vertices[a],
                        end: block.vertices[b],
                        color: settings.color.block_edge,
                        name: format!("{base}.edge.{e}"),
                        arrow_end: false,
                    });
                    self.registry
                        .insert(PrimKey::BlockEdge { block: id, edge: e }, handle);
                    report.block_primitives += 1;
                }
            }

            if visibility.block_faces {
                for (f, face) in block.faces.iter().enumerate() {
                    let handle = renderer.draw_face(FacePrimitive {
                        points: face.iter().map(|&v| block.vertices[v]).collect(),
                        color: settings.color.block_face,
                        name: format!("{base}.face.{f}"),
                    });
                    self.registry
                        .insert(PrimKey::BlockFace { block: id, face: f }, handle);
                    report.block_primitives += 1;
                }
            }

            if visibility.block_vertices {
                for (n, position) in block.vertices.iter().enumerate() {
                    let handle = renderer.draw_point(PointPrimitive {
                        position: *position,
                        color: settings.color.block_vertex,
                        name: format!("{base}.vertex.{n}"),
                    });
                    self.registry
                        .insert(PrimKey::BlockVertex { block: id, vertex: n }, handle);
                    report.block_primitives += 1;
                }
            }
        }
    }

    fn stage_interfaces<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
        report: &mut RenderReport,
    ) {
        report.cleared += self
            .registry
            .clear_category(PrimCategory::Interfaces, renderer);

        if !settings.visibility.interfaces {
            return;
        }

        for edge in assembly.interfaces() {
            let key = PrimKey::Interface { u: edge.u, v: edge.v };
            let handle = renderer.draw_face(FacePrimitive {
                points: edge.interface.points.clone(),
                color: settings.color.interface,
                name: format!("{}.interface.{}-{}", assembly.name(), edge.u, edge.v),
            });
            self.registry.insert(key, handle);
            report.interfaces += 1;

            if let Some(colors) = interface_colors(&edge.interface) {
                if renderer.set_vertex_colors(handle, &colors) {
                    report.recolored_interfaces += 1;
                } else {
                    // Lookup miss: non-fatal, skip this interface.
                    report.skipped_recolors += 1;
                }
            }
        }
    }

    fn stage_forces<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
        report: &mut RenderReport,
    ) {
        report.cleared += self.registry.clear_category(PrimCategory::Forces, renderer);

        if !settings.visibility.interface_forces {
            return;
        }

        let style = ForceVectorStyle::from_settings(settings);
        for edge in assembly.interfaces() {
            for (key, line) in interface_force_lines(assembly.name(), edge, &style) {
                let handle = renderer.draw_line(line);
                self.registry.insert(key, handle);
                report.force_vectors += 1;
            }
        }
    }

    fn stage_selfweight<R: Renderer>(
        &mut self,
        assembly: &Assembly,
        settings: &Settings,
        renderer: &mut R,
        report: &mut RenderReport,
    ) {
        report.cleared += self
            .registry
            .clear_category(PrimCategory::Selfweight, renderer);

        if !settings.visibility.block_selfweight {
            return;
        }

        let lines = selfweight_lines(
            assembly,
            settings.scale.selfweight,
            settings.eps.selfweight,
            settings.color.selfweight,
        );
        for (key, line) in lines {
            let handle = renderer.draw_line(line);
            self.registry.insert(key, handle);
            report.selfweight_vectors += 1;
        }
    }
}
