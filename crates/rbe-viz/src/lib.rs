pub mod pipeline;
pub mod registry;
pub mod renderer;
pub mod settings;
pub mod shading;
pub mod vectors;

pub use pipeline::{RenderReport, ViewPipeline};
pub use registry::{ForceKind, PrimCategory, PrimKey, PrimitiveRegistry};
pub use renderer::{
    FacePrimitive, LinePrimitive, PointPrimitive, RecordingRenderer, RenderHandle, Renderer,
};
pub use settings::{Settings, SettingsError};
pub use shading::{interface_colors, PointShading};
pub use vectors::{interface_force_lines, selfweight_lines, ForceVectorStyle};
