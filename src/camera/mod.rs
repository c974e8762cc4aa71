mod blend_resolver;
mod compositor;
mod group;
mod handler;
mod manager;
mod scan;

pub use blend_resolver::{BlendOverride, BlendResolver};
pub use compositor::{ActiveBlend, BlendCompositor, CameraBrain, LiveCamera, UpdateMethod};
pub use group::{CameraGroup, CameraGroupTemplate, CameraNode, NodeCapability, RigTemplate};
pub use manager::CameraManager;
