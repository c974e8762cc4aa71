//! Camera orchestration on top of a blend compositor.
//!
//! A [`CameraManager`] owns the default camera rig and any number of keyed
//! camera groups, reference-counts activation requests per camera and feeds
//! the enabled cameras to a [`BlendCompositor`] once per frame.

pub mod camera;
pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use camera::{
    BlendCompositor, CameraBrain, CameraGroup, CameraGroupTemplate, CameraManager, CameraNode,
    RigTemplate, UpdateMethod,
};
pub use components::{
    BlendDefinition, BlendStyle, CameraComponent, CameraController, CameraId, VirtualCamera,
};
pub use plugins::CameraManagerPlugin;
pub use resources::{CameraManagerConfig, CameraManagerSettings, LayeredTime, TargetPoint};
pub use utils::errors::{CameraError, Result};
