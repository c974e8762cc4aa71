pub mod blend;
pub mod camera;
pub mod controller;

pub use blend::{BlendDefinition, BlendStyle};
pub use camera::{
    CameraComponent, CameraContext, CameraId, CameraPose, DefaultCameraComponent, VirtualCamera,
};
pub use controller::{CameraController, FollowController, LookAtController};
