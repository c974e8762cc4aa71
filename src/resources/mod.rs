pub mod config;
mod target_points;
mod time;

pub use config::{
    CameraManagerConfig, CameraManagerSettings, CustomBlend, ANY_CAMERA, DEFAULT_CAMERA_NAME,
};
pub use target_points::{TargetPoint, TargetPointRegistry};
pub use time::LayeredTime;
