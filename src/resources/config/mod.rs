pub mod camera;

pub use camera::{
    CameraManagerConfig, CameraManagerSettings, CustomBlend, ANY_CAMERA, DEFAULT_CAMERA_NAME,
};
