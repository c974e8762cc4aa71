pub mod camera;

pub use camera::{CameraManagerPlugin, CameraSet};
