mod camera;

pub use camera::camera_manager_system;
