use camera_rig::camera::{CameraBrain, CameraGroup, CameraManager, CameraNode};
use camera_rig::components::{BlendDefinition, BlendStyle, VirtualCamera};
use camera_rig::resources::{CameraManagerConfig, TargetPoint};
use nalgebra::Vector3;

/// Compositor with a one second linear default blend.
pub fn create_test_brain() -> CameraBrain {
    CameraBrain::new(BlendDefinition::new(BlendStyle::Linear, 1.0))
}

pub fn create_test_manager(camera_root: Vec<CameraNode>) -> CameraManager {
    CameraManager::new(CameraManagerConfig::new(create_test_brain()).with_camera_root(camera_root))
}

/// "Default" plus the named extra cameras, all bare.
pub fn create_test_rig(extra: &[&str]) -> (Vec<CameraNode>, Vec<VirtualCamera>) {
    let cameras: Vec<VirtualCamera> = std::iter::once("Default")
        .chain(extra.iter().copied())
        .map(VirtualCamera::new)
        .collect();
    let nodes = cameras
        .iter()
        .map(|camera| CameraNode::with_camera(camera.name(), camera.clone()))
        .collect();
    (nodes, cameras)
}

pub fn create_test_group(key: &str, camera: &VirtualCamera) -> CameraGroup {
    CameraGroup::new(key)
        .with_camera_root(vec![CameraNode::with_camera(camera.name(), camera.clone())])
}

pub fn create_test_target_points() -> Vec<TargetPoint> {
    vec![
        TargetPoint::new("Player", Vector3::new(10.0, 0.0, 0.0)),
        TargetPoint::new("Boss", Vector3::new(-10.0, 5.0, 0.0)),
    ]
}
