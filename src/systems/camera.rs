use bevy::prelude::*;

use crate::camera::CameraManager;

/// Drives the camera manager once per frame with the engine's frame delta.
pub fn camera_manager_system(time: Res<Time>, mut manager: ResMut<CameraManager>) {
    manager.tick(time.delta_secs());
}
