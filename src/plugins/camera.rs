use bevy::prelude::*;

use crate::camera::CameraManager;
use crate::systems::camera_manager_system;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum CameraSet {
    /// Controllers, components and the compositor, in that order.
    Tick,
}

/// Ticks the `CameraManager` resource after gameplay has moved its targets.
///
/// The manager itself is inserted by the application; until it is, nothing runs.
pub struct CameraManagerPlugin;

impl Plugin for CameraManagerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(PostUpdate, CameraSet::Tick).add_systems(
            PostUpdate,
            camera_manager_system
                .in_set(CameraSet::Tick)
                .run_if(resource_exists::<CameraManager>),
        );
    }
}
