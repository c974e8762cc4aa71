use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::resources::{LayeredTime, TargetPointRegistry};

/// Stable identity of a virtual camera, used as the blend-override key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraId(Uuid);

impl CameraId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CameraId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vector3<f64>,
    pub look_at: Option<Vector3<f64>>,
    pub up: Vector3<f64>,
    pub fov: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 100.0),
            look_at: None,
            up: Vector3::z(),
            fov: 60.0,
        }
    }
}

#[derive(Debug)]
struct VirtualCameraState {
    enabled: bool,
    priority: i32,
    pose: CameraPose,
}

/// Bare camera primitive placed in a rig.
///
/// A cheap shared handle: the component wrapping it, the controller driving it
/// and any gameplay code that kept a clone all observe the same state.
#[derive(Debug, Clone)]
pub struct VirtualCamera {
    id: CameraId,
    name: Arc<str>,
    state: Arc<RwLock<VirtualCameraState>>,
}

impl VirtualCamera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CameraId::new(),
            name: Arc::from(name.into()),
            state: Arc::new(RwLock::new(VirtualCameraState {
                enabled: false,
                priority: 0,
                pose: CameraPose::default(),
            })),
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        self.set_priority(priority);
        self
    }

    pub fn with_pose(self, pose: CameraPose) -> Self {
        self.set_pose(pose);
        self
    }

    /// Authored as enabled; the handler built on it will switch it off until requested.
    pub fn enabled(self) -> Self {
        self.set_enabled(true);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, VirtualCameraState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VirtualCameraState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> CameraId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.read().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.write().enabled = enabled;
    }

    pub fn priority(&self) -> i32 {
        self.read().priority
    }

    pub fn set_priority(&self, priority: i32) {
        self.write().priority = priority;
    }

    pub fn pose(&self) -> CameraPose {
        self.read().pose.clone()
    }

    pub fn set_pose(&self, pose: CameraPose) {
        self.write().pose = pose;
    }

    pub fn update_pose(&self, f: impl FnOnce(&mut CameraPose)) {
        f(&mut self.write().pose);
    }
}

/// Handed to every component when its rig is scanned.
#[derive(Debug, Clone, Default)]
pub struct CameraContext {
    pub layered_time: LayeredTime,
    pub target_points: TargetPointRegistry,
}

/// Capability over one renderable camera node.
///
/// Only `camera` and the `as_any` pair are required; the activation methods
/// default to toggling the wrapped `VirtualCamera`.
pub trait CameraComponent: Any + Send + Sync {
    fn camera(&self) -> &VirtualCamera;

    fn initialize(&mut self, _context: &CameraContext) {}

    fn identity(&self) -> CameraId {
        self.camera().id()
    }

    fn is_active(&self) -> bool {
        self.camera().is_enabled()
    }

    fn activate(&mut self) {
        self.camera().set_enabled(true);
    }

    fn deactivate(&mut self) {
        self.camera().set_enabled(false);
    }

    fn update(&mut self, _delta_time: f32) {}

    fn dispose(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Pass-through component for nodes that carry only a bare camera.
#[derive(Debug, Clone)]
pub struct DefaultCameraComponent {
    camera: VirtualCamera,
}

impl DefaultCameraComponent {
    pub fn new(camera: VirtualCamera) -> Self {
        Self { camera }
    }
}

impl CameraComponent for DefaultCameraComponent {
    fn camera(&self) -> &VirtualCamera {
        &self.camera
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
