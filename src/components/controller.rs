use nalgebra::Vector3;
use std::any::Any;

use super::camera::{CameraComponent, VirtualCamera};
use crate::resources::TargetPoint;

/// Optional driving logic bound to exactly one camera component.
///
/// `initialize` may be called more than once for the same handler and must
/// keep the first binding. `activate`/`deactivate` mirror the component's
/// active state.
pub trait CameraController: Any + Send + Sync {
    fn initialize(&mut self, component: &dyn CameraComponent);

    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn update(&mut self, delta_time: f32);

    fn dispose(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Keeps the camera at a fixed offset from a target point.
///
/// Motion uses frame-rate independent exponential smoothing:
/// `position += (desired - position) * (1 - exp(-speed * dt))`.
/// Activation snaps straight to the desired position.
#[derive(Debug, Clone)]
pub struct FollowController {
    target: TargetPoint,
    offset: Vector3<f64>,
    smoothing_speed: f64,
    camera: Option<VirtualCamera>,
    active: bool,
}

impl FollowController {
    pub fn new(target: TargetPoint, offset: Vector3<f64>) -> Self {
        Self {
            target,
            offset,
            smoothing_speed: 8.0,
            camera: None,
            active: false,
        }
    }

    pub fn with_smoothing_speed(mut self, speed: f64) -> Self {
        self.smoothing_speed = speed.max(0.0);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn offset(&self) -> Vector3<f64> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector3<f64>) {
        self.offset = offset;
    }

    fn desired_position(&self) -> Vector3<f64> {
        self.target.position() + self.offset
    }
}

impl CameraController for FollowController {
    fn initialize(&mut self, component: &dyn CameraComponent) {
        if self.camera.is_none() {
            self.camera = Some(component.camera().clone());
        }
    }

    fn activate(&mut self) {
        self.active = true;
        if let Some(camera) = &self.camera {
            let desired = self.desired_position();
            camera.update_pose(|pose| pose.position = desired);
        }
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn update(&mut self, delta_time: f32) {
        let Some(camera) = &self.camera else {
            return;
        };
        if !self.target.is_active() {
            return;
        }

        let desired = self.desired_position();
        let factor = 1.0 - (-self.smoothing_speed * delta_time as f64).exp();
        camera.update_pose(|pose| pose.position += (desired - pose.position) * factor);
    }

    fn dispose(&mut self) {
        self.camera = None;
        self.active = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Aims the camera at a target point every update.
#[derive(Debug, Clone)]
pub struct LookAtController {
    target: TargetPoint,
    camera: Option<VirtualCamera>,
}

impl LookAtController {
    pub fn new(target: TargetPoint) -> Self {
        Self {
            target,
            camera: None,
        }
    }

    pub fn target(&self) -> &TargetPoint {
        &self.target
    }
}

impl CameraController for LookAtController {
    fn initialize(&mut self, component: &dyn CameraComponent) {
        if self.camera.is_none() {
            self.camera = Some(component.camera().clone());
        }
    }

    fn update(&mut self, _delta_time: f32) {
        if let Some(camera) = &self.camera {
            let look_at = self.target.is_active().then(|| self.target.position());
            camera.update_pose(|pose| pose.look_at = look_at);
        }
    }

    fn dispose(&mut self) {
        self.camera = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::DefaultCameraComponent;
    use approx::assert_relative_eq;

    fn bound_follow(offset: Vector3<f64>) -> (FollowController, VirtualCamera, TargetPoint) {
        let camera = VirtualCamera::new("Follow");
        let target = TargetPoint::new("Player", Vector3::new(10.0, 0.0, 0.0));
        let component = DefaultCameraComponent::new(camera.clone());
        let mut controller = FollowController::new(target.clone(), offset);
        controller.initialize(&component);
        (controller, camera, target)
    }

    #[test]
    fn test_follow_snaps_on_activate() {
        let (mut controller, camera, _target) = bound_follow(Vector3::new(0.0, -5.0, 2.0));
        controller.activate();

        assert!(controller.is_active());
        assert_eq!(camera.pose().position, Vector3::new(10.0, -5.0, 2.0));
    }

    #[test]
    fn test_follow_converges_toward_target() {
        let (mut controller, camera, target) = bound_follow(Vector3::zeros());
        controller.activate();
        target.set_position(Vector3::new(20.0, 0.0, 0.0));

        controller.update(0.1);
        let x = camera.pose().position.x;
        assert!(x > 10.0 && x < 20.0);

        for _ in 0..200 {
            controller.update(0.1);
        }
        assert_relative_eq!(camera.pose().position.x, 20.0, epsilon = 1e-6);
    }

    #[test]
    fn test_follow_holds_when_target_disabled() {
        let (mut controller, camera, target) = bound_follow(Vector3::zeros());
        controller.activate();
        target.set_active(false);
        target.set_position(Vector3::new(50.0, 0.0, 0.0));

        controller.update(1.0);
        assert_eq!(camera.pose().position.x, 10.0);
    }

    #[test]
    fn test_initialize_keeps_first_binding() {
        let first = VirtualCamera::new("First");
        let second = VirtualCamera::new("Second");
        let target = TargetPoint::new("Player", Vector3::new(1.0, 2.0, 3.0));
        let mut controller = LookAtController::new(target);

        controller.initialize(&DefaultCameraComponent::new(first.clone()));
        controller.initialize(&DefaultCameraComponent::new(second.clone()));
        controller.update(0.016);

        assert_eq!(first.pose().look_at, Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(second.pose().look_at, None);
    }

    #[test]
    fn test_dispose_unbinds() {
        let (mut controller, camera, target) = bound_follow(Vector3::zeros());
        controller.dispose();
        target.set_position(Vector3::new(99.0, 0.0, 0.0));
        controller.update(1.0);

        assert_eq!(camera.pose().position, Vector3::new(0.0, 0.0, 100.0));
    }
}
