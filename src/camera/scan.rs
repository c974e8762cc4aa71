use bevy::log::warn;

use super::group::{CameraNode, NodeCapability};
use super::handler::{CameraHandler, CameraHandlers};
use crate::components::{CameraComponent, CameraContext, DefaultCameraComponent};

/// Build a handler for every camera-bearing node under a camera root.
///
/// Components are lent to the handlers; `release_camera_handlers` gives them
/// back. The first node with a given name wins, later duplicates stay in the
/// rig untouched.
pub(crate) fn create_camera_handlers(
    nodes: &mut [CameraNode],
    context: &CameraContext,
) -> CameraHandlers {
    let mut handlers = CameraHandlers::new();

    for (slot, node) in nodes.iter_mut().enumerate() {
        if handlers.contains(node.name()) {
            warn!("Already exists camera name. [{}]", node.name());
            continue;
        }

        let mut component: Box<dyn CameraComponent> = match node.take_capability() {
            NodeCapability::Component(component) => component,
            NodeCapability::Camera(camera) => Box::new(DefaultCameraComponent::new(camera)),
            NodeCapability::None => continue,
        };
        component.initialize(context);

        if let Err(handler) = handlers.insert(CameraHandler::new(node.name(), slot, component)) {
            warn!("Camera handler rejected. [{}]", handler.name());
        }
    }

    handlers
}

/// Dispose every handler and return its component to the node it came from.
pub(crate) fn release_camera_handlers(handlers: &mut CameraHandlers, nodes: &mut [CameraNode]) {
    for handler in handlers.drain() {
        let name = handler.name().to_string();
        let (slot, component) = handler.release();
        match nodes.get_mut(slot) {
            Some(node) => node.restore_component(component),
            None => warn!("Camera node slot is gone, dropping component. [{}]", name),
        }
    }
}
