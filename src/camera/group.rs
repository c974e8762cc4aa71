use bevy::log::debug;
use std::fmt;

use crate::components::{CameraComponent, VirtualCamera};

/// What a rig node exposes to the scan.
pub enum NodeCapability {
    /// An explicit component.
    Component(Box<dyn CameraComponent>),
    /// A bare camera, wrapped in `DefaultCameraComponent` when scanned.
    Camera(VirtualCamera),
    /// Nothing camera-related, or a component currently lent to a handler.
    None,
}

/// One immediate child of a camera root.
pub struct CameraNode {
    name: String,
    capability: NodeCapability,
}

impl CameraNode {
    pub fn new(name: impl Into<String>, capability: NodeCapability) -> Self {
        Self {
            name: name.into(),
            capability,
        }
    }

    pub fn with_component(name: impl Into<String>, component: impl CameraComponent) -> Self {
        Self::new(name, NodeCapability::Component(Box::new(component)))
    }

    pub fn with_camera(name: impl Into<String>, camera: VirtualCamera) -> Self {
        Self::new(name, NodeCapability::Camera(camera))
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, NodeCapability::None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capability(&self) -> &NodeCapability {
        &self.capability
    }

    pub fn has_camera(&self) -> bool {
        !matches!(self.capability, NodeCapability::None)
    }

    pub(crate) fn take_capability(&mut self) -> NodeCapability {
        std::mem::replace(&mut self.capability, NodeCapability::None)
    }

    pub(crate) fn restore_component(&mut self, component: Box<dyn CameraComponent>) {
        self.capability = NodeCapability::Component(component);
    }

    fn disable_camera(&self) {
        match &self.capability {
            NodeCapability::Component(component) => component.camera().set_enabled(false),
            NodeCapability::Camera(camera) => camera.set_enabled(false),
            NodeCapability::None => {}
        }
    }
}

impl fmt::Debug for CameraNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capability = match &self.capability {
            NodeCapability::Component(_) => "Component",
            NodeCapability::Camera(_) => "Camera",
            NodeCapability::None => "None",
        };
        f.debug_struct("CameraNode")
            .field("name", &self.name)
            .field("capability", &capability)
            .finish()
    }
}

/// A rig subtree registered with the manager as a unit.
///
/// A group built in code (or already placed in a scene) stays owned by its
/// caller across registrations: unregistering hands it back deactivated. A
/// group instantiated from a `RigTemplate` is destroyed on unregistration.
#[derive(Debug)]
pub struct CameraGroup {
    key: String,
    camera_root: Option<Vec<CameraNode>>,
    active: bool,
}

impl CameraGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            camera_root: None,
            active: false,
        }
    }

    pub fn with_camera_root(mut self, nodes: Vec<CameraNode>) -> Self {
        self.camera_root = Some(nodes);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn camera_root(&self) -> Option<&[CameraNode]> {
        self.camera_root.as_deref()
    }

    pub(crate) fn camera_root_mut(&mut self) -> Option<&mut Vec<CameraNode>> {
        self.camera_root.as_mut()
    }

    pub(crate) fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    /// Deactivating a group also switches off every camera left in its rig.
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            if let Some(nodes) = &self.camera_root {
                nodes.iter().for_each(CameraNode::disable_camera);
            }
        }
    }

    /// Tear down an instantiated rig: it is deactivated before being dropped.
    pub(crate) fn destroy(mut self) {
        debug!("Destroying camera group. [{}]", self.key);
        self.set_active(false);
    }
}

/// Offline-authored rig that can be instantiated at runtime.
pub trait RigTemplate: Send + Sync {
    /// Key the instantiated group registers under unless overridden.
    fn key(&self) -> &str;

    fn instantiate(&self) -> CameraGroup;
}

/// `RigTemplate` backed by a factory closure.
pub struct CameraGroupTemplate {
    key: String,
    factory: Box<dyn Fn() -> Vec<CameraNode> + Send + Sync>,
}

impl CameraGroupTemplate {
    pub fn new(
        key: impl Into<String>,
        factory: impl Fn() -> Vec<CameraNode> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            factory: Box::new(factory),
        }
    }
}

impl RigTemplate for CameraGroupTemplate {
    fn key(&self) -> &str {
        &self.key
    }

    fn instantiate(&self) -> CameraGroup {
        CameraGroup::new(self.key.clone()).with_camera_root((self.factory)())
    }
}
