use bevy::log::{debug, error, warn};
use bevy::prelude::Resource;
use std::collections::HashMap;

use super::blend_resolver::BlendResolver;
use super::compositor::{BlendCompositor, LiveCamera, UpdateMethod};
use super::group::{CameraGroup, CameraNode, RigTemplate};
use super::handler::{CameraHandler, CameraHandlers};
use super::scan::{create_camera_handlers, release_camera_handlers};
use crate::components::{BlendDefinition, CameraComponent, CameraContext, CameraController};
use crate::resources::{CameraManagerConfig, LayeredTime, TargetPoint, TargetPointRegistry};
use crate::utils::errors::{CameraError, Result};

struct CameraGroupEntry {
    group: CameraGroup,
    from_template: bool,
    handlers: CameraHandlers,
}

/// Owns every registered camera rig and drives the compositor.
///
/// Every public call first runs the lazy initialization: the compositor is
/// switched to manual update, the target-point and camera roots are scanned
/// and the default camera is activated once.
#[derive(Resource)]
pub struct CameraManager {
    compositor: Box<dyn BlendCompositor>,
    camera_root: Option<Vec<CameraNode>>,
    target_point_root: Option<Vec<TargetPoint>>,
    default_camera_name: String,

    initialized: bool,
    disposed: bool,
    default_update_method: Option<UpdateMethod>,

    camera_handlers: CameraHandlers,
    target_points: TargetPointRegistry,
    groups: HashMap<String, CameraGroupEntry>,
    blend_resolver: BlendResolver,
    layered_time: LayeredTime,
    activation_serial: u64,
}

impl CameraManager {
    pub fn new(config: CameraManagerConfig) -> Self {
        Self {
            compositor: config.compositor,
            camera_root: config.camera_root,
            target_point_root: config.target_point_root,
            default_camera_name: config.default_camera_name,
            initialized: false,
            disposed: false,
            default_update_method: None,
            camera_handlers: CameraHandlers::new(),
            target_points: TargetPointRegistry::new(),
            groups: HashMap::new(),
            blend_resolver: BlendResolver::new(),
            layered_time: LayeredTime::new(),
            activation_serial: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Time scale applied to camera updates only.
    pub fn layered_time(&self) -> &LayeredTime {
        &self.layered_time
    }

    pub fn compositor(&self) -> &dyn BlendCompositor {
        self.compositor.as_ref()
    }

    pub fn default_camera_name(&self) -> &str {
        &self.default_camera_name
    }

    pub fn initialize(&mut self) {
        if self.initialized || self.disposed {
            return;
        }
        self.initialized = true;

        self.default_update_method = Some(self.compositor.update_method());
        self.compositor.set_update_method(UpdateMethod::ManualUpdate);

        // Target points first so components see them when scanned
        match self.target_point_root.take() {
            Some(points) => self.target_points = TargetPointRegistry::scan(points),
            None => warn!("Not found target point root."),
        }

        let context = self.camera_context();
        match self.camera_root.as_mut() {
            Some(nodes) => self.camera_handlers = create_camera_handlers(nodes, &context),
            None => warn!("Not found virtual camera root."),
        }

        let default_camera_name = self.default_camera_name.clone();
        self.activate_internal(None, &default_camera_name, None, false);
        debug!(
            "Camera manager initialized with {} cameras and {} target points.",
            self.camera_handlers.len(),
            self.target_points.len()
        );
    }

    /// Reference-counted activation.
    pub fn activate(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
    ) {
        self.initialize();
        self.activate_internal(group_key, camera_name, blend, false);
    }

    /// Activation that resets the count to exactly one.
    pub fn force_activate(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
    ) {
        self.initialize();
        self.activate_internal(group_key, camera_name, blend, true);
    }

    /// Reference-counted deactivation.
    pub fn deactivate(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
    ) {
        self.initialize();
        self.deactivate_internal(group_key, camera_name, blend, false);
    }

    /// Deactivation that drops every outstanding request.
    pub fn force_deactivate(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
    ) {
        self.initialize();
        self.deactivate_internal(group_key, camera_name, blend, true);
    }

    pub fn check_activate(&mut self, group_key: Option<&str>, camera_name: &str) -> bool {
        self.initialize();
        self.camera_handlers(group_key)
            .and_then(|handlers| handlers.get(camera_name))
            .is_some_and(|handler| handler.check_activate())
    }

    /// Camera names registered under `group_key`, in scan order.
    pub fn camera_names(&mut self, group_key: Option<&str>) -> Vec<String> {
        self.initialize();
        self.camera_handlers(group_key)
            .map(CameraHandlers::names)
            .unwrap_or_default()
    }

    pub fn has_camera_group(&mut self, key: &str) -> bool {
        self.initialize();
        self.groups.contains_key(key)
    }

    /// Register a rig that the caller owns. An entry already under the same key
    /// is unregistered first.
    pub fn register_camera_group(
        &mut self,
        group: CameraGroup,
        override_key: Option<&str>,
    ) -> Result<()> {
        self.initialize();
        if self.disposed {
            error!("Camera manager is disposed, group rejected. [{}]", group.key());
            return Err(CameraError::Disposed(group.key().to_string()));
        }
        self.register_camera_group_internal(group, override_key, false)
    }

    /// Instantiate a rig from a template and register it. The instance is
    /// destroyed when the group is unregistered.
    pub fn register_camera_group_template(
        &mut self,
        template: &dyn RigTemplate,
        override_key: Option<&str>,
    ) -> Result<()> {
        self.initialize();
        if self.disposed {
            error!("Camera manager is disposed, template rejected. [{}]", template.key());
            return Err(CameraError::Disposed(template.key().to_string()));
        }

        let group = template.instantiate();
        if group.camera_root().is_none() {
            let key = group.key().to_string();
            group.destroy();
            error!("Invalid camera group. [{}]", key);
            return Err(CameraError::InvalidTemplate(key));
        }

        self.register_camera_group_internal(group, override_key, true)
    }

    /// Release every camera of a group. A rig that came from a template is
    /// destroyed and `None` is returned; any other rig is deactivated and
    /// handed back with its components.
    pub fn unregister_camera_group(&mut self, key: &str) -> Option<CameraGroup> {
        self.initialize();

        let Some(mut entry) = self.groups.remove(key) else {
            warn!("Not found camera group. [{}]", key);
            return None;
        };

        Self::release_group(&mut entry);
        if entry.from_template {
            entry.group.destroy();
            None
        } else {
            entry.group.set_active(false);
            Some(entry.group)
        }
    }

    pub fn unregister_camera_group_template(
        &mut self,
        template: &dyn RigTemplate,
    ) -> Option<CameraGroup> {
        self.unregister_camera_group(template.key())
    }

    pub fn get_camera_component<T: CameraComponent>(&mut self, camera_name: &str) -> Option<&T> {
        self.initialize();
        self.camera_handlers
            .get(camera_name)?
            .component()
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn get_camera_component_mut<T: CameraComponent>(
        &mut self,
        camera_name: &str,
    ) -> Option<&mut T> {
        self.initialize();
        self.camera_handlers
            .get_mut(camera_name)?
            .component_mut()
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn set_camera_controller(&mut self, camera_name: &str, controller: impl CameraController) {
        self.initialize();
        if let Some(handler) = self.camera_handlers.get_mut(camera_name) {
            handler.set_controller(Some(Box::new(controller)));
        }
    }

    pub fn clear_camera_controller(&mut self, camera_name: &str) {
        self.initialize();
        if let Some(handler) = self.camera_handlers.get_mut(camera_name) {
            handler.set_controller(None);
        }
    }

    pub fn get_camera_controller<T: CameraController>(&mut self, camera_name: &str) -> Option<&T> {
        self.initialize();
        self.camera_handlers
            .get(camera_name)?
            .controller()?
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn get_camera_controller_mut<T: CameraController>(
        &mut self,
        camera_name: &str,
    ) -> Option<&mut T> {
        self.initialize();
        self.camera_handlers
            .get_mut(camera_name)?
            .controller_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn get_target_point(&mut self, name: &str) -> Option<&TargetPoint> {
        self.initialize();
        self.target_points.get(name)
    }

    pub fn get_target_points(&mut self) -> &[TargetPoint] {
        self.initialize();
        self.target_points.points()
    }

    /// Per-frame pump: controllers, then active components, then the compositor.
    pub fn tick(&mut self, raw_delta_time: f32) {
        self.initialize();
        if self.disposed {
            return;
        }

        let delta_time = self.layered_time.delta_time(raw_delta_time);

        for handler in self.camera_handlers.iter_mut() {
            if let Some(controller) = handler.controller_mut() {
                controller.update(delta_time);
            }
        }

        for handler in self.camera_handlers.iter_mut() {
            let component = handler.component_mut();
            if component.is_active() {
                component.update(delta_time);
            }
        }

        let live_cameras = self.live_cameras();
        self.compositor
            .manual_update(delta_time, &live_cameras, &mut self.blend_resolver);
    }

    /// Restore the compositor, release every rig and drop all registries.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if let Some(method) = self.default_update_method.take() {
            self.compositor.set_update_method(method);
        }
        self.blend_resolver.clear();

        for (_, mut entry) in self.groups.drain() {
            Self::release_group(&mut entry);
            if entry.from_template {
                entry.group.destroy();
            } else {
                entry.group.set_active(false);
            }
        }

        if let Some(nodes) = self.camera_root.as_mut() {
            release_camera_handlers(&mut self.camera_handlers, nodes);
        }

        self.target_points.clear();
        self.layered_time.dispose();
        debug!("Camera manager disposed.");
    }

    fn camera_context(&self) -> CameraContext {
        CameraContext {
            layered_time: self.layered_time.clone(),
            target_points: self.target_points.clone(),
        }
    }

    fn camera_handlers(&self, group_key: Option<&str>) -> Option<&CameraHandlers> {
        match group_key {
            None | Some("") => Some(&self.camera_handlers),
            Some(key) => self.groups.get(key).map(|entry| &entry.handlers),
        }
    }

    fn activate_internal(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
        force: bool,
    ) {
        if self.disposed {
            return;
        }

        let serial = self.activation_serial + 1;
        let Some(handler) = find_handler(
            &mut self.camera_handlers,
            &mut self.groups,
            group_key,
            camera_name,
        ) else {
            return;
        };

        self.blend_resolver
            .set_to_blend(handler.component().identity(), blend);
        if handler.activate(force, serial) {
            self.activation_serial = serial;
        }
    }

    fn deactivate_internal(
        &mut self,
        group_key: Option<&str>,
        camera_name: &str,
        blend: Option<BlendDefinition>,
        force: bool,
    ) {
        if self.disposed {
            return;
        }

        let Some(handler) = find_handler(
            &mut self.camera_handlers,
            &mut self.groups,
            group_key,
            camera_name,
        ) else {
            return;
        };

        self.blend_resolver
            .set_from_blend(handler.component().identity(), blend);
        handler.deactivate(force);
    }

    fn register_camera_group_internal(
        &mut self,
        mut group: CameraGroup,
        override_key: Option<&str>,
        from_template: bool,
    ) -> Result<()> {
        let key = match override_key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => group.key().to_string(),
        };

        if group.camera_root().is_none() {
            error!("Camera group has no camera root. [{}]", key);
            if from_template {
                group.destroy();
            }
            return Err(CameraError::InvalidGroup(key));
        }

        if self.groups.contains_key(&key) {
            if let Some(replaced) = self.unregister_camera_group(&key) {
                debug!("Released replaced camera group. [{}]", replaced.key());
            }
        }

        group.set_key(&key);
        group.set_active(true);

        let context = self.camera_context();
        let handlers = match group.camera_root_mut() {
            Some(nodes) => create_camera_handlers(nodes, &context),
            None => CameraHandlers::new(),
        };

        self.groups.insert(
            key,
            CameraGroupEntry {
                group,
                from_template,
                handlers,
            },
        );
        Ok(())
    }

    fn release_group(entry: &mut CameraGroupEntry) {
        match entry.group.camera_root_mut() {
            Some(nodes) => release_camera_handlers(&mut entry.handlers, nodes),
            None => release_camera_handlers(&mut entry.handlers, &mut []),
        }
    }

    fn live_cameras(&self) -> Vec<LiveCamera> {
        let groups = self.groups.values().map(|entry| &entry.handlers);
        std::iter::once(&self.camera_handlers)
            .chain(groups)
            .flat_map(CameraHandlers::iter)
            .filter(|handler| handler.component().is_active())
            .map(|handler| {
                let camera = handler.component().camera();
                LiveCamera {
                    id: camera.id(),
                    name: handler.name().to_string(),
                    priority: camera.priority(),
                    activated_at: handler.activated_at(),
                }
            })
            .collect()
    }
}

/// Resolve a handler in the default map (empty or missing key) or a group map.
fn find_handler<'a>(
    default_handlers: &'a mut CameraHandlers,
    groups: &'a mut HashMap<String, CameraGroupEntry>,
    group_key: Option<&str>,
    camera_name: &str,
) -> Option<&'a mut CameraHandler> {
    let handlers = match group_key {
        None | Some("") => default_handlers,
        Some(key) => match groups.get_mut(key) {
            Some(entry) => &mut entry.handlers,
            None => {
                warn!("Not found camera group. [{}]", key);
                return None;
            }
        },
    };

    let handler = handlers.get_mut(camera_name);
    if handler.is_none() {
        warn!("Not found camera. [{}]", camera_name);
    }
    handler
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.dispose();
    }
}
