use bevy::log::warn;
use std::collections::HashMap;

use crate::components::{CameraComponent, CameraController};

/// Binds a camera name to its component, an optional controller and an
/// activation reference count.
pub(crate) struct CameraHandler {
    name: String,
    slot: usize,
    component: Box<dyn CameraComponent>,
    controller: Option<Box<dyn CameraController>>,
    activate_count: u32,
    activated_at: u64,
}

impl CameraHandler {
    /// `slot` is the index of the rig node the component was taken from.
    pub fn new(name: impl Into<String>, slot: usize, component: Box<dyn CameraComponent>) -> Self {
        let mut handler = Self {
            name: name.into(),
            slot,
            component,
            controller: None,
            activate_count: 0,
            activated_at: 0,
        };
        handler.apply_active_status();
        handler
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &(dyn CameraComponent + 'static) {
        self.component.as_ref()
    }

    pub fn component_mut(&mut self) -> &mut (dyn CameraComponent + 'static) {
        self.component.as_mut()
    }

    pub fn controller(&self) -> Option<&(dyn CameraController + 'static)> {
        self.controller.as_deref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut (dyn CameraController + 'static)> {
        self.controller.as_deref_mut()
    }

    pub fn activate_count(&self) -> u32 {
        self.activate_count
    }

    pub fn activated_at(&self) -> u64 {
        self.activated_at
    }

    pub fn check_activate(&self) -> bool {
        self.activate_count > 0
    }

    /// Returns true when this call switched the camera on. `serial` is stored
    /// as the activation order in that case.
    pub fn activate(&mut self, force: bool, serial: u64) -> bool {
        if force {
            self.activate_count = 1;
        } else {
            self.activate_count = self.activate_count.saturating_add(1);
        }

        let switched_on = self.apply_active_status() && self.check_activate();
        if switched_on {
            self.activated_at = serial;
        }
        switched_on
    }

    pub fn deactivate(&mut self, force: bool) {
        if force {
            self.activate_count = 0;
        } else if self.activate_count == 0 {
            warn!("Activation count would go negative, clamping to zero. [{}]", self.name);
        } else {
            self.activate_count -= 1;
        }

        self.apply_active_status();
    }

    /// Replace the controller. The previous one is disposed first; the new one
    /// is bound to the component and activated if the camera is live.
    pub fn set_controller(&mut self, controller: Option<Box<dyn CameraController>>) {
        if let Some(mut previous) = self.controller.take() {
            previous.dispose();
        }

        self.controller = controller;
        if let Some(controller) = self.controller.as_mut() {
            controller.initialize(self.component.as_ref());
            if self.component.is_active() {
                controller.activate();
            }
        }
    }

    /// Dispose controller and component, handing the component back together
    /// with the slot it came from.
    pub fn release(mut self) -> (usize, Box<dyn CameraComponent>) {
        self.set_controller(None);
        self.component.dispose();
        (self.slot, self.component)
    }

    fn apply_active_status(&mut self) -> bool {
        let active = self.check_activate();
        if active == self.component.is_active() {
            return false;
        }

        if active {
            self.component.activate();
            if let Some(controller) = self.controller.as_mut() {
                controller.activate();
            }
        } else {
            self.component.deactivate();
            if let Some(controller) = self.controller.as_mut() {
                controller.deactivate();
            }
        }
        true
    }
}

/// Handler map keyed by camera name, iterated in insertion order.
#[derive(Default)]
pub(crate) struct CameraHandlers {
    handlers: Vec<CameraHandler>,
    index: HashMap<String, usize>,
}

impl CameraHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Insert a handler; a taken name hands the handler back untouched.
    pub fn insert(&mut self, handler: CameraHandler) -> Result<(), CameraHandler> {
        if self.contains(handler.name()) {
            return Err(handler);
        }
        self.index
            .insert(handler.name().to_string(), self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CameraHandler> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CameraHandler> {
        self.index.get(name).map(|&i| &mut self.handlers[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CameraHandler> {
        self.handlers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CameraHandler> {
        self.handlers.iter_mut()
    }

    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, CameraHandler> {
        self.index.clear();
        self.handlers.drain(..)
    }
}
