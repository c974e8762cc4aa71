use bevy::log::warn;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct TimeLayer {
    local_time_scale: f32,
    parent: Option<LayeredTime>,
    disposed: bool,
}

/// Hierarchical time scale.
///
/// Each layer carries a local scale and an optional parent; the effective
/// scale is the product of every scale up the chain. Cloning shares the layer,
/// so a controller holding a clone sees scale changes made by the owner.
#[derive(Debug, Clone)]
pub struct LayeredTime {
    layer: Arc<RwLock<TimeLayer>>,
}

impl Default for LayeredTime {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredTime {
    pub fn new() -> Self {
        Self {
            layer: Arc::new(RwLock::new(TimeLayer {
                local_time_scale: 1.0,
                parent: None,
                disposed: false,
            })),
        }
    }

    pub fn with_parent(parent: &LayeredTime) -> Self {
        let time = Self::new();
        time.set_parent(Some(parent));
        time
    }

    fn read(&self) -> RwLockReadGuard<'_, TimeLayer> {
        self.layer.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TimeLayer> {
        self.layer.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn parent(&self) -> Option<LayeredTime> {
        self.read().parent.clone()
    }

    /// Attach to (or detach from) a parent layer. Attaching to a layer that
    /// already descends from `self` is refused.
    pub fn set_parent(&self, parent: Option<&LayeredTime>) {
        if let Some(parent) = parent {
            let mut cursor = Some(parent.clone());
            while let Some(layer) = cursor {
                if Arc::ptr_eq(&layer.layer, &self.layer) {
                    warn!("LayeredTime parent would form a cycle, ignoring.");
                    return;
                }
                cursor = layer.parent();
            }
        }

        self.write().parent = parent.cloned();
    }

    pub fn local_time_scale(&self) -> f32 {
        self.read().local_time_scale
    }

    pub fn set_local_time_scale(&self, scale: f32) {
        self.write().local_time_scale = scale.max(0.0);
    }

    pub fn parent_time_scale(&self) -> f32 {
        self.parent().map_or(1.0, |parent| parent.time_scale())
    }

    pub fn time_scale(&self) -> f32 {
        self.parent_time_scale() * self.local_time_scale()
    }

    /// Scale a raw frame delta by the effective time scale.
    pub fn delta_time(&self, base_delta: f32) -> f32 {
        base_delta * self.time_scale()
    }

    pub fn dispose(&self) {
        let mut layer = self.write();
        layer.parent = None;
        layer.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }
}
