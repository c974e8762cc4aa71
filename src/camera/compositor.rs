use serde::{Deserialize, Serialize};
use std::any::Any;

use super::blend_resolver::BlendOverride;
use crate::components::{BlendDefinition, CameraId};
use crate::resources::{CustomBlend, ANY_CAMERA};

/// When the compositor advances. The manager switches it to `ManualUpdate`
/// while it drives the compositor and restores the original on dispose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateMethod {
    FixedUpdate,
    #[default]
    LateUpdate,
    SmartUpdate,
    ManualUpdate,
}

/// A camera that is currently enabled and may feed the output.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCamera {
    pub id: CameraId,
    pub name: String,
    pub priority: i32,
    /// Activation order; larger is more recent.
    pub activated_at: u64,
}

/// The render engine's blend driver.
pub trait BlendCompositor: Send + Sync {
    fn update_method(&self) -> UpdateMethod;

    fn set_update_method(&mut self, method: UpdateMethod);

    /// Advance by `delta_time`, choosing among `live_cameras`. Any transition
    /// started here must ask `blend_override` for its blend.
    fn manual_update(
        &mut self,
        delta_time: f32,
        live_cameras: &[LiveCamera],
        blend_override: &mut dyn BlendOverride,
    );

    /// Camera currently feeding the output (the incoming one while blending).
    fn active_camera(&self) -> Option<CameraId>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBlend {
    pub from: CameraId,
    pub to: CameraId,
    pub definition: BlendDefinition,
    pub elapsed: f32,
}

impl ActiveBlend {
    fn new(from: CameraId, to: CameraId, definition: BlendDefinition) -> Self {
        Self {
            from,
            to,
            definition,
            elapsed: 0.0,
        }
    }

    /// Weight of the incoming camera.
    pub fn weight(&self) -> f32 {
        self.definition.weight_at(self.elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.definition.duration
    }
}

/// Reference compositor.
///
/// The live camera with the highest priority feeds the output; ties go to the
/// most recently activated one. The first camera ever chosen is cut to.
#[derive(Debug, Clone)]
pub struct CameraBrain {
    update_method: UpdateMethod,
    default_blend: BlendDefinition,
    custom_blends: Vec<CustomBlend>,
    active: Option<LiveCamera>,
    blend: Option<ActiveBlend>,
    last_transition_blend: Option<BlendDefinition>,
}

impl Default for CameraBrain {
    fn default() -> Self {
        Self::new(BlendDefinition::default())
    }
}

impl CameraBrain {
    pub fn new(default_blend: BlendDefinition) -> Self {
        Self {
            update_method: UpdateMethod::default(),
            default_blend,
            custom_blends: Vec::new(),
            active: None,
            blend: None,
            last_transition_blend: None,
        }
    }

    pub fn with_custom_blends(mut self, custom_blends: Vec<CustomBlend>) -> Self {
        self.custom_blends = custom_blends;
        self
    }

    pub fn with_update_method(mut self, method: UpdateMethod) -> Self {
        self.update_method = method;
        self
    }

    pub fn active_blend(&self) -> Option<&ActiveBlend> {
        self.blend.as_ref()
    }

    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    /// Blend chosen for the most recent transition, cuts included.
    pub fn last_transition_blend(&self) -> Option<BlendDefinition> {
        self.last_transition_blend
    }

    pub fn active_camera_name(&self) -> Option<&str> {
        self.active.as_ref().map(|camera| camera.name.as_str())
    }

    /// The engine's own choice of blend between two named cameras: an exact
    /// match first, then wildcard matches on the source, then on the target.
    pub fn lookup_blend(&self, from: &str, to: &str) -> BlendDefinition {
        let find = |from: &str, to: &str| {
            self.custom_blends
                .iter()
                .find(|custom| custom.from == from && custom.to == to)
                .map(|custom| custom.blend)
        };

        find(from, to)
            .or_else(|| find(ANY_CAMERA, to))
            .or_else(|| find(from, ANY_CAMERA))
            .unwrap_or(self.default_blend)
    }

    fn select(live_cameras: &[LiveCamera]) -> Option<&LiveCamera> {
        live_cameras.iter().max_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.activated_at.cmp(&b.activated_at))
        })
    }
}

impl BlendCompositor for CameraBrain {
    fn update_method(&self) -> UpdateMethod {
        self.update_method
    }

    fn set_update_method(&mut self, method: UpdateMethod) {
        self.update_method = method;
    }

    fn manual_update(
        &mut self,
        delta_time: f32,
        live_cameras: &[LiveCamera],
        blend_override: &mut dyn BlendOverride,
    ) {
        if let Some(blend) = self.blend.as_mut() {
            blend.elapsed += delta_time;
            if blend.is_finished() {
                self.blend = None;
            }
        }

        let Some(next) = Self::select(live_cameras) else {
            self.active = None;
            self.blend = None;
            return;
        };

        let current = match &self.active {
            Some(current) if current.id == next.id => return,
            current => current.clone(),
        };

        self.blend = match current {
            Some(current) => {
                let default_blend = self.lookup_blend(&current.name, &next.name);
                let definition =
                    blend_override.resolve_blend(Some(current.id), next.id, default_blend);
                self.last_transition_blend = Some(definition);
                (!definition.is_cut()).then(|| ActiveBlend::new(current.id, next.id, definition))
            }
            None => None,
        };
        self.active = Some(next.clone());
    }

    fn active_camera(&self) -> Option<CameraId> {
        self.active.as_ref().map(|camera| camera.id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
