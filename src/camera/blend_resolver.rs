use std::collections::HashMap;

use crate::components::{BlendDefinition, CameraId};

/// Hook the compositor calls whenever it starts a transition.
pub trait BlendOverride {
    fn resolve_blend(
        &mut self,
        from: Option<CameraId>,
        to: CameraId,
        default_blend: BlendDefinition,
    ) -> BlendDefinition;
}

/// Pending per-camera blend overrides recorded by activate/deactivate calls.
///
/// An override recorded for the camera being switched to beats one recorded
/// for the camera being left. Both are consumed by the transition they apply to.
#[derive(Debug, Default)]
pub struct BlendResolver {
    to_blends: HashMap<CameraId, BlendDefinition>,
    from_blends: HashMap<CameraId, BlendDefinition>,
}

impl BlendResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or with `None`, clear) the blend used when `camera` becomes live.
    pub fn set_to_blend(&mut self, camera: CameraId, blend: Option<BlendDefinition>) {
        match blend {
            Some(blend) => {
                self.to_blends.insert(camera, blend);
            }
            None => {
                self.to_blends.remove(&camera);
            }
        }
    }

    /// Record (or with `None`, clear) the blend used when leaving `camera`.
    pub fn set_from_blend(&mut self, camera: CameraId, blend: Option<BlendDefinition>) {
        match blend {
            Some(blend) => {
                self.from_blends.insert(camera, blend);
            }
            None => {
                self.from_blends.remove(&camera);
            }
        }
    }

    pub fn pending_to(&self, camera: CameraId) -> Option<BlendDefinition> {
        self.to_blends.get(&camera).copied()
    }

    pub fn pending_from(&self, camera: CameraId) -> Option<BlendDefinition> {
        self.from_blends.get(&camera).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.to_blends.is_empty() && self.from_blends.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_blends.clear();
        self.from_blends.clear();
    }
}

impl BlendOverride for BlendResolver {
    fn resolve_blend(
        &mut self,
        from: Option<CameraId>,
        to: CameraId,
        default_blend: BlendDefinition,
    ) -> BlendDefinition {
        let to_blend = self.to_blends.remove(&to);
        let from_blend = from.and_then(|from| self.from_blends.remove(&from));

        to_blend.or(from_blend).unwrap_or(default_blend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BlendStyle;
    use pretty_assertions::assert_eq;

    fn blends() -> (BlendDefinition, BlendDefinition, BlendDefinition) {
        (
            BlendDefinition::new(BlendStyle::Linear, 1.0),
            BlendDefinition::new(BlendStyle::EaseIn, 0.5),
            BlendDefinition::default(),
        )
    }

    #[test]
    fn test_to_override_wins() {
        let (to_blend, from_blend, default) = blends();
        let (a, b) = (CameraId::new(), CameraId::new());
        let mut resolver = BlendResolver::new();
        resolver.set_from_blend(a, Some(from_blend));
        resolver.set_to_blend(b, Some(to_blend));

        assert_eq!(resolver.resolve_blend(Some(a), b, default), to_blend);
    }

    #[test]
    fn test_from_override_used_without_to() {
        let (_, from_blend, default) = blends();
        let (a, b) = (CameraId::new(), CameraId::new());
        let mut resolver = BlendResolver::new();
        resolver.set_from_blend(a, Some(from_blend));

        assert_eq!(resolver.resolve_blend(Some(a), b, default), from_blend);
    }

    #[test]
    fn test_default_when_nothing_pending() {
        let (_, _, default) = blends();
        let mut resolver = BlendResolver::new();
        assert_eq!(
            resolver.resolve_blend(Some(CameraId::new()), CameraId::new(), default),
            default
        );
    }

    #[test]
    fn test_overrides_are_one_shot() {
        let (to_blend, from_blend, default) = blends();
        let (a, b) = (CameraId::new(), CameraId::new());
        let mut resolver = BlendResolver::new();
        resolver.set_from_blend(a, Some(from_blend));
        resolver.set_to_blend(b, Some(to_blend));

        resolver.resolve_blend(Some(a), b, default);
        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve_blend(Some(a), b, default), default);
    }

    #[test]
    fn test_none_clears_pending() {
        let (to_blend, _, default) = blends();
        let b = CameraId::new();
        let mut resolver = BlendResolver::new();
        resolver.set_to_blend(b, Some(to_blend));
        resolver.set_to_blend(b, None);

        assert_eq!(resolver.pending_to(b), None);
        assert_eq!(resolver.resolve_blend(None, b, default), default);
    }

    #[test]
    fn test_unrelated_overrides_survive() {
        let (to_blend, _, default) = blends();
        let (a, b, c) = (CameraId::new(), CameraId::new(), CameraId::new());
        let mut resolver = BlendResolver::new();
        resolver.set_to_blend(c, Some(to_blend));

        resolver.resolve_blend(Some(a), b, default);
        assert_eq!(resolver.pending_to(c), Some(to_blend));
    }
}
