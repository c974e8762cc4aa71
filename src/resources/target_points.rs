use bevy::log::debug;
use nalgebra::Vector3;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct Anchor {
    position: Vector3<f64>,
    active: bool,
}

/// Named spatial anchor that virtual cameras follow or aim at.
///
/// Cloning shares the anchor: gameplay code moves the point and every
/// controller holding a clone observes the new position.
#[derive(Debug, Clone)]
pub struct TargetPoint {
    name: Arc<str>,
    anchor: Arc<RwLock<Anchor>>,
}

impl TargetPoint {
    pub fn new(name: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            name: Arc::from(name.into()),
            anchor: Arc::new(RwLock::new(Anchor {
                position,
                active: true,
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vector3<f64> {
        self.anchor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .position
    }

    pub fn set_position(&self, position: Vector3<f64>) {
        self.anchor
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .position = position;
    }

    pub fn is_active(&self) -> bool {
        self.anchor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }

    pub fn set_active(&self, active: bool) {
        self.anchor
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .active = active;
    }

    pub fn same_anchor(&self, other: &TargetPoint) -> bool {
        Arc::ptr_eq(&self.anchor, &other.anchor)
    }
}

/// Target points by name, in scan order.
#[derive(Debug, Clone, Default)]
pub struct TargetPointRegistry {
    points: Vec<TargetPoint>,
    index: HashMap<String, usize>,
}

impl TargetPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the children of a target-point root. A name
    /// seen before disables the later point; the first occurrence wins.
    pub fn scan(root: impl IntoIterator<Item = TargetPoint>) -> Self {
        let mut registry = Self::new();
        for point in root {
            if registry.index.contains_key(point.name()) {
                debug!("Duplicate target point disabled. [{}]", point.name());
                point.set_active(false);
                continue;
            }

            registry
                .index
                .insert(point.name().to_string(), registry.points.len());
            registry.points.push(point);
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&TargetPoint> {
        self.index.get(name).map(|&i| &self.points[i])
    }

    pub fn points(&self) -> &[TargetPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let registry = TargetPointRegistry::scan(vec![
            TargetPoint::new("Head", Vector3::new(0.0, 0.0, 1.8)),
            TargetPoint::new("Feet", Vector3::zeros()),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("Head").map(|p| p.position()),
            Some(Vector3::new(0.0, 0.0, 1.8))
        );
        assert!(registry.get("Hand").is_none());
    }

    #[test]
    fn test_duplicate_is_disabled_first_wins() {
        let first = TargetPoint::new("Head", Vector3::new(1.0, 0.0, 0.0));
        let second = TargetPoint::new("Head", Vector3::new(2.0, 0.0, 0.0));
        let registry = TargetPointRegistry::scan(vec![first.clone(), second.clone()]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("Head").is_some_and(|p| p.same_anchor(&first)));
        assert!(first.is_active());
        assert!(!second.is_active());
    }

    #[test]
    fn test_clones_share_anchor() {
        let point = TargetPoint::new("Look", Vector3::zeros());
        let handle = point.clone();
        point.set_position(Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(handle.position(), Vector3::new(3.0, 4.0, 5.0));
    }
}
