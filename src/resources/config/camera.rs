use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::{BlendCompositor, CameraBrain, CameraNode};
use crate::components::BlendDefinition;
use crate::resources::TargetPoint;
use crate::utils::errors::Result;

pub const DEFAULT_CAMERA_NAME: &str = "Default";

/// Wildcard matching any camera name in a custom blend entry.
pub const ANY_CAMERA: &str = "*";

/// Blend used by the compositor between two specific cameras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBlend {
    pub from: String,
    pub to: String,
    pub blend: BlendDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraManagerSettings {
    /// Camera activated once when the manager initializes.
    pub default_camera_name: String,
    /// Blend the compositor uses when no custom blend matches.
    pub default_blend: BlendDefinition,
    pub custom_blends: Vec<CustomBlend>,
}

impl Default for CameraManagerSettings {
    fn default() -> Self {
        Self {
            default_camera_name: DEFAULT_CAMERA_NAME.to_string(),
            default_blend: BlendDefinition::default(),
            custom_blends: Vec::new(),
        }
    }
}

impl CameraManagerSettings {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load settings from disk; `.json` files are read as JSON, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the reference compositor configured from these settings.
    pub fn build_brain(&self) -> CameraBrain {
        CameraBrain::new(self.default_blend).with_custom_blends(self.custom_blends.clone())
    }
}

/// Everything the camera manager needs at construction.
pub struct CameraManagerConfig {
    pub compositor: Box<dyn BlendCompositor>,
    pub camera_root: Option<Vec<CameraNode>>,
    pub target_point_root: Option<Vec<TargetPoint>>,
    pub default_camera_name: String,
}

impl CameraManagerConfig {
    pub fn new(compositor: impl BlendCompositor + 'static) -> Self {
        Self {
            compositor: Box::new(compositor),
            camera_root: None,
            target_point_root: None,
            default_camera_name: DEFAULT_CAMERA_NAME.to_string(),
        }
    }

    /// Config with a `CameraBrain` built from `settings`.
    pub fn from_settings(settings: &CameraManagerSettings) -> Self {
        Self::new(settings.build_brain()).with_default_camera_name(&settings.default_camera_name)
    }

    pub fn with_camera_root(mut self, nodes: Vec<CameraNode>) -> Self {
        self.camera_root = Some(nodes);
        self
    }

    pub fn with_target_point_root(mut self, points: Vec<TargetPoint>) -> Self {
        self.target_point_root = Some(points);
        self
    }

    pub fn with_default_camera_name(mut self, name: impl Into<String>) -> Self {
        self.default_camera_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BlendStyle;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = CameraManagerSettings::default();
        assert_eq!(settings.default_camera_name, "Default");
        assert_eq!(settings.default_blend, BlendDefinition::default());
        assert!(settings.custom_blends.is_empty());
    }

    #[test]
    fn test_yaml_with_missing_fields_uses_defaults() {
        let settings = CameraManagerSettings::from_yaml_str("default_camera_name: Overview\n")
            .expect("valid yaml");
        assert_eq!(settings.default_camera_name, "Overview");
        assert_eq!(settings.default_blend, BlendDefinition::default());
    }

    #[test]
    fn test_json_custom_blends() {
        let text = r#"{
            "default_camera_name": "Field",
            "default_blend": { "style": "Linear", "duration": 0.5 },
            "custom_blends": [
                { "from": "*", "to": "Skill", "blend": { "style": "Cut", "duration": 0.0 } }
            ]
        }"#;
        let settings = CameraManagerSettings::from_json_str(text).expect("valid json");

        assert_eq!(
            settings.default_blend,
            BlendDefinition::new(BlendStyle::Linear, 0.5)
        );
        assert_eq!(settings.custom_blends.len(), 1);
        assert_eq!(settings.custom_blends[0].to, "Skill");
    }

    #[test]
    fn test_load_from_file() {
        let settings = CameraManagerSettings {
            default_camera_name: "Battle".to_string(),
            ..Default::default()
        };
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        file.write_all(settings.to_yaml_string().expect("serializes").as_bytes())
            .expect("write");

        let loaded = CameraManagerSettings::load(file.path()).expect("loads");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = CameraManagerSettings::load("/definitely/not/here.yaml");
        assert!(matches!(result, Err(crate::utils::CameraError::Io(_))));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(CameraManagerSettings::from_yaml_str("default_blend: [").is_err());
    }

    #[test]
    fn test_non_finite_blend_duration_is_rejected() {
        let text = "default_blend:\n  style: Linear\n  duration: .nan\n";
        let result = CameraManagerSettings::from_yaml_str(text);
        assert!(matches!(
            result,
            Err(crate::utils::CameraError::SerializationError(_))
        ));
    }
}
