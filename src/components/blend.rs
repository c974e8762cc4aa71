use serde::{Deserialize, Serialize};

/// Shape of the weight curve used while the compositor blends two cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendStyle {
    Cut,
    #[default]
    EaseInOut,
    EaseIn,
    EaseOut,
    HardIn,
    HardOut,
    Linear,
}

impl BlendStyle {
    /// Weight of the incoming camera for normalized progress `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            BlendStyle::Cut => 1.0,
            BlendStyle::Linear => t,
            BlendStyle::EaseInOut => t * t * (3.0 - 2.0 * t),
            BlendStyle::EaseIn => t * t,
            BlendStyle::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            BlendStyle::HardIn => t * t * t,
            BlendStyle::HardOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// How the compositor should transition between two cameras.
///
/// Deserialized values go through the same checks as `new`: a negative
/// duration becomes a cut and a non-finite one is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlendDefinition")]
pub struct BlendDefinition {
    pub style: BlendStyle,
    /// Duration in seconds.
    pub duration: f32,
}

impl Default for BlendDefinition {
    fn default() -> Self {
        Self {
            style: BlendStyle::EaseInOut,
            duration: 2.0,
        }
    }
}

#[derive(Deserialize)]
struct RawBlendDefinition {
    style: BlendStyle,
    duration: f32,
}

impl TryFrom<RawBlendDefinition> for BlendDefinition {
    type Error = String;

    fn try_from(raw: RawBlendDefinition) -> Result<Self, Self::Error> {
        if !raw.duration.is_finite() {
            return Err(format!("blend duration must be finite, got {}", raw.duration));
        }
        Ok(Self::new(raw.style, raw.duration))
    }
}

impl BlendDefinition {
    pub fn new(style: BlendStyle, duration: f32) -> Self {
        Self {
            style,
            duration: duration.max(0.0),
        }
    }

    pub fn cut() -> Self {
        Self {
            style: BlendStyle::Cut,
            duration: 0.0,
        }
    }

    pub fn is_cut(&self) -> bool {
        self.style == BlendStyle::Cut || self.duration <= 0.0
    }

    pub fn weight_at(&self, elapsed: f32) -> f32 {
        if self.is_cut() {
            return 1.0;
        }
        self.style.evaluate(elapsed / self.duration)
    }
}
