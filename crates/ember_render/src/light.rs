//! Light types for the forward pass

use serde::{Deserialize, Serialize};

/// Directional light (same intensity everywhere)
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Light direction (normalized, world space)
    pub direction: [f32; 3],
    /// Light color (linear RGB)
    pub color: [f32; 3],
    /// Intensity multiplier
    pub intensity: f32,
}

impl DirectionalLight {
    /// Create a new directional light
    pub fn new(direction: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            direction,
            color,
            intensity,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new([-0.5, -1.0, -0.3], [1.0, 1.0, 1.0], 1.0)
    }
}

/// Point light with squared-falloff attenuation inside `range`
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PointLight {
    /// World position
    pub position: [f32; 3],
    /// Maximum range
    pub range: f32,
    /// Light color (linear RGB)
    pub color: [f32; 3],
    /// Intensity multiplier
    pub intensity: f32,
}

impl PointLight {
    /// Create a new point light
    pub fn new(position: [f32; 3], range: f32, color: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            range,
            color,
            intensity,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new([2.0, 2.0, 2.0], 10.0, [1.0, 1.0, 1.0], 1.0)
    }
}
