//! Scene asset payload
//!
//! A scene is a flat list of entity records. Component data is kept
//! as raw JSON values so the asset layer stays independent of the
//! runtime component set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entity in a scene
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Component name -> component data
    #[serde(default)]
    pub components: BTreeMap<String, serde_json::Value>,
}

/// Scene description, persisted as pretty JSON (`.escn`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneAsset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
}

impl SceneAsset {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_json_round_trip() {
        let mut scene = SceneAsset::named("sandbox");
        scene.entities.push(SceneEntity {
            id: 1,
            name: Some("camera".into()),
            components: BTreeMap::from([(
                "Transform".to_string(),
                serde_json::json!({ "position": [0.0, 1.0, 5.0] }),
            )]),
        });

        let json = serde_json::to_string_pretty(&scene).unwrap();
        let back: SceneAsset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_scene_tolerates_missing_fields() {
        let scene: SceneAsset = serde_json::from_str("{}").unwrap();
        assert!(scene.entities.is_empty());
    }
}
