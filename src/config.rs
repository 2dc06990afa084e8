//! Controls and scene configuration.
//!
//! Controls load leniently (fall back to defaults with a warning) since bad
//! tuning is recoverable. The scene loads strictly: a door pointing at a
//! missing inventory slot or an impossible animation is a configuration
//! error surfaced at startup, never a silent mid-interaction failure.

use anyhow::{Context, Result};
use glam::Vec3;
use latchkey_core::{KeyInventory, ObjectId};
use latchkey_interact::{Door, DoorConfig, PickupConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONTROLS_PATH: &str = "config/controls.toml";

/// Player tuning and interaction-ray parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Walk speed in units per second.
    pub walk_speed: f32,
    /// Downward acceleration in units per second squared.
    pub gravity: f32,
    /// Horizontal look sensitivity.
    pub look_speed_x: f32,
    /// Vertical look sensitivity.
    pub look_speed_y: f32,
    /// Upper pitch limit in degrees.
    pub upper_look_limit: f32,
    /// Lower pitch limit in degrees.
    pub lower_look_limit: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Maximum distance of the interaction ray.
    pub interaction_distance: f32,
    /// Viewport point the interaction ray is cast from, (0.5, 0.5) = center.
    pub ray_point: [f32; 2],
    /// Sound effects volume (0.0 to 1.0).
    pub sfx_volume: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            gravity: 30.0,
            look_speed_x: 2.0,
            look_speed_y: 2.0,
            upper_look_limit: 80.0,
            lower_look_limit: 80.0,
            fov_degrees: 70.0,
            interaction_distance: 2.5,
            ray_point: [0.5, 0.5],
            sfx_volume: 1.0,
        }
    }
}

impl ControlsConfig {
    /// Load controls configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONTROLS_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ControlsConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ControlsConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONTROLS_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Controls config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ControlsConfig::default()
            }
        }
    }
}

/// Where the player starts.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSpawn {
    /// Feet position.
    pub position: Vec3,
    /// Initial facing in degrees.
    #[serde(default)]
    pub yaw_degrees: f32,
}

/// Static level geometry (blocks rays and movement, never interacts).
#[derive(Debug, Clone, Deserialize)]
pub struct SceneryConfig {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

/// Full scene description loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// Number of key slots in the shared inventory.
    pub inventory_slots: usize,
    /// Player spawn.
    pub player: PlayerSpawn,
    /// Static geometry.
    #[serde(default)]
    pub scenery: Vec<SceneryConfig>,
    /// Doors.
    #[serde(default)]
    pub doors: Vec<DoorConfig>,
    /// Key pickups.
    #[serde(default)]
    pub pickups: Vec<PickupConfig>,
}

impl SceneConfig {
    /// Check every cross-reference and parameter that would otherwise fail
    /// silently at runtime.
    pub fn validate(&self) -> Result<()> {
        let inventory = KeyInventory::new(self.inventory_slots);
        for (i, door) in self.doors.iter().enumerate() {
            inventory
                .validate(door.key)
                .with_context(|| format!("door #{i}"))?;
            // Dry-build to surface animation-parameter errors now.
            Door::new(ObjectId(0), door).with_context(|| format!("door #{i}"))?;
        }
        for (i, pickup) in self.pickups.iter().enumerate() {
            inventory
                .validate(pickup.key)
                .with_context(|| format!("pickup #{i}"))?;
        }
        for (i, scenery) in self.scenery.iter().enumerate() {
            let size = scenery.max - scenery.min;
            if size.min_element() <= 0.0 {
                anyhow::bail!("scenery #{i}: max must exceed min on every axis");
            }
        }
        Ok(())
    }
}

/// Load and validate a scene file.
pub fn load_scene(path: &Path) -> Result<SceneConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    let scene: SceneConfig = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse scene {}", path.display()))?;
    scene
        .validate()
        .with_context(|| format!("invalid scene {}", path.display()))?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_core::KeyId;

    fn minimal_scene(extra: &str) -> String {
        format!(
            r#"{{
                "inventory_slots": 2,
                "player": {{ "position": [0.0, 0.0, 0.0] }}
                {extra}
            }}"#
        )
    }

    fn door_json(key: usize) -> String {
        format!(
            r#",
            "doors": [{{
                "kind": "rotating",
                "key": {key},
                "position": [2.0, 0.0, 0.0],
                "sounds": {{
                    "open": "door/open",
                    "close": "door/close",
                    "push": "door/push",
                    "lock": "door/lock",
                    "unlock": "door/unlock",
                    "creaks": ["door/creak_1"]
                }}
            }}]"#
        )
    }

    #[test]
    fn parses_minimal_scene() {
        let scene: SceneConfig = serde_json::from_str(&minimal_scene("")).unwrap();
        assert_eq!(scene.inventory_slots, 2);
        assert!(scene.doors.is_empty());
        scene.validate().unwrap();
    }

    #[test]
    fn parses_door_with_defaults() {
        let scene: SceneConfig = serde_json::from_str(&minimal_scene(&door_json(0))).unwrap();
        scene.validate().unwrap();
        let door = &scene.doors[0];
        assert!(door.locked);
        assert_eq!(door.speed, 1.0);
        assert_eq!(door.rotation_degrees, 90.0);
        assert_eq!(door.key, KeyId(0));
    }

    #[test]
    fn rejects_out_of_range_key() {
        let scene: SceneConfig = serde_json::from_str(&minimal_scene(&door_json(5))).unwrap();
        let err = scene.validate().unwrap_err();
        assert!(err.to_string().contains("door #0"));
    }

    #[test]
    fn rejects_out_of_range_pickup_key() {
        let json = minimal_scene(r#", "pickups": [{ "key": 9, "position": [0.0, 0.5, 1.0] }]"#);
        let scene: SceneConfig = serde_json::from_str(&json).unwrap();
        assert!(scene.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_scenery() {
        let json = minimal_scene(
            r#", "scenery": [{ "min": [0.0, 0.0, 0.0], "max": [0.0, 1.0, 1.0] }]"#,
        );
        let scene: SceneConfig = serde_json::from_str(&json).unwrap();
        assert!(scene.validate().is_err());
    }

    #[test]
    fn controls_default_roundtrip() {
        let defaults = ControlsConfig::default();
        let toml = toml::to_string(&defaults).unwrap();
        let parsed: ControlsConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.walk_speed, defaults.walk_speed);
        assert_eq!(parsed.ray_point, defaults.ray_point);
    }
}
