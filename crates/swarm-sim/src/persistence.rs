//! Scenario loading and snapshot save/load.
//!
//! Scenario files are YAML (or JSON by extension) holding a `SwarmConfig`.
//! Snapshots are JSON and carry the full world, the tick and the RNG state.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use swarm_core::components::*;
use swarm_core::config::SwarmConfig;
use swarm_core::enums::{Faction, OperationalRole};
use swarm_core::memory::LearnedAvoidance;
use swarm_core::state::CombatTally;
use swarm_core::types::SimTime;

use crate::error::SimError;

/// Complete, resumable simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub config: SwarmConfig,
    pub time: SimTime,
    pub rng: ChaCha8Rng,
    pub tally: CombatTally,
    pub next_rocket_id: u32,
    pub obstacles: Vec<Obstacle>,
    pub targets: Vec<Target>,
    pub turrets: Vec<Turret>,
    pub drones: Vec<DroneRecord>,
    /// Rockets in flight.
    pub rockets: Vec<Rocket>,
}

/// One drone and its optional behavior components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneRecord {
    pub drone: Drone,
    pub trajectory: Trajectory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned: Option<LearnedAvoidance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain: Option<EnemyBrain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AdvancedAi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<OperationalRole>,
}

/// Load and validate a scenario config. `.json` files are read as JSON,
/// everything else as YAML.
pub fn load_config(path: &Path) -> Result<SwarmConfig, SimError> {
    let text = read(path)?;
    let config: SwarmConfig = if is_json(path) {
        serde_json::from_str(&text).map_err(|source| SimError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&text).map_err(|source| SimError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Parse and validate a YAML scenario held in memory.
pub fn config_from_yaml_str(text: &str) -> Result<SwarmConfig, SimError> {
    let config: SwarmConfig = serde_yaml::from_str(text).map_err(|e| SimError::Format(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn config_to_yaml(config: &SwarmConfig) -> Result<String, SimError> {
    serde_yaml::to_string(config).map_err(|e| SimError::Format(e.to_string()))
}

pub fn save_snapshot(path: &Path, snapshot: &WorldSnapshot) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| SimError::Format(e.to_string()))?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
    }
    fs::write(path, json).map_err(|source| io_error(path, source))
}

pub fn load_snapshot(path: &Path) -> Result<WorldSnapshot, SimError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| SimError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, SimError> {
    if !path.exists() {
        return Err(SimError::FileNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> SimError {
    SimError::Io {
        path: PathBuf::from(path),
        source,
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Reject snapshots whose ids or cross-references do not line up.
pub fn check_consistency(snapshot: &WorldSnapshot) -> Result<(), SimError> {
    unique("obstacle", snapshot.obstacles.iter().map(|o| o.id))?;
    unique("target", snapshot.targets.iter().map(|t| t.id))?;
    unique("turret", snapshot.turrets.iter().map(|t| t.id))?;
    unique("drone", snapshot.drones.iter().map(|r| r.drone.id))?;
    unique("rocket", snapshot.rockets.iter().map(|r| r.id))?;

    let drone_ids: BTreeSet<u32> = snapshot.drones.iter().map(|r| r.drone.id).collect();
    let mut holders: BTreeMap<u32, u32> = BTreeMap::new();

    for record in &snapshot.drones {
        let drone = &record.drone;
        if (drone.faction == Faction::Enemy) != record.brain.is_some() {
            return Err(mismatch(format!(
                "drone {} has faction {:?} but brain presence {}",
                drone.id,
                drone.faction,
                record.brain.is_some()
            )));
        }
        if drone.is_friendly() && record.learned.is_none() {
            return Err(mismatch(format!(
                "friendly drone {} carries no learned avoidance",
                drone.id
            )));
        }
        if let Some(target_id) = drone.target {
            if !snapshot.targets.iter().any(|t| t.id == target_id) {
                return Err(mismatch(format!(
                    "drone {} references missing target {target_id}",
                    drone.id
                )));
            }
            if drone.is_active() {
                *holders.entry(target_id).or_insert(0) += 1;
            }
        }
        if let Some(prey) = record.brain.and_then(|b| b.prey) {
            if !drone_ids.contains(&prey) {
                return Err(mismatch(format!(
                    "enemy {} hunts missing drone {prey}",
                    drone.id
                )));
            }
        }
    }

    for turret in &snapshot.turrets {
        if turret.cooldown_timer > turret.cooldown_max {
            return Err(mismatch(format!(
                "turret {} cooldown {} exceeds its maximum {}",
                turret.id, turret.cooldown_timer, turret.cooldown_max
            )));
        }
    }

    let limit = snapshot.config.assignment.limit;
    for target in &snapshot.targets {
        if target.assigned_drones > limit {
            return Err(mismatch(format!(
                "target {} holds {} drones above the limit {limit}",
                target.id, target.assigned_drones
            )));
        }
        let held = holders.get(&target.id).copied().unwrap_or(0);
        if target.assigned_drones != held {
            return Err(mismatch(format!(
                "target {} counts {} assigned drones but {held} drones hold it",
                target.id, target.assigned_drones
            )));
        }
    }

    for rocket in &snapshot.rockets {
        if !drone_ids.contains(&rocket.target_drone) {
            return Err(mismatch(format!(
                "rocket {} homes on missing drone {}",
                rocket.id, rocket.target_drone
            )));
        }
        if rocket.id >= snapshot.next_rocket_id {
            return Err(mismatch(format!(
                "rocket {} is not below next rocket id {}",
                rocket.id, snapshot.next_rocket_id
            )));
        }
    }
    Ok(())
}

fn unique(kind: &str, ids: impl Iterator<Item = u32>) -> Result<(), SimError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(mismatch(format!("duplicate {kind} id {id}")));
        }
    }
    Ok(())
}

fn mismatch(message: String) -> SimError {
    SimError::SnapshotMismatch(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SwarmEngine;

    fn small_config() -> SwarmConfig {
        let mut config = SwarmConfig::default();
        config.seed = 5;
        config.spawn.num_enemies = 2;
        config
    }

    #[test]
    fn test_yaml_config_fills_defaults() {
        let config = config_from_yaml_str(
            "seed: 9\nspawn:\n  num_drones: 4\nturret:\n  resolution:\n    kind: probabilistic\n    probability: 0.5\n",
        )
        .unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.spawn.num_drones, 4);
        assert_eq!(config.spawn.num_targets, SwarmConfig::default().spawn.num_targets);
        assert_eq!(
            config.turret.resolution,
            swarm_core::enums::ResolutionStrategy::Probabilistic { probability: 0.5 }
        );
    }

    #[test]
    fn test_yaml_config_is_validated() {
        let err = config_from_yaml_str("field_size: -1\n").unwrap_err();
        assert!(matches!(err, SimError::Config(_)), "got {err}");
    }

    #[test]
    fn test_default_config_yaml_round_trip() {
        let yaml = config_to_yaml(&SwarmConfig::default()).unwrap();
        let parsed = config_from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, SwarmConfig::default());
    }

    #[test]
    fn test_demo_scenario_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/demo.yaml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.spawn.num_enemies, 4);
        assert!(config.rocket.enabled);
        assert_eq!(config.environment.weather, swarm_core::enums::Weather::Cloudy);
    }

    #[test]
    fn test_missing_file_reported() {
        let path = std::env::temp_dir().join("swarm_sim_test_does_not_exist.yaml");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, SimError::FileNotFound(_)), "got {err}");
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = std::env::temp_dir().join("swarm_sim_test_snapshot_file");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("snap.json");

        let mut engine = SwarmEngine::new(small_config()).unwrap();
        for _ in 0..20 {
            engine.step();
        }
        let snapshot = engine.snapshot();
        save_snapshot(&path, &snapshot).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(
            serde_json::to_string(&loaded).unwrap(),
            serde_json::to_string(&snapshot).unwrap()
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let engine = SwarmEngine::new(small_config()).unwrap();
        let mut snapshot = engine.snapshot();
        let copy = snapshot.targets[0];
        snapshot.targets.push(copy);
        let err = check_consistency(&snapshot).unwrap_err();
        assert!(matches!(err, SimError::SnapshotMismatch(_)), "got {err}");
    }

    #[test]
    fn test_dangling_target_rejected() {
        let engine = SwarmEngine::new(small_config()).unwrap();
        let mut snapshot = engine.snapshot();
        snapshot.drones[0].drone.target = Some(999);
        assert!(check_consistency(&snapshot).is_err());
    }

    #[test]
    fn test_assignment_counter_mismatch_rejected() {
        let mut engine = SwarmEngine::new(small_config()).unwrap();
        engine.step();
        let mut snapshot = engine.snapshot();
        snapshot.targets[0].assigned_drones += 1;
        assert!(SwarmEngine::restore(snapshot).is_err());
    }

    #[test]
    fn test_friendly_without_learned_avoidance_rejected() {
        let engine = SwarmEngine::new(small_config()).unwrap();
        let mut snapshot = engine.snapshot();
        assert!(snapshot.drones[0].drone.is_friendly());
        snapshot.drones[0].learned = None;

        let json = serde_json::to_string(&snapshot).unwrap();
        let reloaded: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert!(reloaded.drones[0].learned.is_none());
        let err = SwarmEngine::restore(reloaded).err().unwrap();
        assert!(matches!(err, SimError::SnapshotMismatch(_)), "got {err}");
    }

    #[test]
    fn test_turret_cooldown_above_max_rejected() {
        let engine = SwarmEngine::new(small_config()).unwrap();
        let mut snapshot = engine.snapshot();
        let max = snapshot.turrets[0].cooldown_max;
        snapshot.turrets[0].cooldown_timer = max;
        assert!(check_consistency(&snapshot).is_ok());
        snapshot.turrets[0].cooldown_timer = max + 1;
        let err = check_consistency(&snapshot).unwrap_err();
        assert!(matches!(err, SimError::SnapshotMismatch(_)), "got {err}");
    }

    #[test]
    fn test_target_above_assignment_limit_rejected() {
        let mut engine = SwarmEngine::new(small_config()).unwrap();
        engine.step();
        let mut snapshot = engine.snapshot();
        // Counters still match the holders; only the limit is broken.
        let held = snapshot
            .targets
            .iter()
            .find(|t| t.assigned_drones > 0)
            .map(|t| t.assigned_drones)
            .unwrap();
        snapshot.config.assignment.limit = held - 1;
        let err = check_consistency(&snapshot).unwrap_err();
        assert!(err.to_string().contains("above the limit"), "got {err}");
    }
}
