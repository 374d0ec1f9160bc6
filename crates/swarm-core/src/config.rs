//! Simulation configuration.
//!
//! One immutable `SwarmConfig` is built (usually from a scenario file),
//! validated once when the engine is constructed, and passed by reference
//! everywhere after that. Any value accepted by `validate` is safe for the
//! whole run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{ResolutionStrategy, TimeOfDay, Weather};

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Complete parameter set for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// RNG seed. Same seed and config = same run.
    pub seed: u64,
    pub field_size: f64,
    pub max_steps: u64,
    pub spawn: SpawnConfig,
    pub drone: DroneConfig,
    pub steering: SteeringConfig,
    pub learning: LearningConfig,
    pub turret: TurretConfig,
    pub assignment: AssignmentConfig,
    pub enemy: EnemyConfig,
    pub rocket: RocketConfig,
    pub advanced: AdvancedAiConfig,
    pub roles: RoleConfig,
    pub environment: EnvironmentConfig,
    pub terrain: TerrainConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            field_size: FIELD_SIZE,
            max_steps: MAX_SIMULATION_STEPS,
            spawn: SpawnConfig::default(),
            drone: DroneConfig::default(),
            steering: SteeringConfig::default(),
            learning: LearningConfig::default(),
            turret: TurretConfig::default(),
            assignment: AssignmentConfig::default(),
            enemy: EnemyConfig::default(),
            rocket: RocketConfig::default(),
            advanced: AdvancedAiConfig::default(),
            roles: RoleConfig::default(),
            environment: EnvironmentConfig::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

/// Entity counts and placement for randomly generated worlds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub num_drones: usize,
    pub num_targets: usize,
    pub num_turrets: usize,
    pub num_obstacles: usize,
    pub num_enemies: usize,
    pub obstacle_min_size: f64,
    pub obstacle_max_size: f64,
    pub enemy_edge_band: f64,
    pub enemy_id_base: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            num_drones: NUM_DRONES,
            num_targets: NUM_TARGETS,
            num_turrets: NUM_TURRETS,
            num_obstacles: NUM_OBSTACLES,
            num_enemies: NUM_ENEMIES,
            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            enemy_edge_band: ENEMY_EDGE_BAND,
            enemy_id_base: ENEMY_ID_BASE,
        }
    }
}

/// Base flight parameters shared by every drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    pub max_speed: f64,
    pub max_fuel: f64,
    pub fuel_consumption_rate: f64,
    pub sensor_range: f64,
    pub attack_range: f64,
    pub low_fuel_threshold: f64,
    pub trajectory_length: usize,
    pub wall_restitution: f64,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            max_speed: DRONE_MAX_SPEED,
            max_fuel: DRONE_MAX_FUEL,
            fuel_consumption_rate: DRONE_FUEL_CONSUMPTION_RATE,
            sensor_range: DRONE_SENSOR_RANGE,
            attack_range: DRONE_ATTACK_RANGE,
            low_fuel_threshold: LOW_FUEL_THRESHOLD,
            trajectory_length: TRAJECTORY_LENGTH,
            wall_restitution: WALL_RESTITUTION,
        }
    }
}

/// Steering-term weights and shaping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub weight_cohesion: f64,
    pub weight_separation: f64,
    pub weight_alignment: f64,
    pub weight_target_seeking: f64,
    pub weight_obstacle_avoidance: f64,
    pub weight_turret_avoidance: f64,
    pub obstacle_avoidance_distance: f64,
    pub avoiding_threshold: f64,
    pub steep_slope_degrees: f64,
    pub slope_damping_span: f64,
    pub min_slope_damping: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            weight_cohesion: WEIGHT_COHESION,
            weight_separation: WEIGHT_SEPARATION,
            weight_alignment: WEIGHT_ALIGNMENT,
            weight_target_seeking: WEIGHT_TARGET_SEEKING,
            weight_obstacle_avoidance: WEIGHT_OBSTACLE_AVOIDANCE,
            weight_turret_avoidance: WEIGHT_TURRET_AVOIDANCE,
            obstacle_avoidance_distance: OBSTACLE_AVOIDANCE_DISTANCE,
            avoiding_threshold: AVOIDING_STATUS_THRESHOLD,
            steep_slope_degrees: STEEP_SLOPE_DEGREES,
            slope_damping_span: SLOPE_DAMPING_SPAN,
            min_slope_damping: MIN_SLOPE_DAMPING,
        }
    }
}

/// Learned turret avoidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub initial_avoid_factor: f64,
    pub avoid_increase: f64,
    pub max_avoid_factor: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            initial_avoid_factor: DRONE_INITIAL_AVOID_FACTOR,
            avoid_increase: DRONE_LEARNED_AVOID_INCREASE,
            max_avoid_factor: DRONE_MAX_AVOID_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub range: f64,
    pub cooldown: u32,
    /// How a turret shot resolves.
    pub resolution: ResolutionStrategy,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            range: TURRET_RANGE,
            cooldown: TURRET_COOLDOWN,
            resolution: ResolutionStrategy::Deterministic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    pub limit: u32,
    pub congestion_penalty: f64,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            limit: TARGET_ASSIGNMENT_LIMIT,
            congestion_penalty: ASSIGNMENT_CONGESTION_PENALTY,
        }
    }
}

/// Enemy hunter drones and their attack patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Pick a random attack pattern per enemy; otherwise every enemy is direct.
    pub randomize_patterns: bool,
    pub max_fuel: f64,
    pub fuel_consumption_rate: f64,
    pub max_force: f64,
    pub melee_radius: f64,
    /// How a melee contact resolves.
    pub melee_resolution: ResolutionStrategy,
    pub obstacle_margin: f64,
    pub obstacle_weight: f64,
    pub turret_range_factor: f64,
    pub turret_standoff: f64,
    pub turret_weight: f64,
    pub flank_distance: f64,
    pub flank_min_prey_speed: f64,
    pub ambush_samples: usize,
    pub ambush_cover_search: f64,
    pub ambush_cover_offset: f64,
    pub ambush_hidden_bonus: f64,
    pub ambush_trigger_radius: f64,
    pub swarm_ring_radius: f64,
    pub steep_slope_degrees: f64,
    pub steep_speed_factor: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            randomize_patterns: true,
            max_fuel: ENEMY_MAX_FUEL,
            fuel_consumption_rate: ENEMY_FUEL_CONSUMPTION_RATE,
            max_force: ENEMY_MAX_FORCE,
            melee_radius: ENEMY_MELEE_RADIUS,
            melee_resolution: ResolutionStrategy::Probabilistic {
                probability: ENEMY_MELEE_KILL_PROBABILITY,
            },
            obstacle_margin: ENEMY_OBSTACLE_MARGIN,
            obstacle_weight: ENEMY_OBSTACLE_WEIGHT,
            turret_range_factor: ENEMY_TURRET_RANGE_FACTOR,
            turret_standoff: ENEMY_TURRET_STANDOFF,
            turret_weight: ENEMY_TURRET_WEIGHT,
            flank_distance: FLANK_DISTANCE,
            flank_min_prey_speed: FLANK_MIN_PREY_SPEED,
            ambush_samples: AMBUSH_SAMPLES,
            ambush_cover_search: AMBUSH_COVER_SEARCH,
            ambush_cover_offset: AMBUSH_COVER_OFFSET,
            ambush_hidden_bonus: AMBUSH_HIDDEN_BONUS,
            ambush_trigger_radius: AMBUSH_TRIGGER_RADIUS,
            swarm_ring_radius: SWARM_RING_RADIUS,
            steep_slope_degrees: ENEMY_STEEP_SLOPE_DEGREES,
            steep_speed_factor: ENEMY_STEEP_SPEED_FACTOR,
        }
    }
}

/// Turret-launched guided rockets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    pub enabled: bool,
    pub launch_interval: u64,
    pub fuel: u32,
    pub speed: f64,
    pub blast_radius: f64,
    pub lookahead: f64,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            launch_interval: ROCKET_LAUNCH_INTERVAL,
            fuel: ROCKET_FUEL,
            speed: ROCKET_SPEED,
            blast_radius: ROCKET_BLAST_RADIUS,
            lookahead: ROCKET_LOOKAHEAD,
        }
    }
}

/// Evasion, formation and threat-memory layer for friendly drones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedAiConfig {
    pub enabled: bool,
    pub evasion_chance: f64,
    pub evasion_impulse: f64,
    pub evasion_cooldown: u32,
    pub turret_range_fraction: f64,
    pub turret_gain: f64,
    pub turret_memory_ttl: u32,
    pub enemy_danger_radius: f64,
    pub enemy_gain: f64,
    pub enemy_memory_ttl: u32,
    pub formation_radius: f64,
    pub formation_far_band: f64,
    pub formation_near_band: f64,
    pub formation_attract: f64,
    pub formation_repel: f64,
    pub formation_align: f64,
    pub memory_radius: f64,
    pub memory_ttl_scale: f64,
    pub evasion_weight: f64,
    pub formation_weight: f64,
    pub memory_weight: f64,
}

impl Default for AdvancedAiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            evasion_chance: EVASION_CHANCE,
            evasion_impulse: EVASION_IMPULSE,
            evasion_cooldown: EVASION_COOLDOWN,
            turret_range_fraction: EVASION_TURRET_RANGE_FRACTION,
            turret_gain: EVASION_TURRET_GAIN,
            turret_memory_ttl: TURRET_MEMORY_TTL,
            enemy_danger_radius: ENEMY_DANGER_RADIUS,
            enemy_gain: EVASION_ENEMY_GAIN,
            enemy_memory_ttl: ENEMY_MEMORY_TTL,
            formation_radius: FORMATION_RADIUS,
            formation_far_band: FORMATION_FAR_BAND,
            formation_near_band: FORMATION_NEAR_BAND,
            formation_attract: FORMATION_ATTRACT,
            formation_repel: FORMATION_REPEL,
            formation_align: FORMATION_ALIGN,
            memory_radius: MEMORY_RADIUS,
            memory_ttl_scale: MEMORY_TTL_SCALE,
            evasion_weight: ADVANCED_EVASION_WEIGHT,
            formation_weight: ADVANCED_FORMATION_WEIGHT,
            memory_weight: ADVANCED_MEMORY_WEIGHT,
        }
    }
}

/// Operational roles for enhanced friendly drones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub enabled: bool,
    pub scout_grid_size: usize,
    pub scout_speed_fraction: f64,
    pub attacker_probe_distance: f64,
    pub attacker_headings: usize,
    pub defender_offset: f64,
    pub support_sectors: usize,
    pub support_sector_alignment: f64,
    pub force_weight: f64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scout_grid_size: SCOUT_GRID_SIZE,
            scout_speed_fraction: SCOUT_SPEED_FRACTION,
            attacker_probe_distance: ATTACKER_PROBE_DISTANCE,
            attacker_headings: ATTACKER_HEADINGS,
            defender_offset: DEFENDER_OFFSET,
            support_sectors: SUPPORT_SECTORS,
            support_sector_alignment: SUPPORT_SECTOR_ALIGNMENT,
            force_weight: ROLE_FORCE_WEIGHT,
        }
    }
}

/// Time of day and weather.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub time_of_day: TimeOfDay,
    pub weather: Weather,
}

impl EnvironmentConfig {
    /// Combined visibility factor in `(0, 1]`.
    pub fn visibility(&self) -> f64 {
        let light = match self.time_of_day {
            TimeOfDay::Day => 1.0,
            TimeOfDay::Dusk => VISIBILITY_DUSK,
            TimeOfDay::Night => VISIBILITY_NIGHT,
        };
        let air = match self.weather {
            Weather::Clear => 1.0,
            Weather::Cloudy => VISIBILITY_CLOUDY,
            Weather::Rain => VISIBILITY_RAIN,
            Weather::Fog => VISIBILITY_FOG,
        };
        light * air
    }

    /// Scale on friendly perception range. Only darkness narrows perception.
    pub fn perception_scale(&self) -> f64 {
        if self.time_of_day == TimeOfDay::Night {
            self.visibility()
        } else {
            1.0
        }
    }

    /// Scale on friendly max speed. Rain and fog slow drones down.
    pub fn speed_scale(&self) -> f64 {
        if matches!(self.weather, Weather::Rain | Weather::Fog) {
            self.visibility()
        } else {
            1.0
        }
    }
}

/// Ground model. Flat unless `synthetic` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub synthetic: bool,
    /// Terrain seed. Falls back to the run seed.
    pub seed: Option<u64>,
    pub resolution: usize,
    pub meters_per_unit: f64,
    pub max_elevation: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            synthetic: false,
            seed: None,
            resolution: TERRAIN_RESOLUTION,
            meters_per_unit: TERRAIN_METERS_PER_UNIT,
            max_elevation: TERRAIN_MAX_ELEVATION,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "non-negative",
            value,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "finite",
            value,
        })
    }
}

/// Whether `count` enemy ids starting at `base` run past `u32::MAX`.
pub fn enemy_ids_overflow(base: u32, count: usize) -> bool {
    u32::try_from(count)
        .ok()
        .and_then(|n| base.checked_add(n))
        .is_none()
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "within [0, 1]",
            value,
        })
    }
}

fn strategy(field: &'static str, s: ResolutionStrategy) -> Result<(), ConfigError> {
    match s {
        ResolutionStrategy::Deterministic => Ok(()),
        ResolutionStrategy::Probabilistic { probability: p } => probability(field, p),
    }
}

impl SwarmConfig {
    /// Check every parameter. Called by the engine before the first tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_size", self.field_size)?;

        let s = &self.spawn;
        positive("spawn.obstacle_min_size", s.obstacle_min_size)?;
        positive("spawn.obstacle_max_size", s.obstacle_max_size)?;
        if s.obstacle_min_size > s.obstacle_max_size {
            return Err(ConfigError::InvalidConfig(
                "spawn.obstacle_min_size cannot exceed spawn.obstacle_max_size",
            ));
        }
        non_negative("spawn.enemy_edge_band", s.enemy_edge_band)?;
        if s.enemy_edge_band > self.field_size {
            return Err(ConfigError::InvalidConfig(
                "spawn.enemy_edge_band cannot exceed field_size",
            ));
        }
        if (s.num_drones as u64) > s.enemy_id_base as u64 {
            return Err(ConfigError::InvalidConfig(
                "spawn.enemy_id_base must leave room for every friendly drone id",
            ));
        }
        if enemy_ids_overflow(s.enemy_id_base, s.num_enemies) {
            return Err(ConfigError::InvalidConfig(
                "spawn.enemy_id_base plus spawn.num_enemies overflows the id space",
            ));
        }

        let d = &self.drone;
        positive("drone.max_speed", d.max_speed)?;
        positive("drone.max_fuel", d.max_fuel)?;
        non_negative("drone.fuel_consumption_rate", d.fuel_consumption_rate)?;
        non_negative("drone.sensor_range", d.sensor_range)?;
        non_negative("drone.attack_range", d.attack_range)?;
        probability("drone.low_fuel_threshold", d.low_fuel_threshold)?;
        probability("drone.wall_restitution", d.wall_restitution)?;

        let st = &self.steering;
        non_negative("steering.weight_cohesion", st.weight_cohesion)?;
        non_negative("steering.weight_separation", st.weight_separation)?;
        non_negative("steering.weight_alignment", st.weight_alignment)?;
        non_negative("steering.weight_target_seeking", st.weight_target_seeking)?;
        non_negative("steering.weight_obstacle_avoidance", st.weight_obstacle_avoidance)?;
        non_negative("steering.weight_turret_avoidance", st.weight_turret_avoidance)?;
        non_negative("steering.obstacle_avoidance_distance", st.obstacle_avoidance_distance)?;
        non_negative("steering.avoiding_threshold", st.avoiding_threshold)?;
        non_negative("steering.steep_slope_degrees", st.steep_slope_degrees)?;
        positive("steering.slope_damping_span", st.slope_damping_span)?;
        probability("steering.min_slope_damping", st.min_slope_damping)?;

        let l = &self.learning;
        non_negative("learning.initial_avoid_factor", l.initial_avoid_factor)?;
        non_negative("learning.avoid_increase", l.avoid_increase)?;
        non_negative("learning.max_avoid_factor", l.max_avoid_factor)?;
        if l.initial_avoid_factor > l.max_avoid_factor {
            return Err(ConfigError::InvalidConfig(
                "learning.initial_avoid_factor cannot exceed learning.max_avoid_factor",
            ));
        }

        positive("turret.range", self.turret.range)?;
        strategy("turret.resolution", self.turret.resolution)?;

        if self.assignment.limit == 0 {
            return Err(ConfigError::InvalidConfig("assignment.limit must be at least 1"));
        }
        non_negative("assignment.congestion_penalty", self.assignment.congestion_penalty)?;

        let e = &self.enemy;
        positive("enemy.max_fuel", e.max_fuel)?;
        non_negative("enemy.fuel_consumption_rate", e.fuel_consumption_rate)?;
        non_negative("enemy.max_force", e.max_force)?;
        non_negative("enemy.melee_radius", e.melee_radius)?;
        strategy("enemy.melee_resolution", e.melee_resolution)?;
        non_negative("enemy.obstacle_margin", e.obstacle_margin)?;
        non_negative("enemy.obstacle_weight", e.obstacle_weight)?;
        non_negative("enemy.turret_range_factor", e.turret_range_factor)?;
        non_negative("enemy.turret_standoff", e.turret_standoff)?;
        non_negative("enemy.turret_weight", e.turret_weight)?;
        non_negative("enemy.flank_distance", e.flank_distance)?;
        non_negative("enemy.flank_min_prey_speed", e.flank_min_prey_speed)?;
        non_negative("enemy.ambush_cover_search", e.ambush_cover_search)?;
        non_negative("enemy.ambush_cover_offset", e.ambush_cover_offset)?;
        non_negative("enemy.ambush_hidden_bonus", e.ambush_hidden_bonus)?;
        non_negative("enemy.ambush_trigger_radius", e.ambush_trigger_radius)?;
        non_negative("enemy.swarm_ring_radius", e.swarm_ring_radius)?;
        probability("enemy.steep_speed_factor", e.steep_speed_factor)?;

        let r = &self.rocket;
        if r.enabled && r.launch_interval == 0 {
            return Err(ConfigError::InvalidConfig(
                "rocket.launch_interval must be at least 1 when rockets are enabled",
            ));
        }
        positive("rocket.speed", r.speed)?;
        non_negative("rocket.blast_radius", r.blast_radius)?;
        non_negative("rocket.lookahead", r.lookahead)?;

        let a = &self.advanced;
        probability("advanced.evasion_chance", a.evasion_chance)?;
        non_negative("advanced.evasion_impulse", a.evasion_impulse)?;
        probability("advanced.turret_range_fraction", a.turret_range_fraction)?;
        non_negative("advanced.turret_gain", a.turret_gain)?;
        positive("advanced.enemy_danger_radius", a.enemy_danger_radius)?;
        non_negative("advanced.enemy_gain", a.enemy_gain)?;
        non_negative("advanced.formation_radius", a.formation_radius)?;
        non_negative("advanced.formation_far_band", a.formation_far_band)?;
        non_negative("advanced.formation_near_band", a.formation_near_band)?;
        non_negative("advanced.formation_attract", a.formation_attract)?;
        non_negative("advanced.formation_repel", a.formation_repel)?;
        non_negative("advanced.formation_align", a.formation_align)?;
        non_negative("advanced.evasion_weight", a.evasion_weight)?;
        non_negative("advanced.formation_weight", a.formation_weight)?;
        non_negative("advanced.memory_weight", a.memory_weight)?;
        if a.formation_near_band > a.formation_far_band {
            return Err(ConfigError::InvalidConfig(
                "advanced.formation_near_band cannot exceed advanced.formation_far_band",
            ));
        }
        positive("advanced.memory_radius", a.memory_radius)?;
        positive("advanced.memory_ttl_scale", a.memory_ttl_scale)?;

        let ro = &self.roles;
        if ro.scout_grid_size == 0 || ro.attacker_headings == 0 || ro.support_sectors == 0 {
            return Err(ConfigError::InvalidConfig(
                "roles grid size, heading count and sector count must be non-zero",
            ));
        }
        non_negative("roles.scout_speed_fraction", ro.scout_speed_fraction)?;
        non_negative("roles.attacker_probe_distance", ro.attacker_probe_distance)?;
        finite("roles.support_sector_alignment", ro.support_sector_alignment)?;
        non_negative("roles.defender_offset", ro.defender_offset)?;
        non_negative("roles.force_weight", ro.force_weight)?;

        let t = &self.terrain;
        if t.synthetic && t.resolution < 2 {
            return Err(ConfigError::InvalidConfig("terrain.resolution must be at least 2"));
        }
        positive("terrain.meters_per_unit", t.meters_per_unit)?;
        non_negative("terrain.max_elevation", t.max_elevation)?;

        Ok(())
    }
}
