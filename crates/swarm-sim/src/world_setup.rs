//! Entity spawn factories for setting up the simulation world.
//!
//! Random worlds come from the config's spawn section; hand-placed worlds
//! come from `ScenarioBuilder`. Role and attack-pattern trait multipliers
//! are applied here, once, at spawn.

use std::sync::Arc;

use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use swarm_core::components::*;
use swarm_core::config::{enemy_ids_overflow, ConfigError, SwarmConfig};
use swarm_core::enums::*;
use swarm_core::memory::LearnedAvoidance;
use swarm_core::types::{Field, Vec2};
use swarm_tactics::profiles::{base_traits, pattern_profile, role_profile};
use swarm_terrain::TerrainProvider;

use crate::engine::SwarmEngine;
use crate::error::SimError;
use crate::persistence::DroneRecord;

/// Populate a random world: friendly drones, targets, obstacles, turrets,
/// then enemies around the field edges.
pub fn populate(world: &mut World, cfg: &SwarmConfig, rng: &mut ChaCha8Rng) {
    let spawn = &cfg.spawn;
    let size = cfg.field_size;

    for i in 0..spawn.num_drones {
        let position = random_point(rng, size);
        let role = cfg
            .roles
            .enabled
            .then(|| OperationalRole::ALL[rng.gen_range(0..OperationalRole::ALL.len())]);
        spawn_friendly(world, cfg, i as u32, position, role);
    }

    for i in 0..spawn.num_targets {
        let position = random_point(rng, size);
        spawn_target(world, i as u32, position);
    }

    for i in 0..spawn.num_obstacles {
        let position = random_point(rng, size);
        let diameter = rng.gen_range(spawn.obstacle_min_size..=spawn.obstacle_max_size);
        spawn_obstacle(world, i as u32, position, diameter / 2.0);
    }

    for i in 0..spawn.num_turrets {
        let position = random_point(rng, size);
        spawn_turret(world, cfg, i as u32, position);
    }

    for i in 0..spawn.num_enemies {
        let position = edge_point(rng, size, spawn.enemy_edge_band, i);
        let pattern = if cfg.enemy.randomize_patterns {
            AttackPattern::ALL[rng.gen_range(0..AttackPattern::ALL.len())]
        } else {
            AttackPattern::Direct
        };
        spawn_enemy(world, cfg, spawn.enemy_id_base + i as u32, position, pattern);
    }
}

fn random_point(rng: &mut ChaCha8Rng, size: f64) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size))
}

/// Point within `band` of one field edge. Edges rotate top, right, bottom,
/// left with the enemy index.
fn edge_point(rng: &mut ChaCha8Rng, size: f64, band: f64, index: usize) -> Vec2 {
    let along = rng.gen_range(0.0..size);
    let inset = rng.gen_range(0.0..=band);
    match index % 4 {
        0 => Vec2::new(along, size - inset),
        1 => Vec2::new(size - inset, along),
        2 => Vec2::new(along, inset),
        _ => Vec2::new(inset, along),
    }
}

pub fn spawn_obstacle(world: &mut World, id: u32, position: Vec2, radius: f64) -> Entity {
    world.spawn((Obstacle { id, position, radius },))
}

pub fn spawn_target(world: &mut World, id: u32, position: Vec2) -> Entity {
    world.spawn((Target {
        id,
        position,
        alive: true,
        assigned_drones: 0,
    },))
}

pub fn spawn_turret(world: &mut World, cfg: &SwarmConfig, id: u32, position: Vec2) -> Entity {
    world.spawn((Turret {
        id,
        position,
        range: cfg.turret.range,
        cooldown_timer: 0,
        cooldown_max: cfg.turret.cooldown,
    },))
}

/// Spawn a friendly drone with full fuel. Gets the advanced AI layer when
/// enabled in the config, and a role brain when `role` is given.
pub fn spawn_friendly(
    world: &mut World,
    cfg: &SwarmConfig,
    id: u32,
    position: Vec2,
    role: Option<OperationalRole>,
) -> Entity {
    let mut traits = base_traits(cfg);
    if let Some(role) = role {
        traits = role_profile(role).apply(traits);
    }
    let drone = Drone {
        id,
        faction: Faction::Friendly,
        position,
        velocity: Vec2::ZERO,
        fuel: cfg.drone.max_fuel,
        alive: true,
        status: DroneStatus::Idle,
        target: None,
        traits,
    };

    let mut builder = EntityBuilder::new();
    builder
        .add(drone)
        .add(Trajectory::with_capacity(cfg.drone.trajectory_length))
        .add(LearnedAvoidance::default());
    if cfg.advanced.enabled {
        builder.add(AdvancedAi::default());
    }
    if let Some(role) = role {
        builder.add(RoleBrain { role });
    }
    world.spawn(builder.build())
}

/// Spawn an enemy hunter with its pattern's trait multipliers.
pub fn spawn_enemy(
    world: &mut World,
    cfg: &SwarmConfig,
    id: u32,
    position: Vec2,
    pattern: AttackPattern,
) -> Entity {
    let drone = Drone {
        id,
        faction: Faction::Enemy,
        position,
        velocity: Vec2::ZERO,
        fuel: cfg.enemy.max_fuel,
        alive: true,
        status: DroneStatus::Idle,
        target: None,
        traits: pattern_profile(pattern).apply(base_traits(cfg)),
    };
    world.spawn((
        drone,
        Trajectory::with_capacity(cfg.drone.trajectory_length),
        EnemyBrain::new(pattern),
    ))
}

/// Respawn a drone captured in a snapshot with exactly its recorded components.
pub fn spawn_record(world: &mut World, record: DroneRecord) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add(record.drone).add(record.trajectory);
    if let Some(learned) = record.learned {
        builder.add(learned);
    }
    if let Some(brain) = record.brain {
        builder.add(brain);
    }
    if let Some(ai) = record.ai {
        builder.add(ai);
    }
    if let Some(role) = record.role {
        builder.add(RoleBrain { role });
    }
    world.spawn(builder.build())
}

/// Hand-placed scenario. Ids are assigned in insertion order per kind;
/// enemy ids start at `spawn.enemy_id_base`.
pub struct ScenarioBuilder {
    config: SwarmConfig,
    terrain: Option<Arc<dyn TerrainProvider>>,
    obstacles: Vec<(Vec2, f64)>,
    targets: Vec<Vec2>,
    turrets: Vec<Vec2>,
    friendlies: Vec<(Vec2, Option<OperationalRole>)>,
    enemies: Vec<(Vec2, AttackPattern)>,
}

impl ScenarioBuilder {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            terrain: None,
            obstacles: Vec::new(),
            targets: Vec::new(),
            turrets: Vec::new(),
            friendlies: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub fn terrain(mut self, terrain: Arc<dyn TerrainProvider>) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn obstacle(mut self, position: Vec2, radius: f64) -> Self {
        self.obstacles.push((position, radius));
        self
    }

    pub fn target(mut self, position: Vec2) -> Self {
        self.targets.push(position);
        self
    }

    /// Turret with the configured range and cooldown.
    pub fn turret(mut self, position: Vec2) -> Self {
        self.turrets.push(position);
        self
    }

    pub fn drone(mut self, position: Vec2) -> Self {
        self.friendlies.push((position, None));
        self
    }

    pub fn drone_with_role(mut self, position: Vec2, role: OperationalRole) -> Self {
        self.friendlies.push((position, Some(role)));
        self
    }

    pub fn enemy(mut self, position: Vec2, pattern: AttackPattern) -> Self {
        self.enemies.push((position, pattern));
        self
    }

    /// Validate the config and layout and build the engine.
    pub fn build(self) -> Result<SwarmEngine, SimError> {
        let mut engine = SwarmEngine::blank(self.config)?;
        if let Some(terrain) = self.terrain {
            engine = engine.with_terrain(terrain);
        }
        let cfg = engine.config().clone();

        if self.friendlies.len() as u64 > u64::from(cfg.spawn.enemy_id_base) {
            return Err(ConfigError::InvalidConfig(
                "spawn.enemy_id_base must leave room for every friendly drone id",
            )
            .into());
        }
        if enemy_ids_overflow(cfg.spawn.enemy_id_base, self.enemies.len()) {
            return Err(ConfigError::InvalidConfig(
                "spawn.enemy_id_base plus the placed enemies overflows the id space",
            )
            .into());
        }
        let field = Field::new(cfg.field_size);
        let placed = self
            .obstacles
            .iter()
            .map(|(p, _)| p)
            .chain(&self.targets)
            .chain(&self.turrets)
            .chain(self.friendlies.iter().map(|(p, _)| p))
            .chain(self.enemies.iter().map(|(p, _)| p));
        for position in placed {
            if !field.contains(*position) {
                return Err(SimError::InvalidPlacement(format!(
                    "position {position} lies outside the field"
                )));
            }
        }

        let world = engine.world_mut();
        for (i, (position, radius)) in self.obstacles.into_iter().enumerate() {
            spawn_obstacle(world, i as u32, position, radius);
        }
        for (i, position) in self.targets.into_iter().enumerate() {
            spawn_target(world, i as u32, position);
        }
        for (i, position) in self.turrets.into_iter().enumerate() {
            spawn_turret(world, &cfg, i as u32, position);
        }
        for (i, (position, role)) in self.friendlies.into_iter().enumerate() {
            spawn_friendly(world, &cfg, i as u32, position, role);
        }
        for (i, (position, pattern)) in self.enemies.into_iter().enumerate() {
            spawn_enemy(world, &cfg, cfg.spawn.enemy_id_base + i as u32, position, pattern);
        }
        Ok(engine)
    }
}
