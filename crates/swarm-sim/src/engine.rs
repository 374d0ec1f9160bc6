//! Simulation engine, the core of the swarm simulation.
//!
//! `SwarmEngine` owns the hecs ECS world, the validated configuration, the
//! terrain provider and the seeded RNG. It runs all systems once per tick
//! and produces views, statistics and events. Completely headless, enabling
//! deterministic testing.

use std::sync::Arc;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

use swarm_core::components::*;
use swarm_core::config::SwarmConfig;
use swarm_core::events::{EventLog, SimEvent};
use swarm_core::memory::LearnedAvoidance;
use swarm_core::state::{CombatTally, Statistics, WorldView};
use swarm_core::types::SimTime;
use swarm_terrain::{generate_heightmap, FlatTerrain, SyntheticTerrainParams, TerrainProvider};

use crate::error::SimError;
use crate::frame::Frame;
use crate::persistence::{self, DroneRecord, WorldSnapshot};
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SwarmEngine {
    world: World,
    config: SwarmConfig,
    terrain: Arc<dyn TerrainProvider>,
    time: SimTime,
    rng: ChaCha8Rng,
    tally: CombatTally,
    next_rocket_id: u32,
    despawn_buffer: Vec<Entity>,
    events: EventLog,
}

impl SwarmEngine {
    /// Validate `config` and populate a random world from its spawn section.
    pub fn new(config: SwarmConfig) -> Result<Self, SimError> {
        let mut engine = Self::blank(config)?;
        world_setup::populate(&mut engine.world, &engine.config, &mut engine.rng);
        info!(
            seed = engine.config.seed,
            drones = engine.config.spawn.num_drones,
            enemies = engine.config.spawn.num_enemies,
            targets = engine.config.spawn.num_targets,
            turrets = engine.config.spawn.num_turrets,
            "swarm engine ready"
        );
        Ok(engine)
    }

    /// Validated engine with an empty world.
    pub(crate) fn blank(config: SwarmConfig) -> Result<Self, SimError> {
        config.validate()?;
        let terrain = build_terrain(&config)?;
        Ok(Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            terrain,
            time: SimTime::default(),
            tally: CombatTally::default(),
            next_rocket_id: 0,
            despawn_buffer: Vec::new(),
            events: EventLog::default(),
        })
    }

    /// Replace the terrain provider. Snapshots do not carry custom providers;
    /// a restored engine rebuilds terrain from its config.
    pub fn with_terrain(mut self, terrain: Arc<dyn TerrainProvider>) -> Self {
        self.terrain = terrain;
        self
    }

    /// Advance the simulation by one tick and return the events it produced.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let was_complete = self.is_complete();
        self.time.advance();
        self.run_systems();
        trace!(tick = self.time.tick, events = self.events.events().len(), "tick complete");

        if !was_complete && self.is_complete() {
            let stats = self.statistics();
            info!(
                tick = self.time.tick,
                targets_destroyed = stats.targets_destroyed,
                drones_alive = stats.drones_alive,
                "simulation complete"
            );
        }
        self.events.drain()
    }

    /// Step until `is_complete`. Returns the final statistics.
    pub fn run_to_completion(&mut self) -> Statistics {
        while !self.is_complete() {
            self.step();
        }
        self.statistics()
    }

    /// Max steps reached, every target destroyed, or no friendly drone left
    /// that can still fly.
    pub fn is_complete(&self) -> bool {
        let stats = self.statistics();
        self.time.tick >= self.config.max_steps || stats.targets_remaining == 0 || stats.drones_active == 0
    }

    pub fn statistics(&self) -> Statistics {
        systems::snapshot::build_statistics(&self.world, &self.time, &self.tally)
    }

    /// Read-only view of the whole world for presentation layers.
    pub fn view(&self) -> WorldView {
        systems::snapshot::build_view(&self.world, &self.time, self.config.field_size, &self.tally)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn terrain(&self) -> &dyn TerrainProvider {
        self.terrain.as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drones of both factions, sorted by id.
    pub fn drones(&self) -> Vec<Drone> {
        sorted(&self.world, |d: &Drone| d.id)
    }

    pub fn drone(&self, id: u32) -> Option<Drone> {
        self.world
            .query::<&Drone>()
            .iter()
            .find(|(_, d)| d.id == id)
            .map(|(_, d)| *d)
    }

    pub fn targets(&self) -> Vec<Target> {
        sorted(&self.world, |t: &Target| t.id)
    }

    pub fn turrets(&self) -> Vec<Turret> {
        sorted(&self.world, |t: &Turret| t.id)
    }

    pub fn obstacles(&self) -> Vec<Obstacle> {
        sorted(&self.world, |o: &Obstacle| o.id)
    }

    /// Rockets still in flight.
    pub fn rockets(&self) -> Vec<Rocket> {
        let mut rockets = sorted(&self.world, |r: &Rocket| r.id);
        rockets.retain(|r| r.alive);
        rockets
    }

    /// Learned turret avoidance of a friendly drone.
    pub fn learned_avoidance(&self, drone_id: u32) -> Option<LearnedAvoidance> {
        self.world
            .query::<(&Drone, &LearnedAvoidance)>()
            .iter()
            .find(|(_, (d, _))| d.id == drone_id)
            .map(|(_, (_, learned))| learned.clone())
    }

    /// Capture the complete simulation state.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut drones: Vec<DroneRecord> = self
            .world
            .query::<(
                &Drone,
                Option<&Trajectory>,
                Option<&LearnedAvoidance>,
                Option<&EnemyBrain>,
                Option<&AdvancedAi>,
                Option<&RoleBrain>,
            )>()
            .iter()
            .map(|(_, (drone, trajectory, learned, brain, ai, role))| DroneRecord {
                drone: *drone,
                trajectory: trajectory.cloned().unwrap_or_default(),
                learned: learned.cloned(),
                brain: brain.copied(),
                ai: ai.cloned(),
                role: role.map(|r| r.role),
            })
            .collect();
        drones.sort_by_key(|r| r.drone.id);

        WorldSnapshot {
            config: self.config.clone(),
            time: self.time,
            rng: self.rng.clone(),
            tally: self.tally,
            next_rocket_id: self.next_rocket_id,
            obstacles: self.obstacles(),
            targets: self.targets(),
            turrets: self.turrets(),
            drones,
            rockets: self.rockets(),
        }
    }

    /// Rebuild an engine from a snapshot. Stepping it produces exactly what
    /// the captured engine would have produced.
    pub fn restore(snapshot: WorldSnapshot) -> Result<Self, SimError> {
        persistence::check_consistency(&snapshot)?;
        let mut engine = Self::blank(snapshot.config)?;
        engine.time = snapshot.time;
        engine.rng = snapshot.rng;
        engine.tally = snapshot.tally;
        engine.next_rocket_id = snapshot.next_rocket_id;

        let world = &mut engine.world;
        for obstacle in snapshot.obstacles {
            world.spawn((obstacle,));
        }
        for target in snapshot.targets {
            world.spawn((target,));
        }
        for turret in snapshot.turrets {
            world.spawn((turret,));
        }
        for record in snapshot.drones {
            world_setup::spawn_record(world, record);
        }
        for rocket in snapshot.rockets {
            world.spawn((rocket,));
        }

        info!(tick = engine.time.tick, "swarm engine restored");
        Ok(engine)
    }

    /// Place a rocket homing on `target_drone` (for testing).
    #[cfg(test)]
    pub fn spawn_test_rocket(&mut self, position: swarm_core::types::Vec2, target_drone: u32) -> u32 {
        let rcfg = &self.config.rocket;
        let id = self.next_rocket_id;
        self.next_rocket_id += 1;
        self.world.spawn((Rocket {
            id,
            launcher: 0,
            position,
            velocity: swarm_core::types::Vec2::ZERO,
            alive: true,
            fuel: rcfg.fuel,
            target_drone,
            speed: rcfg.speed,
            blast_radius: rcfg.blast_radius,
            lookahead: rcfg.lookahead,
        },));
        id
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick_seed: u64 = self.rng.gen();

        // 1. Turrets (cooldown, fire, threat learning)
        systems::turret::run(
            &mut self.world,
            &self.config,
            &mut self.rng,
            &mut self.events,
            &mut self.tally,
        );
        // 2. Frame capture with environment scaling
        let frame = Frame::capture(&self.world, &self.config.environment);
        // 3. Friendly drones (steering, fuel, attacks, movement)
        systems::drones::run(
            &mut self.world,
            &frame,
            self.terrain.as_ref(),
            &self.config,
            tick_seed,
            &mut self.events,
        );
        // 4. Enemy drones (patterns, movement, melee)
        systems::enemies::run(
            &mut self.world,
            &frame,
            self.terrain.as_ref(),
            &self.config,
            tick_seed,
            &mut self.rng,
            &mut self.events,
            &mut self.tally,
        );
        // 5. Rockets in flight
        systems::rockets::run(&mut self.world, &frame.obstacles, &mut self.events, &mut self.tally);
        // 6. Rocket launches
        systems::launch::run(
            &mut self.world,
            &self.config,
            self.time.tick,
            &mut self.rng,
            &mut self.next_rocket_id,
            &mut self.events,
        );
        // 7. Target assignment for idle drones
        systems::assignment::run(&mut self.world, &self.config.assignment, &mut self.events);
        // 8. Cleanup (inert rockets)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}

/// Copies of every `T` in the world, sorted by `key`.
fn sorted<T, K>(world: &World, key: impl Fn(&T) -> K) -> Vec<T>
where
    T: hecs::Component + Clone,
    K: Ord,
{
    let mut items: Vec<T> = world.query::<&T>().iter().map(|(_, item)| item.clone()).collect();
    items.sort_by_key(|item| key(item));
    items
}

/// Flat ground unless the config asks for a synthetic heightmap.
fn build_terrain(config: &SwarmConfig) -> Result<Arc<dyn TerrainProvider>, SimError> {
    let t = &config.terrain;
    if !t.synthetic {
        return Ok(Arc::new(FlatTerrain));
    }
    let params = SyntheticTerrainParams {
        seed: t.seed.unwrap_or(config.seed),
        resolution: t.resolution,
        field_size: config.field_size,
        meters_per_unit: t.meters_per_unit,
        max_elevation: t.max_elevation,
    };
    let grid = generate_heightmap(&params).map_err(SimError::Terrain)?;
    Ok(Arc::new(grid))
}
