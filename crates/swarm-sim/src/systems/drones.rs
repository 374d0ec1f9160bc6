//! Friendly drone system: steering, fuel, attacks and integration.
//!
//! Runs in two phases. Forces are computed against the tick's frame with a
//! private random stream per drone (in parallel with the `parallel`
//! feature). The results are then committed serially in id order, which is
//! where fuel, status, target kills and movement are applied.

use hecs::{Entity, World};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use swarm_core::components::{AdvancedAi, Drone, RoleBrain, Trajectory};
use swarm_core::config::SwarmConfig;
use swarm_core::enums::{DroneStatus, OperationalRole};
use swarm_core::events::{EventLog, SimEvent};
use swarm_core::memory::LearnedAvoidance;
use swarm_core::types::{clamp_speed, Field, Vec2};
use swarm_tactics::context::Surroundings;
use swarm_tactics::steering::{self, SteeringOutput};
use swarm_tactics::{advanced, roles};
use swarm_terrain::TerrainProvider;

use crate::frame::Frame;
use crate::systems::{drone_rng, lifecycle};

/// Inputs for one drone's force computation.
struct Pilot {
    entity: Entity,
    /// Frame copy with this tick's environment scaling.
    drone: Drone,
    learned: LearnedAvoidance,
    ai: Option<AdvancedAi>,
    role: Option<OperationalRole>,
}

/// Computed but not yet committed.
struct Maneuver {
    entity: Entity,
    steering: SteeringOutput,
    /// Advanced-AI and role contributions.
    extra: Vec2,
    ai: Option<AdvancedAi>,
}

/// Update every active friendly drone.
pub fn run(
    world: &mut World,
    frame: &Frame,
    terrain: &dyn TerrainProvider,
    cfg: &SwarmConfig,
    tick_seed: u64,
    events: &mut EventLog,
) {
    let field = Field::new(cfg.field_size);
    let env = frame.surroundings(terrain, field);
    let pilots = gather(world, &env);

    #[cfg(feature = "parallel")]
    let maneuvers: Vec<Maneuver> = pilots
        .par_iter()
        .map(|pilot| plan(pilot, &env, cfg, tick_seed))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let maneuvers: Vec<Maneuver> = pilots
        .iter()
        .map(|pilot| plan(pilot, &env, cfg, tick_seed))
        .collect();

    let speed_scale = cfg.environment.speed_scale();
    for maneuver in maneuvers {
        commit(world, maneuver, cfg, field, speed_scale, events);
    }
}

fn gather(world: &World, env: &Surroundings) -> Vec<Pilot> {
    let mut pilots: Vec<Pilot> = world
        .query::<(&Drone, &LearnedAvoidance, Option<&AdvancedAi>, Option<&RoleBrain>)>()
        .iter()
        .filter(|(_, (d, ..))| d.is_friendly() && d.is_active())
        .filter_map(|(entity, (d, learned, ai, role))| {
            let scaled = env.drone(d.id)?;
            Some(Pilot {
                entity,
                drone: *scaled,
                learned: learned.clone(),
                ai: ai.cloned(),
                role: role.map(|r| r.role),
            })
        })
        .collect();
    pilots.sort_by_key(|p| p.drone.id);
    pilots
}

fn plan(pilot: &Pilot, env: &Surroundings, cfg: &SwarmConfig, tick_seed: u64) -> Maneuver {
    let mut rng = drone_rng(tick_seed, pilot.drone.id);
    let steering = steering::compute_force(&pilot.drone, &pilot.learned, env, cfg, &mut rng);

    let mut extra = Vec2::ZERO;
    let mut ai = pilot.ai.clone();
    if let Some(ai) = ai.as_mut() {
        extra += advanced::advanced_force(&pilot.drone, ai, env, cfg, &mut rng);
    }
    if let Some(role) = pilot.role {
        extra += roles::role_force(&pilot.drone, role, env, cfg, &mut rng);
    }

    Maneuver {
        entity: pilot.entity,
        steering,
        extra,
        ai,
    }
}

fn commit(
    world: &World,
    maneuver: Maneuver,
    cfg: &SwarmConfig,
    field: Field,
    speed_scale: f64,
    events: &mut EventLog,
) {
    let entity = maneuver.entity;
    let Ok(mut drone) = world.get::<&Drone>(entity).map(|d| *d) else {
        return;
    };
    if !drone.is_active() {
        return;
    }

    drone.fuel -= cfg.drone.fuel_consumption_rate;
    if drone.fuel <= 0.0 {
        drone.fuel = 0.0;
        drone.status = DroneStatus::NoFuel;
        if let Some(target_id) = drone.target.take() {
            lifecycle::release_target(world, target_id);
        }
        events.push(SimEvent::DroneOutOfFuel { drone: drone.id });
        store(world, entity, drone);
        return;
    }

    drone.status = if drone.fuel / cfg.drone.max_fuel < cfg.drone.low_fuel_threshold {
        DroneStatus::LowFuel
    } else if drone.target.is_some() {
        DroneStatus::Moving
    } else {
        DroneStatus::Idle
    };

    if let Some(target_id) = maneuver.steering.attack {
        // Clears this drone's reference in the world as well.
        if lifecycle::destroy_target(world, target_id, drone.id, events) {
            drone.status = DroneStatus::Attacking;
        }
        drone.target = None;
    } else if maneuver.steering.turret_pressure > cfg.steering.avoiding_threshold {
        drone.status = DroneStatus::Avoiding;
    }

    let velocity = clamp_speed(
        drone.velocity + maneuver.steering.force + maneuver.extra,
        drone.traits.max_speed * speed_scale,
    );
    let (position, velocity) = field.bounce(drone.position + velocity, velocity, cfg.drone.wall_restitution);
    drone.position = position;
    drone.velocity = velocity;

    if let Ok(mut trajectory) = world.get::<&mut Trajectory>(entity) {
        trajectory.record(position);
    }
    if let (Some(next), Ok(mut ai)) = (maneuver.ai, world.get::<&mut AdvancedAi>(entity)) {
        *ai = next;
    }
    store(world, entity, drone);
}

fn store(world: &World, entity: Entity, drone: Drone) {
    if let Ok(mut stored) = world.get::<&mut Drone>(entity) {
        *stored = drone;
    }
}
