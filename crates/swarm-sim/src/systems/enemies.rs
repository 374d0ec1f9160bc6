//! Enemy drone system: pattern evaluation, fuel, movement and melee.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use swarm_core::components::{Drone, EnemyBrain, Trajectory};
use swarm_core::config::SwarmConfig;
use swarm_core::enums::DroneStatus;
use swarm_core::events::{EventLog, KillCause, SimEvent};
use swarm_core::state::CombatTally;
use swarm_core::types::{clamp_speed, Field};
use swarm_tactics::context::Surroundings;
use swarm_tactics::patterns::{self, EnemyDecision};
use swarm_terrain::TerrainProvider;

use crate::combat;
use crate::frame::Frame;
use crate::systems::{drone_rng, lifecycle};

/// Update every active enemy drone.
///
/// Decisions are made against the frame; melee is checked against the
/// friendly positions committed earlier in the tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    frame: &Frame,
    terrain: &dyn TerrainProvider,
    cfg: &SwarmConfig,
    tick_seed: u64,
    rng: &mut ChaCha8Rng,
    events: &mut EventLog,
    tally: &mut CombatTally,
) {
    let field = Field::new(cfg.field_size);
    let env = frame.surroundings(terrain, field);
    let hunters = gather(world);

    #[cfg(feature = "parallel")]
    let decisions: Vec<(Entity, EnemyDecision)> = hunters
        .par_iter()
        .map(|(entity, drone, brain)| (*entity, decide(drone, brain, &env, cfg, tick_seed)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let decisions: Vec<(Entity, EnemyDecision)> = hunters
        .iter()
        .map(|(entity, drone, brain)| (*entity, decide(drone, brain, &env, cfg, tick_seed)))
        .collect();

    for (entity, decision) in decisions {
        let Some(enemy) = commit(world, entity, decision, cfg, field, events) else {
            continue;
        };
        if decision.melee_armed {
            melee(world, &enemy, cfg, rng, events, tally);
        }
    }
}

fn gather(world: &World) -> Vec<(Entity, Drone, EnemyBrain)> {
    let mut hunters: Vec<(Entity, Drone, EnemyBrain)> = world
        .query::<(&Drone, &EnemyBrain)>()
        .iter()
        .filter(|(_, (d, _))| d.is_active())
        .map(|(entity, (d, brain))| (entity, *d, *brain))
        .collect();
    hunters.sort_by_key(|(_, d, _)| d.id);
    hunters
}

fn decide(
    enemy: &Drone,
    brain: &EnemyBrain,
    env: &Surroundings,
    cfg: &SwarmConfig,
    tick_seed: u64,
) -> EnemyDecision {
    let mut rng = drone_rng(tick_seed, enemy.id);
    patterns::evaluate(enemy, brain, env, cfg, &mut rng)
}

/// Apply fuel, brain state and movement. Returns the moved enemy, or `None`
/// when it ran dry this tick.
fn commit(
    world: &World,
    entity: Entity,
    decision: EnemyDecision,
    cfg: &SwarmConfig,
    field: Field,
    events: &mut EventLog,
) -> Option<Drone> {
    let mut enemy = world.get::<&Drone>(entity).map(|d| *d).ok()?;
    let mut brain = world.get::<&EnemyBrain>(entity).map(|b| *b).ok()?;

    enemy.fuel -= cfg.enemy.fuel_consumption_rate;
    if enemy.fuel <= 0.0 {
        enemy.fuel = 0.0;
        enemy.alive = false;
        enemy.status = DroneStatus::NoFuel;
        brain.prey = None;
        brain.ambush_point = None;
        events.push(SimEvent::DroneOutOfFuel { drone: enemy.id });
        store(world, entity, enemy, brain);
        return None;
    }

    brain.prey = decision.prey;
    brain.ambush_point = decision.ambush_point;
    enemy.status = if brain.prey.is_some() {
        DroneStatus::Hunting
    } else {
        DroneStatus::Idle
    };

    let velocity = clamp_speed(
        enemy.velocity + decision.force,
        enemy.traits.max_speed * decision.speed_scale,
    );
    let (position, velocity) = field.bounce(enemy.position + velocity, velocity, cfg.drone.wall_restitution);
    enemy.position = position;
    enemy.velocity = velocity;

    if let Ok(mut trajectory) = world.get::<&mut Trajectory>(entity) {
        trajectory.record(position);
    }
    store(world, entity, enemy, brain);
    Some(enemy)
}

/// Try to kill friendlies inside melee radius in id order. The first kill
/// ends the attempt.
fn melee(
    world: &World,
    enemy: &Drone,
    cfg: &SwarmConfig,
    rng: &mut ChaCha8Rng,
    events: &mut EventLog,
    tally: &mut CombatTally,
) {
    let radius = cfg.enemy.melee_radius;
    let mut victims: Vec<(u32, Entity)> = world
        .query::<&Drone>()
        .iter()
        .filter(|(_, d)| d.is_friendly() && d.alive && d.position.distance(enemy.position) < radius)
        .map(|(entity, d)| (d.id, entity))
        .collect();
    victims.sort_unstable_by_key(|(id, _)| *id);

    for (_, victim) in victims {
        if !combat::attempt_kill(cfg.enemy.melee_resolution, rng) {
            continue;
        }
        if lifecycle::destroy_drone(world, victim, KillCause::Melee { enemy: enemy.id }, events) {
            tally.melee_kills += 1;
            break;
        }
    }
}

fn store(world: &World, entity: Entity, enemy: Drone, brain: EnemyBrain) {
    if let Ok(mut stored) = world.get::<&mut Drone>(entity) {
        *stored = enemy;
    }
    if let Ok(mut stored) = world.get::<&mut EnemyBrain>(entity) {
        *stored = brain;
    }
}
