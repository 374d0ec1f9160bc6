//! Rocket launch system: turrets with a free launcher fire at drones in range.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use swarm_core::components::{Drone, Rocket, Turret};
use swarm_core::config::SwarmConfig;
use swarm_core::events::{EventLog, SimEvent};
use swarm_core::types::Vec2;

/// On launch ticks, each ready turret picks a random enemy in range (or a
/// random friendly if no enemy is in range) and fires one rocket.
pub fn run(
    world: &mut World,
    cfg: &SwarmConfig,
    tick: u64,
    rng: &mut ChaCha8Rng,
    next_rocket_id: &mut u32,
    events: &mut EventLog,
) {
    let rcfg = &cfg.rocket;
    if !rcfg.enabled || rcfg.launch_interval == 0 || tick % rcfg.launch_interval != 0 {
        return;
    }

    let mut turrets: Vec<(Entity, Turret)> = world
        .query::<&Turret>()
        .iter()
        .map(|(entity, t)| (entity, *t))
        .collect();
    turrets.sort_by_key(|(_, t)| t.id);

    let mut drones: Vec<Drone> = world
        .query::<&Drone>()
        .iter()
        .filter(|(_, d)| d.alive)
        .map(|(_, d)| *d)
        .collect();
    drones.sort_by_key(|d| d.id);

    for (entity, mut turret) in turrets {
        if !turret.can_fire() {
            continue;
        }
        let in_range = |friendly: bool| -> Vec<u32> {
            drones
                .iter()
                .filter(|d| d.is_friendly() == friendly && turret.detects(d.position))
                .map(|d| d.id)
                .collect()
        };
        let mut pool = in_range(false);
        if pool.is_empty() {
            pool = in_range(true);
        }
        if pool.is_empty() {
            continue;
        }
        let target_drone = pool[rng.gen_range(0..pool.len())];

        let rocket = Rocket {
            id: *next_rocket_id,
            launcher: turret.id,
            position: turret.position,
            velocity: Vec2::ZERO,
            alive: true,
            fuel: rcfg.fuel,
            target_drone,
            speed: rcfg.speed,
            blast_radius: rcfg.blast_radius,
            lookahead: rcfg.lookahead,
        };
        *next_rocket_id += 1;
        world.spawn((rocket,));

        turret.cooldown_timer = turret.cooldown_max;
        if let Ok(mut stored) = world.get::<&mut Turret>(entity) {
            *stored = turret;
        }

        debug!(rocket = rocket.id, turret = turret.id, drone = target_drone, "rocket launched");
        events.push(SimEvent::RocketLaunched {
            rocket: rocket.id,
            turret: turret.id,
            target_drone,
        });
    }
}
