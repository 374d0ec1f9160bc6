#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use swarm_core::components::*;
    use swarm_core::config::SwarmConfig;
    use swarm_core::enums::*;
    use swarm_core::memory::{LearnedAvoidance, ThreatSource};
    use swarm_core::types::{Field, Vec2};
    use swarm_terrain::{FlatTerrain, TerrainProvider};

    use crate::advanced::{advanced_force, formation};
    use crate::context::Surroundings;
    use crate::patterns::{evaluate, evasion};
    use crate::profiles::{base_traits, pattern_profile, role_profile};
    use crate::roles::{attacker, defender, role_force, support};
    use crate::steering::{compute_force, flocking};

    /// Terrain with a constant slope that blocks every line of sight.
    struct SteepTerrain;

    impl TerrainProvider for SteepTerrain {
        fn elevation(&self, _at: Vec2) -> f64 {
            0.0
        }
        fn slope(&self, _at: Vec2) -> f64 {
            90.0
        }
        fn line_of_sight_clear(&self, _a: Vec2, _b: Vec2) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct World {
        drones: Vec<Drone>,
        targets: Vec<Target>,
        obstacles: Vec<Obstacle>,
        turrets: Vec<Turret>,
    }

    impl World {
        fn env<'a>(&'a self, terrain: &'a dyn TerrainProvider) -> Surroundings<'a> {
            Surroundings {
                drones: &self.drones,
                targets: &self.targets,
                obstacles: &self.obstacles,
                turrets: &self.turrets,
                terrain,
                field: Field::new(100.0),
            }
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn drone(id: u32, faction: Faction, x: f64, y: f64) -> Drone {
        Drone {
            id,
            faction,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            fuel: 600.0,
            alive: true,
            status: if faction == Faction::Enemy {
                DroneStatus::Hunting
            } else {
                DroneStatus::Idle
            },
            target: None,
            traits: base_traits(&SwarmConfig::default()),
        }
    }

    fn target(id: u32, x: f64, y: f64) -> Target {
        Target {
            id,
            position: Vec2::new(x, y),
            alive: true,
            assigned_drones: 1,
        }
    }

    fn turret(id: u32, x: f64, y: f64) -> Turret {
        Turret {
            id,
            position: Vec2::new(x, y),
            range: 20.0,
            cooldown_timer: 0,
            cooldown_max: 8,
        }
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    fn same_direction(a: Vec2, b: Vec2) -> bool {
        approx(a.normalize(), b.normalize())
    }

    // ---- Steering ----

    #[test]
    fn test_seek_toward_assigned_target() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 0.0, 0.0);
        d.target = Some(0);
        let world = World {
            drones: vec![d],
            targets: vec![target(0, 50.0, 0.0)],
            ..Default::default()
        };
        let out = compute_force(&d, &LearnedAvoidance::default(), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert!(approx(out.force, Vec2::new(2.0, 0.0)), "got {}", out.force);
        assert_eq!(out.attack, None);
    }

    #[test]
    fn test_attack_replaces_seek_inside_range() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 0.0, 0.0);
        d.target = Some(0);
        let world = World {
            drones: vec![d],
            targets: vec![target(0, 3.0, 0.0)],
            ..Default::default()
        };
        let out = compute_force(&d, &LearnedAvoidance::default(), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(out.attack, Some(0));
        assert_eq!(out.force, Vec2::ZERO);
    }

    #[test]
    fn test_dead_target_is_ignored() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 0.0, 0.0);
        d.target = Some(0);
        let mut t = target(0, 3.0, 0.0);
        t.alive = false;
        let world = World {
            drones: vec![d],
            targets: vec![t],
            ..Default::default()
        };
        let out = compute_force(&d, &LearnedAvoidance::default(), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(out.attack, None);
        assert_eq!(out.force, Vec2::ZERO);
    }

    #[test]
    fn test_turret_pressure_and_learning() {
        let cfg = SwarmConfig::default();
        let d = drone(0, Faction::Friendly, 5.0, 0.0);
        let world = World {
            drones: vec![d],
            turrets: vec![turret(7, 10.0, 0.0)],
            ..Default::default()
        };
        let env = world.env(&FlatTerrain);

        let naive = compute_force(&d, &LearnedAvoidance::default(), &env, &cfg, &mut rng());
        assert!((naive.turret_pressure - 0.5625).abs() < 1e-12);
        assert!(naive.force.x < 0.0, "drone should be pushed away from the turret");

        let mut learned = LearnedAvoidance::default();
        learned.register_threat(7, 1.0, 0.5, 5.0);
        let wary = compute_force(&d, &learned, &env, &cfg, &mut rng());
        assert!(
            wary.force.x < naive.force.x,
            "learned factor should strengthen avoidance: {} vs {}",
            wary.force.x,
            naive.force.x
        );
    }

    #[test]
    fn test_turret_pressure_ignores_learned_factor() {
        let cfg = SwarmConfig::default();
        // Halfway into a range-20 turret: (1 - 10/20)^2 = 0.25.
        let d = drone(0, Faction::Friendly, 0.0, 0.0);
        let world = World {
            drones: vec![d],
            turrets: vec![turret(4, 10.0, 0.0)],
            ..Default::default()
        };
        let env = world.env(&FlatTerrain);

        let mut learned = LearnedAvoidance::default();
        for _ in 0..3 {
            learned.register_threat(4, 1.0, 0.5, 5.0);
        }
        assert!(learned.factor(4, 1.0) > 2.0);

        let out = compute_force(&d, &learned, &env, &cfg, &mut rng());
        assert!((out.turret_pressure - 0.25).abs() < 1e-12, "got {}", out.turret_pressure);
        assert!(out.turret_pressure <= cfg.steering.avoiding_threshold);
    }

    #[test]
    fn test_steep_slope_halves_force() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 0.0, 0.0);
        d.target = Some(0);
        let world = World {
            drones: vec![d],
            targets: vec![target(0, 50.0, 0.0)],
            ..Default::default()
        };
        let flat = compute_force(&d, &LearnedAvoidance::default(), &world.env(&FlatTerrain), &cfg, &mut rng());
        let steep = compute_force(&d, &LearnedAvoidance::default(), &world.env(&SteepTerrain), &cfg, &mut rng());
        assert!(approx(steep.force, flat.force * 0.5));
    }

    #[test]
    fn test_flocking_terms() {
        let cfg = SwarmConfig::default();
        let a = drone(0, Faction::Friendly, 0.0, 0.0);
        let b = drone(1, Faction::Friendly, 10.0, 0.0);
        let world = World {
            drones: vec![a, b],
            ..Default::default()
        };
        // cohesion (10,0)*0.02, separation (-1,0)*(30/10)*0.2
        let f = flocking(&a, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert!(approx(f, Vec2::new(-0.4, 0.0)), "got {f}");
    }

    #[test]
    fn test_flocking_without_neighbors_is_zero() {
        let cfg = SwarmConfig::default();
        let a = drone(0, Faction::Friendly, 0.0, 0.0);
        let far = drone(1, Faction::Friendly, 40.0, 0.0);
        let enemy = drone(1000, Faction::Enemy, 1.0, 0.0);
        let world = World {
            drones: vec![a, far, enemy],
            ..Default::default()
        };
        assert_eq!(flocking(&a, &world.env(&FlatTerrain), &cfg, &mut rng()), Vec2::ZERO);
    }

    // ---- Enemy patterns ----

    #[test]
    fn test_direct_takes_nearest_prey() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![
                drone(1, Faction::Friendly, 10.0, 0.0),
                drone(2, Faction::Friendly, 30.0, 0.0),
                e,
            ],
            ..Default::default()
        };
        let brain = EnemyBrain::new(AttackPattern::Direct);
        let d = evaluate(&e, &brain, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.prey, Some(1));
        assert!(!d.melee_armed, "prey at 10 is outside attack range");
        assert!(approx(d.force, Vec2::new(0.5, 0.0)), "seek is force limited, got {}", d.force);
        assert_eq!(d.speed_scale, 1.0);
    }

    #[test]
    fn test_direct_arms_melee_in_range() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 3.0, 0.0), e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Direct), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert!(d.melee_armed);
    }

    #[test]
    fn test_locked_prey_kept_until_dead() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let mut far = drone(2, Faction::Friendly, 30.0, 0.0);
        let mut world = World {
            drones: vec![drone(1, Faction::Friendly, 10.0, 0.0), far, e],
            ..Default::default()
        };
        let mut brain = EnemyBrain::new(AttackPattern::Direct);
        brain.prey = Some(2);
        let d = evaluate(&e, &brain, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.prey, Some(2));

        far.alive = false;
        world.drones[1] = far;
        let d = evaluate(&e, &brain, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.prey, Some(1), "dead prey should be replaced by the nearest");
    }

    #[test]
    fn test_no_prey_means_no_seek() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 50.0, 50.0);
        let world = World {
            drones: vec![e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Swarm), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.prey, None);
        assert_eq!(d.force, Vec2::ZERO);
        assert!(!d.melee_armed);
    }

    #[test]
    fn test_flanking_aims_beside_moving_prey() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let mut prey = drone(1, Faction::Friendly, 20.0, 20.0);
        prey.velocity = Vec2::new(1.0, 0.0);
        let world = World {
            drones: vec![prey, e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Flanking), &world.env(&FlatTerrain), &cfg, &mut rng());
        // Near side of a prey heading +x, seen from below: (20, 20 - 7).
        assert!(same_direction(d.force, Vec2::new(20.0, 13.0)), "got {}", d.force);
    }

    #[test]
    fn test_flanking_stationary_prey_falls_back_to_direct() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 20.0, 20.0), e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Flanking), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert!(same_direction(d.force, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_swarm_ring_slots() {
        let cfg = SwarmConfig::default();
        let e0 = drone(1000, Faction::Enemy, 0.0, 0.0);
        let e1 = drone(1001, Faction::Enemy, 10.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 5.0, 20.0), e0, e1],
            ..Default::default()
        };
        let env = world.env(&FlatTerrain);
        let brain = EnemyBrain::new(AttackPattern::Swarm);

        let d0 = evaluate(&e0, &brain, &env, &cfg, &mut rng());
        let d1 = evaluate(&e1, &brain, &env, &cfg, &mut rng());
        assert_eq!(d0.prey, Some(1));
        assert_eq!(d1.prey, Some(1));
        // Slot 0 at angle 0, slot 1 at angle pi, radius 5 around (5, 20).
        assert!(same_direction(d0.force, Vec2::new(10.0, 20.0)), "got {}", d0.force);
        assert!(same_direction(d1.force, Vec2::new(-10.0, 20.0)), "got {}", d1.force);
    }

    #[test]
    fn test_lone_swarm_enemy_charges() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 0.0, 20.0), e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Swarm), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert!(same_direction(d.force, Vec2::Y));
    }

    #[test]
    fn test_ambush_hides_behind_obstacle() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 50.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 60.0, 50.0), e],
            obstacles: vec![Obstacle {
                id: 0,
                position: Vec2::new(50.0, 50.0),
                radius: 4.0,
            }],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Ambush), &world.env(&FlatTerrain), &cfg, &mut rng());
        let point = d.ambush_point.expect("cover exists near the prey");
        assert!(approx(point, Vec2::new(45.2, 50.0)), "got {point}");
        assert_eq!(d.prey, Some(1));
        assert!(!d.melee_armed);
        assert!(approx(d.force, Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn test_ambush_springs_at_hide_point() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 45.0, 50.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 48.0, 50.0), e],
            obstacles: vec![Obstacle {
                id: 0,
                position: Vec2::new(50.0, 50.0),
                radius: 4.0,
            }],
            ..Default::default()
        };
        let mut brain = EnemyBrain::new(AttackPattern::Ambush);
        brain.prey = Some(1);
        brain.ambush_point = Some(Vec2::new(45.2, 50.0));
        let d = evaluate(&e, &brain, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.ambush_point, brain.ambush_point, "hide point should be kept");
        assert!(d.melee_armed);
    }

    #[test]
    fn test_ambush_without_cover_charges() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 20.0, 0.0), e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Ambush), &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(d.ambush_point, None);
        assert_eq!(d.prey, Some(1));
        assert!(same_direction(d.force, Vec2::X));
    }

    #[test]
    fn test_enemy_turret_evasion() {
        let cfg = SwarmConfig::default();
        let world = World {
            turrets: vec![turret(0, 10.0, 0.0)],
            ..Default::default()
        };
        let f = evasion(Vec2::ZERO, &world.env(&FlatTerrain), &cfg.enemy, &mut rng());
        assert!(approx(f, Vec2::new(-0.3, 0.0)), "got {f}");
    }

    #[test]
    fn test_enemy_slows_on_steep_ground() {
        let cfg = SwarmConfig::default();
        let e = drone(1000, Faction::Enemy, 0.0, 0.0);
        let world = World {
            drones: vec![drone(1, Faction::Friendly, 20.0, 0.0), e],
            ..Default::default()
        };
        let d = evaluate(&e, &EnemyBrain::new(AttackPattern::Direct), &world.env(&SteepTerrain), &cfg, &mut rng());
        assert!((d.speed_scale - 0.7).abs() < 1e-12);
    }

    // ---- Advanced AI ----

    #[test]
    fn test_threat_memory_outlives_threat() {
        let mut cfg = SwarmConfig::default();
        cfg.advanced.evasion_chance = 0.0;
        let d = drone(0, Faction::Friendly, 0.0, 0.0);
        let mut ai = AdvancedAi::default();

        let with_turret = World {
            drones: vec![d],
            turrets: vec![turret(3, 10.0, 0.0)],
            ..Default::default()
        };
        advanced_force(&d, &mut ai, &with_turret.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(ai.memory.len(), 1);
        assert_eq!(ai.memory.entries()[0].source, ThreatSource::Turret(3));
        assert_eq!(ai.memory.entries()[0].ttl, 19, "remembered then aged once");

        let empty = World {
            drones: vec![d],
            ..Default::default()
        };
        let f = advanced_force(&d, &mut ai, &empty.env(&FlatTerrain), &cfg, &mut rng());
        // ttl 18: (18/20) * (1 - 10/20) * memory weight 1.2, pointing away.
        assert!(approx(f, Vec2::new(-0.54, 0.0)), "got {f}");
    }

    #[test]
    fn test_enemy_sighting_remembered() {
        let mut cfg = SwarmConfig::default();
        cfg.advanced.evasion_chance = 0.0;
        let d = drone(0, Faction::Friendly, 0.0, 0.0);
        let world = World {
            drones: vec![d, drone(1000, Faction::Enemy, 5.0, 0.0)],
            ..Default::default()
        };
        let mut ai = AdvancedAi::default();
        let f = advanced_force(&d, &mut ai, &world.env(&FlatTerrain), &cfg, &mut rng());
        assert_eq!(ai.memory.entries()[0].source, ThreatSource::Enemy(1000));
        assert_eq!(ai.memory.entries()[0].ttl, 14);
        assert!(f.x < 0.0, "should flee the enemy, got {f}");
    }

    #[test]
    fn test_evasion_impulse_cooldown() {
        let mut cfg = SwarmConfig::default();
        cfg.advanced.evasion_chance = 1.0;
        let d = drone(0, Faction::Friendly, 50.0, 50.0);
        let world = World {
            drones: vec![d],
            ..Default::default()
        };
        let env = world.env(&FlatTerrain);
        let mut ai = AdvancedAi::default();
        let mut r = rng();

        let first = advanced_force(&d, &mut ai, &env, &cfg, &mut r);
        assert!((first.length() - 0.5 * 1.5).abs() < 1e-9, "weighted impulse, got {first}");
        assert_eq!(ai.evasion_cooldown, 10);

        let second = advanced_force(&d, &mut ai, &env, &cfg, &mut r);
        assert_eq!(second, Vec2::ZERO, "no impulse while cooling down");
        assert_eq!(ai.evasion_cooldown, 9);
    }

    #[test]
    fn test_formation_bands() {
        let cfg = SwarmConfig::default();
        let d = drone(0, Faction::Friendly, 0.0, 0.0);

        let far = World {
            drones: vec![d, drone(1, Faction::Friendly, 10.0, 0.0)],
            ..Default::default()
        };
        let f = formation(&d, &far.env(&FlatTerrain), &cfg.advanced);
        assert!(approx(f, Vec2::new(0.3, 0.0)), "attract, got {f}");

        let near = World {
            drones: vec![d, drone(1, Faction::Friendly, 2.0, 0.0)],
            ..Default::default()
        };
        let f = formation(&d, &near.env(&FlatTerrain), &cfg.advanced);
        assert!(approx(f, Vec2::new(-0.1, 0.0)), "repel, got {f}");

        let mid = World {
            drones: vec![d, drone(1, Faction::Friendly, 4.0, 0.0)],
            ..Default::default()
        };
        assert_eq!(formation(&d, &mid.env(&FlatTerrain), &cfg.advanced), Vec2::ZERO);
    }

    // ---- Roles ----

    #[test]
    fn test_role_profiles_multiply_traits() {
        let base = base_traits(&SwarmConfig::default());
        let scout = role_profile(OperationalRole::Scout).apply(base);
        assert!((scout.max_speed - 2.4).abs() < 1e-12);
        assert!((scout.perception_range - 45.0).abs() < 1e-12);

        let attacker = role_profile(OperationalRole::Attacker).apply(base);
        assert!((attacker.attack_range - 4.8).abs() < 1e-12);
        assert!((attacker.attack_strength - 1.3).abs() < 1e-12);

        let direct = pattern_profile(AttackPattern::Direct).apply(base);
        assert!((direct.max_speed - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_attacker_avoids_turret_heading() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 0.0, 0.0);
        d.target = Some(0);
        let world = World {
            drones: vec![d],
            targets: vec![target(0, 0.0, 50.0)],
            turrets: vec![turret(0, 10.0, 0.0)],
            ..Default::default()
        };
        let f = attacker(&d, &world.env(&FlatTerrain), &cfg.roles);
        assert!(approx(f, Vec2::new(0.0, 2.0)), "got {f}");
    }

    #[test]
    fn test_defender_interposes() {
        let cfg = SwarmConfig::default();
        let d = drone(0, Faction::Friendly, 0.0, 0.0);
        let world = World {
            drones: vec![d, drone(1, Faction::Friendly, 40.0, 50.0)],
            turrets: vec![turret(0, 50.0, 50.0)],
            ..Default::default()
        };
        let f = defender(&d, &world.env(&FlatTerrain), &cfg.roles);
        // Guard post three units turret-side of the ally: (43, 50).
        assert!(same_direction(f, Vec2::new(43.0, 50.0)), "got {f}");
        assert!((f.length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_support_moves_at_full_speed() {
        let cfg = SwarmConfig::default();
        let d = drone(0, Faction::Friendly, 10.0, 10.0);
        let world = World {
            drones: vec![
                d,
                drone(1, Faction::Friendly, 20.0, 10.0),
                drone(2, Faction::Friendly, 10.0, 20.0),
            ],
            ..Default::default()
        };
        let f = support(&d, &world.env(&FlatTerrain), &cfg.roles);
        assert!((f.length() - 2.0).abs() < 1e-9, "got {f}");
    }

    #[test]
    fn test_scout_only_explores_without_target() {
        let cfg = SwarmConfig::default();
        let mut d = drone(0, Faction::Friendly, 5.0, 5.0);
        let world = World {
            drones: vec![d],
            targets: vec![target(0, 90.0, 90.0)],
            ..Default::default()
        };
        let env = world.env(&FlatTerrain);
        let f = role_force(&d, OperationalRole::Scout, &env, &cfg, &mut rng());
        assert!((f.length() - 1.6).abs() < 1e-9, "explores at 0.8 max speed, got {f}");

        d.target = Some(0);
        assert_eq!(role_force(&d, OperationalRole::Scout, &env, &cfg, &mut rng()), Vec2::ZERO);
    }
}
