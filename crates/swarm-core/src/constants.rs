//! Default simulation parameters.
//!
//! Every value here seeds a field of `SwarmConfig`; none is read directly
//! by the simulation once a config exists.

// --- World ---

/// Side length of the square field.
pub const FIELD_SIZE: f64 = 100.0;

/// Step budget after which a run is complete.
pub const MAX_SIMULATION_STEPS: u64 = 2000;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Spawn counts ---

pub const NUM_DRONES: usize = 10;
pub const NUM_TARGETS: usize = 3;
pub const NUM_TURRETS: usize = 3;
pub const NUM_OBSTACLES: usize = 5;

/// Obstacle diameter range. Radius is half the sampled size.
pub const OBSTACLE_MIN_SIZE: f64 = 4.0;
pub const OBSTACLE_MAX_SIZE: f64 = 8.0;

/// Enemies spawn within this distance of a field edge.
pub const ENEMY_EDGE_BAND: f64 = 5.0;

/// First id handed to enemy drones.
pub const ENEMY_ID_BASE: u32 = 1000;

// --- Drone ---

pub const DRONE_MAX_SPEED: f64 = 2.0;
pub const DRONE_MAX_FUEL: f64 = 600.0;
pub const DRONE_FUEL_CONSUMPTION_RATE: f64 = 1.0;

/// Neighbor radius for flocking. Half of it is the threat-notification radius.
pub const DRONE_SENSOR_RANGE: f64 = 30.0;

/// A drone closer than this to its target destroys it.
pub const DRONE_ATTACK_RANGE: f64 = 4.0;

/// Fuel ratio below which a drone reports `LowFuel`.
pub const LOW_FUEL_THRESHOLD: f64 = 0.2;

/// Positions kept in each drone's trajectory ring.
pub const TRAJECTORY_LENGTH: usize = 20;

/// Velocity scale applied to the component that hits a field wall.
pub const WALL_RESTITUTION: f64 = 0.5;

// --- Steering weights ---

pub const WEIGHT_COHESION: f64 = 0.02;
pub const WEIGHT_SEPARATION: f64 = 0.2;
pub const WEIGHT_ALIGNMENT: f64 = 0.05;
pub const WEIGHT_TARGET_SEEKING: f64 = 1.0;
pub const WEIGHT_OBSTACLE_AVOIDANCE: f64 = 2.5;
pub const WEIGHT_TURRET_AVOIDANCE: f64 = 1.8;

/// Extra clearance beyond an obstacle's radius inside which it repels.
pub const OBSTACLE_AVOIDANCE_DISTANCE: f64 = 12.0;

/// Turret-avoidance strength above which a drone reports `Avoiding`.
pub const AVOIDING_STATUS_THRESHOLD: f64 = 0.5;

// --- Terrain ---

/// Slope (degrees) above which steering is damped.
pub const STEEP_SLOPE_DEGREES: f64 = 30.0;

/// Slope span (degrees) over which damping ramps to its floor.
pub const SLOPE_DAMPING_SPAN: f64 = 60.0;

/// Lowest steering scale on steep ground.
pub const MIN_SLOPE_DAMPING: f64 = 0.5;

/// Synthetic heightmap nodes per side.
pub const TERRAIN_RESOLUTION: usize = 100;

/// Meters of ground per field unit.
pub const TERRAIN_METERS_PER_UNIT: f64 = 100.0;

pub const TERRAIN_MAX_ELEVATION: f64 = 1000.0;

// --- Threat learning ---

pub const DRONE_INITIAL_AVOID_FACTOR: f64 = 1.0;
pub const DRONE_LEARNED_AVOID_INCREASE: f64 = 0.5;
pub const DRONE_MAX_AVOID_FACTOR: f64 = 5.0;

// --- Turrets ---

pub const TURRET_RANGE: f64 = 20.0;

/// Ticks between shots.
pub const TURRET_COOLDOWN: u32 = 8;

// --- Target assignment ---

/// Most drones that may hold the same target.
pub const TARGET_ASSIGNMENT_LIMIT: u32 = 3;

/// Score penalty per drone already assigned to a target.
pub const ASSIGNMENT_CONGESTION_PENALTY: f64 = 10.0;

// --- Enemy drones ---

pub const NUM_ENEMIES: usize = 0;

/// Cap on the seek component of an enemy's steering force.
pub const ENEMY_MAX_FORCE: f64 = 0.5;

/// Enemy melee contact radius.
pub const ENEMY_MELEE_RADIUS: f64 = 2.0;

/// Per-tick kill chance for melee contact.
pub const ENEMY_MELEE_KILL_PROBABILITY: f64 = 0.3;

/// Clearance beyond an obstacle's radius inside which enemies steer away.
pub const ENEMY_OBSTACLE_MARGIN: f64 = 5.0;
pub const ENEMY_OBSTACLE_WEIGHT: f64 = 2.0;

/// Enemies evade turrets inside this multiple of turret range.
pub const ENEMY_TURRET_RANGE_FACTOR: f64 = 1.2;
pub const ENEMY_TURRET_STANDOFF: f64 = 5.0;
pub const ENEMY_TURRET_WEIGHT: f64 = 1.5;

/// Enemy fuel at spawn.
pub const ENEMY_MAX_FUEL: f64 = 600.0;

/// Fuel an enemy burns per tick.
pub const ENEMY_FUEL_CONSUMPTION_RATE: f64 = 1.0;

/// Distance beside the prey a flanker aims for.
pub const FLANK_DISTANCE: f64 = 7.0;

/// Prey speed below which flanking degrades to a direct charge.
pub const FLANK_MIN_PREY_SPEED: f64 = 0.1;

/// Candidate hide points sampled per ambush evaluation.
pub const AMBUSH_SAMPLES: usize = 10;

/// Obstacles this close to the prey are considered for cover.
pub const AMBUSH_COVER_SEARCH: f64 = 15.0;

/// Hide point offset as a multiple of obstacle radius.
pub const AMBUSH_COVER_OFFSET: f64 = 1.2;

/// Score bonus for a hide point with no line of sight to the prey.
pub const AMBUSH_HIDDEN_BONUS: f64 = 20.0;

/// An ambusher this close to its hide point springs the trap.
pub const AMBUSH_TRIGGER_RADIUS: f64 = 2.0;

/// Radius of the ring swarm enemies form around their prey.
pub const SWARM_RING_RADIUS: f64 = 5.0;

/// Slope (degrees) above which pattern enemies slow down.
pub const ENEMY_STEEP_SLOPE_DEGREES: f64 = 25.0;
pub const ENEMY_STEEP_SPEED_FACTOR: f64 = 0.7;

// --- Rockets ---

pub const ROCKET_FUEL: u32 = 50;
pub const ROCKET_SPEED: f64 = 2.0;
pub const ROCKET_BLAST_RADIUS: f64 = 3.0;

/// Ticks of target motion the rocket leads by.
pub const ROCKET_LOOKAHEAD: f64 = 2.0;

/// Ticks between turret launch opportunities.
pub const ROCKET_LAUNCH_INTERVAL: u64 = 15;

// --- Advanced friendly AI ---

pub const EVASION_CHANCE: f64 = 0.05;
pub const EVASION_IMPULSE: f64 = 0.5;
pub const EVASION_COOLDOWN: u32 = 10;

/// Turrets repel inside this fraction of their range.
pub const EVASION_TURRET_RANGE_FRACTION: f64 = 0.9;
pub const EVASION_TURRET_GAIN: f64 = 2.0;
pub const TURRET_MEMORY_TTL: u32 = 20;

pub const ENEMY_DANGER_RADIUS: f64 = 10.0;
pub const EVASION_ENEMY_GAIN: f64 = 3.0;
pub const ENEMY_MEMORY_TTL: u32 = 15;

pub const FORMATION_RADIUS: f64 = 15.0;
pub const FORMATION_FAR_BAND: f64 = 5.0;
pub const FORMATION_NEAR_BAND: f64 = 3.0;
pub const FORMATION_ATTRACT: f64 = 0.03;
pub const FORMATION_REPEL: f64 = 0.05;
pub const FORMATION_ALIGN: f64 = 0.1;

/// Remembered threats repel within this radius.
pub const MEMORY_RADIUS: f64 = 20.0;

/// TTL that maps to full memory strength.
pub const MEMORY_TTL_SCALE: f64 = 20.0;

pub const ADVANCED_EVASION_WEIGHT: f64 = 1.5;
pub const ADVANCED_FORMATION_WEIGHT: f64 = 0.8;
pub const ADVANCED_MEMORY_WEIGHT: f64 = 1.2;

// --- Roles ---

/// Cells per side of the scout occupancy grid.
pub const SCOUT_GRID_SIZE: usize = 10;

/// Fraction of max speed used when exploring.
pub const SCOUT_SPEED_FRACTION: f64 = 0.8;

/// Distance ahead of the attacker at which cover is probed.
pub const ATTACKER_PROBE_DISTANCE: f64 = 5.0;

/// Number of candidate approach headings.
pub const ATTACKER_HEADINGS: usize = 8;

/// Distance a defender holds in front of the threatened ally.
pub const DEFENDER_OFFSET: f64 = 3.0;

/// Number of formation sectors a support drone considers.
pub const SUPPORT_SECTORS: usize = 8;

/// Cosine above which a drone counts toward a sector.
pub const SUPPORT_SECTOR_ALIGNMENT: f64 = 0.7;

pub const ROLE_FORCE_WEIGHT: f64 = 1.0;

// --- Environment ---

pub const VISIBILITY_DUSK: f64 = 0.7;
pub const VISIBILITY_NIGHT: f64 = 0.4;
pub const VISIBILITY_CLOUDY: f64 = 0.8;
pub const VISIBILITY_RAIN: f64 = 0.6;
pub const VISIBILITY_FOG: f64 = 0.3;
