//! Per-drone memories: learned turret avoidance and decaying threat memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Vec2;

/// Per-turret avoidance multipliers learned from witnessed kills.
///
/// Turrets without an entry use the configured base factor. Stored factors
/// only ever grow, and never past the configured cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnedAvoidance {
    factors: BTreeMap<u32, f64>,
}

impl LearnedAvoidance {
    /// Current factor for a turret, or `base` if nothing was learned about it.
    pub fn factor(&self, turret_id: u32, base: f64) -> f64 {
        self.factors.get(&turret_id).copied().unwrap_or(base)
    }

    /// Raise the factor for `turret_id` by `increase`, capped at `max`.
    /// Returns the new factor.
    pub fn register_threat(&mut self, turret_id: u32, base: f64, increase: f64, max: f64) -> f64 {
        let current = self.factor(turret_id, base);
        let next = (current + increase).min(max).max(current);
        self.factors.insert(turret_id, next);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.factors.iter().map(|(id, f)| (*id, *f))
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// What a remembered threat was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThreatSource {
    Turret(u32),
    Enemy(u32),
}

/// A danger location and the ticks it will still be remembered for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RememberedThreat {
    pub source: ThreatSource,
    pub position: Vec2,
    pub ttl: u32,
}

/// Small keyed memory of recent threats with explicit time-to-live.
///
/// Each source appears at most once; sighting it again refreshes the entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatMemory {
    entries: Vec<RememberedThreat>,
}

impl ThreatMemory {
    /// Record or refresh a sighting.
    pub fn remember(&mut self, source: ThreatSource, position: Vec2, ttl: u32) {
        match self.entries.iter_mut().find(|e| e.source == source) {
            Some(entry) => {
                entry.position = position;
                entry.ttl = ttl;
            }
            None => self.entries.push(RememberedThreat {
                source,
                position,
                ttl,
            }),
        }
    }

    /// Age every entry by one tick and forget those that expire.
    pub fn tick(&mut self) {
        for entry in &mut self.entries {
            entry.ttl = entry.ttl.saturating_sub(1);
        }
        self.entries.retain(|e| e.ttl > 0);
    }

    pub fn entries(&self) -> &[RememberedThreat] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
