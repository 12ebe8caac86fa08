#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from entity snapshots.
//!
//! A tower targets the closest enemy within its range, measured from the
//! pixel center of its cell. Equal distances resolve to the enemy with the
//! smallest identifier, which is the one that spawned first.

use std::time::Duration;

use glam::Vec2;
use waypoint_defence_core::{Enemy, EnemyId, Tower, TowerTarget};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    candidates: Vec<Candidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every tower whose cooldown elapsed at `now`.
    ///
    /// The output buffer is cleared before populating it. Assignments follow
    /// the order of `towers`; towers without an enemy in range are skipped.
    pub fn handle(
        &mut self,
        now: Duration,
        towers: &[Tower],
        enemies: &[Enemy],
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_candidates(enemies);
        if self.candidates.is_empty() {
            return;
        }

        for tower in towers {
            if !tower.is_ready(now) {
                continue;
            }

            if let Some(best) = select_closest(tower.position, tower.range, &self.candidates) {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: best.id,
                    aim: best.position,
                });
            }
        }
    }

    fn prepare_candidates(&mut self, enemies: &[Enemy]) {
        self.candidates.clear();
        self.candidates.reserve(enemies.len());

        for enemy in enemies {
            if enemy.health.is_depleted() {
                continue;
            }

            self.candidates.push(Candidate {
                id: enemy.id,
                position: enemy.position,
            });
        }
    }
}

fn select_closest(origin: Vec2, range: f32, candidates: &[Candidate]) -> Option<Candidate> {
    if range.is_nan() || range < 0.0 {
        return None;
    }

    let max_distance_sq = range * range;
    let mut best: Option<Ranked> = None;

    for candidate in candidates {
        let distance_sq = candidate.position.distance_squared(origin);
        if distance_sq > max_distance_sq {
            continue;
        }

        let current = Ranked {
            distance_sq,
            candidate: *candidate,
        };

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|ranked| ranked.candidate)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    id: EnemyId,
    position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Ranked {
    distance_sq: f32,
    candidate: Candidate,
}

impl Ranked {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.candidate.id < other.candidate.id
    }
}
