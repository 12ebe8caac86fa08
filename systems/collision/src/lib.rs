#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects projectile contacts with enemies.
//!
//! Projectiles are dumb-fire: they collide with whichever enemy comes within
//! the contact radius first, not only with the enemy they were aimed at.
//! Pairs are evaluated projectile-major in ascending projectile identifier
//! order, then enemy-minor in ascending enemy identifier order. A projectile
//! scores at most one hit, and an enemy whose health is used up by earlier
//! contacts of the same pass no longer absorbs projectiles.

use waypoint_defence_core::{Enemy, EnemyId, Health, Projectile, ProjectileContact};

/// Collision resolver that reuses scratch buffers between ticks.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    projectile_order: Vec<usize>,
    enemy_workspace: Vec<EnemyWorkspace>,
}

impl CollisionResolver {
    /// Creates a resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every contact for the provided entities.
    ///
    /// The output buffer is cleared before it is populated. Contacts are
    /// listed in resolution order.
    pub fn handle(
        &mut self,
        projectiles: &[Projectile],
        enemies: &[Enemy],
        contact_radius: f32,
        out: &mut Vec<ProjectileContact>,
    ) {
        out.clear();

        if projectiles.is_empty() || enemies.is_empty() || contact_radius <= 0.0 {
            return;
        }

        self.prepare_workspace(projectiles, enemies);
        let radius_sq = contact_radius * contact_radius;

        for &index in &self.projectile_order {
            let Some(projectile) = projectiles.get(index) else {
                continue;
            };

            let struck = self.enemy_workspace.iter_mut().find(|enemy| {
                !enemy.remaining.is_depleted()
                    && enemy.position.distance_squared(projectile.position) < radius_sq
            });

            if let Some(enemy) = struck {
                enemy.remaining = enemy.remaining.after_damage(projectile.damage);
                out.push(ProjectileContact {
                    projectile: projectile.id,
                    enemy: enemy.id,
                    damage: projectile.damage,
                });
            }
        }
    }

    fn prepare_workspace(&mut self, projectiles: &[Projectile], enemies: &[Enemy]) {
        self.projectile_order.clear();
        self.projectile_order.extend(0..projectiles.len());
        self.projectile_order
            .sort_by_key(|index| projectiles.get(*index).map(|projectile| projectile.id));

        self.enemy_workspace.clear();
        self.enemy_workspace
            .extend(enemies.iter().map(|enemy| EnemyWorkspace {
                id: enemy.id,
                position: enemy.position,
                remaining: enemy.health,
            }));
        self.enemy_workspace.sort_by_key(|enemy| enemy.id);
    }
}

#[derive(Clone, Copy, Debug)]
struct EnemyWorkspace {
    id: EnemyId,
    position: glam::Vec2,
    remaining: Health,
}
