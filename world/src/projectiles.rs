//! Projectile flight and contact resolution.

use waypoint_defence_core::{Event, CONTACT_RADIUS_IN_CELLS, LANDING_EPSILON};
use waypoint_defence_system_collision::CollisionResolver;

use crate::{GameState, Outcome};

/// Moves projectiles toward their target points and expires the ones that landed.
pub(crate) fn advance(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    if state.projectiles.is_empty() {
        return Outcome::Unchanged;
    }

    state.projectiles.retain_mut(|projectile| {
        let offset = projectile.target - projectile.position;
        let distance = offset.length();
        if distance <= LANDING_EPSILON {
            out_events.push(Event::ProjectileExpired {
                projectile: projectile.id,
            });
            return false;
        }

        if distance <= projectile.speed {
            projectile.position = projectile.target;
        } else {
            projectile.position += offset / distance * projectile.speed;
        }
        true
    });

    Outcome::Changed
}

/// Applies projectile damage to enemies within the contact radius.
pub(crate) fn resolve_collisions(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    let mut contacts = Vec::new();
    CollisionResolver::new().handle(
        &state.projectiles,
        &state.enemies,
        state.geometry.cells_to_pixels(CONTACT_RADIUS_IN_CELLS),
        &mut contacts,
    );

    if contacts.is_empty() {
        return Outcome::Unchanged;
    }

    for contact in &contacts {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|enemy| enemy.id == contact.enemy)
        else {
            continue;
        };
        enemy.health = enemy.health.after_damage(contact.damage);
        out_events.push(Event::EnemyHit {
            projectile: contact.projectile,
            enemy: contact.enemy,
            damage: contact.damage,
            remaining: enemy.health,
        });
    }

    state.projectiles.retain(|projectile| {
        !contacts
            .iter()
            .any(|contact| contact.projectile == projectile.id)
    });

    Outcome::Changed
}
