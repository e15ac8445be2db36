//! Enemy behaviour: chase the player, strike when in reach, then linger as a
//! corpse before despawning.

use glam::Vec3;

use crate::action::movement::flatten;
use crate::config::GameConfig;
use crate::cue::{AnimTrigger, Cue, CueBuffer, Effect, Sound};
use crate::state::{DamageOutcome, EnemyState, EntityId, GameState, PlayerState};

/// Runs one tick of every enemy, then removes corpses whose linger expired.
pub fn update_enemies(state: &mut GameState, config: &GameConfig, dt: f32, cues: &mut CueBuffer) {
    let GameState {
        player,
        enemies,
        arena,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        if let Some(despawn) = enemy.despawn.as_mut() {
            despawn.tick(dt);
            continue;
        }
        enemy.attack_timer.tick(dt);
        if player.dead {
            continue;
        }

        let offset = player.position - enemy.position;
        let offset = Vec3::new(offset.x, 0.0, offset.z);
        let distance = offset.length();
        let direction = flatten(offset);
        if direction != Vec3::ZERO {
            enemy.facing = direction;
        }

        let template = &enemy.template;
        let detection = template
            .detection_range
            .unwrap_or(config.enemy.chase_range);
        if distance <= template.attack_range {
            if enemy.attack_timer.is_ready() {
                enemy.attack_timer.start(template.attack_cooldown);
                strike(enemy, player, cues);
            }
        } else if distance <= detection {
            // Stop at the edge of attack range instead of walking into the player.
            let step = (template.move_speed * dt).min(distance - template.attack_range);
            enemy.position = arena.clamp(enemy.position + direction * step);
        }
    }

    enemies.retain(|enemy| {
        let expired = enemy.despawn.is_some_and(|despawn| despawn.is_ready());
        if expired {
            cues.push(Cue::EnemyDespawned { id: enemy.id });
        }
        !expired
    });
}

fn strike(enemy: &EnemyState, player: &mut PlayerState, cues: &mut CueBuffer) {
    cues.push(Cue::AnimTrigger {
        entity: enemy.id,
        trigger: AnimTrigger::Attack,
    });
    let killed = match player.take_damage(enemy.template.damage) {
        DamageOutcome::Damaged { dealt } => {
            player_hit(player, dealt, cues);
            false
        }
        DamageOutcome::Killed { dealt } => {
            player_hit(player, dealt, cues);
            true
        }
        DamageOutcome::Evaded | DamageOutcome::Ignored => return,
    };

    cues.push(Cue::AnimTrigger {
        entity: EntityId::PLAYER,
        trigger: if killed {
            AnimTrigger::Die
        } else {
            AnimTrigger::Hit
        },
    });
    if killed {
        cues.push(Cue::PlayerDied);
    }
}

fn player_hit(player: &PlayerState, dealt: i32, cues: &mut CueBuffer) {
    cues.push(Cue::sound(Sound::PlayerHit));
    cues.push(Cue::DamageNumber {
        target: EntityId::PLAYER,
        amount: dealt,
        position: player.position,
    });
    cues.push(Cue::Effect {
        effect: Effect::DamageFlash,
        position: player.position,
    });
}
