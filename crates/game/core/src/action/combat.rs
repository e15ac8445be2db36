//! Melee attack: one instantaneous sphere hit-test per swing.

use std::collections::BTreeSet;

use glam::Vec3;

use crate::cue::{AnimTrigger, Cue, CueBuffer, Effect, Sound};
use crate::env::{GameEnv, Sphere};
use crate::state::{DamageOutcome, EntityId, GameState, PlayerState};

use super::{ActionError, ActionTransition};

/// Swing the current weapon (or fists) in front of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitRecord {
    pub target: EntityId,
    pub dealt: i32,
    pub killed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hits: Vec<HitRecord>,
}

impl AttackOutcome {
    pub fn is_whiff(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Sphere centred `range * reach_factor` ahead of the player, radius `range`.
pub fn attack_sphere(player: &PlayerState, reach_factor: f32) -> Sphere {
    let range = player.weapon.range;
    Sphere::new(player.position + player.facing * range * reach_factor, range)
}

impl ActionTransition for AttackAction {
    type Error = ActionError;
    type Output = AttackOutcome;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let player = &state.player;
        if player.dead {
            return Err(ActionError::ActorDead);
        }
        if player.is_rolling() {
            return Err(ActionError::Rolling);
        }
        if player.attacking {
            return Err(ActionError::AlreadyAttacking);
        }
        if !player.timers.attack_cooldown.is_ready() {
            return Err(ActionError::AttackOnCooldown {
                remaining: player.timers.attack_cooldown.remaining(),
            });
        }
        let cost = env.config().attack.stamina_cost;
        if !player.stamina.can_afford(cost) {
            return Err(ActionError::InsufficientStamina {
                required: cost,
                available: player.stamina.current,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        cues: &mut CueBuffer,
    ) -> Result<Self::Output, Self::Error> {
        let config = env.config();
        let player = &mut state.player;

        player.stamina.spend(config.attack.stamina_cost);
        player.attacking = true;
        player.timers.attack_swing.start(config.attack.duration);
        player.timers.attack_cooldown.start(player.weapon.cooldown);
        player
            .timers
            .stamina_regen_delay
            .start(config.vitals.stamina_regen_delay);

        let sphere = attack_sphere(player, config.attack.reach_factor);
        let origin = player.position;
        let damage = player.weapon.damage;

        cues.push(Cue::AnimTrigger {
            entity: EntityId::PLAYER,
            trigger: AnimTrigger::Attack,
        });
        cues.push(Cue::sound(Sound::AttackSwing));
        cues.push(Cue::Effect {
            effect: Effect::AttackArc,
            position: sphere.center,
        });

        // Each enemy takes damage at most once per swing.
        let targets: BTreeSet<EntityId> = env
            .spatial()
            .overlap_sphere(state, sphere)
            .into_iter()
            .filter(|id| state.enemy(*id).is_some_and(|enemy| enemy.is_alive()))
            .collect();

        let mut outcome = AttackOutcome::default();
        for target in targets {
            let Some(enemy) = state.enemy_mut(target) else {
                continue;
            };
            let (dealt, killed) = match enemy.take_damage(damage, config.enemy.corpse_linger) {
                DamageOutcome::Damaged { dealt } => (dealt, false),
                DamageOutcome::Killed { dealt } => (dealt, true),
                DamageOutcome::Ignored | DamageOutcome::Evaded => continue,
            };

            let position = enemy.position;
            let push = Vec3::new(position.x - origin.x, 0.0, position.z - origin.z)
                .try_normalize()
                .unwrap_or(Vec3::ZERO);
            cues.push(Cue::DamageNumber {
                target,
                amount: dealt,
                position,
            });
            cues.push(Cue::Effect {
                effect: Effect::HitSpark,
                position,
            });
            cues.push(Cue::Knockback {
                target,
                impulse: push * config.attack.knockback,
            });
            if killed {
                cues.push(Cue::AnimTrigger {
                    entity: target,
                    trigger: AnimTrigger::Die,
                });
                cues.push(Cue::EnemyDied { id: target });
            } else {
                cues.push(Cue::AnimTrigger {
                    entity: target,
                    trigger: AnimTrigger::Hit,
                });
            }
            outcome.hits.push(HitRecord {
                target,
                dealt,
                killed,
            });
        }

        cues.push(Cue::sound(if outcome.is_whiff() {
            Sound::AttackWhiff
        } else {
            Sound::AttackHit
        }));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::dialogue::DialogueLibrary;
    use crate::env::{EnemyTemplate, ItemCatalog, ScanQuery};

    fn fixture() -> (GameConfig, ItemCatalog, DialogueLibrary) {
        (GameConfig::default(), ItemCatalog::starter(), DialogueLibrary::new())
    }

    fn run(
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<(AttackOutcome, CueBuffer), ActionError> {
        let mut cues = CueBuffer::new();
        AttackAction.pre_validate(state, env)?;
        let outcome = AttackAction.apply(state, env, &mut cues)?;
        Ok((outcome, cues))
    }

    #[test]
    fn attack_spends_stamina_and_starts_cooldown() {
        let (config, items, dialogue) = fixture();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.player.stamina.current = 10.0;

        let (outcome, cues) = run(&mut state, &env).unwrap();
        assert!(outcome.is_whiff());
        assert!(cues.contains(&Cue::sound(Sound::AttackWhiff)));
        // 10 - 8
        assert_eq!(state.player.stamina.current, 2.0);
        assert_eq!(state.player.timers.attack_cooldown.remaining(), 0.3);

        // Swing is still active, then only the cooldown remains.
        assert_eq!(run(&mut state, &env), Err(ActionError::AlreadyAttacking));
        state.player.attacking = false;
        assert!(matches!(
            run(&mut state, &env),
            Err(ActionError::AttackOnCooldown { .. })
        ));
    }

    #[test]
    fn attack_requires_enough_stamina() {
        let (config, items, dialogue) = fixture();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.player.stamina.current = 7.5;
        assert_eq!(
            run(&mut state, &env),
            Err(ActionError::InsufficientStamina {
                required: 8.0,
                available: 7.5
            })
        );
        assert_eq!(state.player.stamina.current, 7.5);
    }

    #[test]
    fn attack_is_blocked_while_rolling() {
        let (config, items, dialogue) = fixture();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.player.roll = Some(crate::state::Roll { direction: Vec3::X });
        assert_eq!(run(&mut state, &env), Err(ActionError::Rolling));
    }

    #[test]
    fn hits_each_enemy_in_front_once() {
        let (config, items, dialogue) = fixture();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        // Facing +Z; sphere centre (0, 0, 0.75), radius 1.5.
        let front = state.spawn_enemy(EnemyTemplate::critter(), Vec3::new(0.0, 0.0, 1.5));
        let behind = state.spawn_enemy(EnemyTemplate::critter(), Vec3::new(0.0, 0.0, -2.0));

        let (outcome, cues) = run(&mut state, &env).unwrap();
        assert_eq!(
            outcome.hits,
            vec![HitRecord {
                target: front,
                dealt: 10,
                killed: false
            }]
        );
        assert_eq!(state.enemy(front).unwrap().health.current, 20);
        assert_eq!(state.enemy(behind).unwrap().health.current, 30);
        assert!(cues.contains(&Cue::sound(Sound::AttackHit)));
        assert!(cues.contains(&Cue::Knockback {
            target: front,
            impulse: Vec3::new(0.0, 0.0, 5.0)
        }));
    }

    #[test]
    fn lethal_hit_reports_enemy_death() {
        let (config, items, dialogue) = fixture();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        let target = state.spawn_enemy(EnemyTemplate::critter(), Vec3::new(0.0, 0.0, 1.0));
        state.enemy_mut(target).unwrap().health.current = 4;

        let (outcome, cues) = run(&mut state, &env).unwrap();
        assert!(outcome.hits[0].killed);
        assert_eq!(outcome.hits[0].dealt, 4);
        assert!(cues.contains(&Cue::EnemyDied { id: target }));
        assert!(!state.enemy(target).unwrap().is_alive());
    }
}
