//! Locomotion: input projection, the roll action, and per-tick motion.

use glam::{Vec2, Vec3};

use crate::config::GameConfig;
use crate::cue::{AnimTrigger, Cue, CueBuffer, Sound};
use crate::env::GameEnv;
use crate::state::{Arena, EntityId, GameState, PlayerState, Roll};

use super::{ActionError, ActionTransition};

/// Camera orientation used to turn stick input into a world direction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            right: Vec3::X,
        }
    }
}

impl CameraBasis {
    /// Projects stick input onto the ground plane relative to the camera.
    /// Input at or below `deadzone` resolves to no movement.
    pub fn project(&self, stick: Vec2, deadzone: f32) -> Vec3 {
        if stick.length() <= deadzone {
            return Vec3::ZERO;
        }
        let forward = flatten(self.forward);
        let right = flatten(self.right);
        (forward * stick.y + right * stick.x).clamp_length_max(1.0)
    }
}

/// Drops the vertical component and renormalizes.
pub(crate) fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Dodge roll along `direction`, fixed for the whole roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollAction {
    pub direction: Vec3,
}

impl RollAction {
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }
}

impl ActionTransition for RollAction {
    type Error = ActionError;
    type Output = Vec3;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let player = &state.player;
        if player.dead {
            return Err(ActionError::ActorDead);
        }
        if player.is_rolling() {
            return Err(ActionError::AlreadyRolling);
        }
        if !player.timers.roll_cooldown.is_ready() {
            return Err(ActionError::RollOnCooldown {
                remaining: player.timers.roll_cooldown.remaining(),
            });
        }
        let cost = env.config().roll.stamina_cost;
        if !player.stamina.can_afford(cost) {
            return Err(ActionError::InsufficientStamina {
                required: cost,
                available: player.stamina.current,
            });
        }
        if flatten(self.direction) == Vec3::ZERO {
            return Err(ActionError::NoMovementInput);
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
        let direction = flatten(self.direction);

        player.stamina.spend(config.roll.stamina_cost);
        player.roll = Some(Roll { direction });
        player.facing = direction;
        player.timers.roll.start(config.roll.duration);
        player
            .timers
            .stamina_regen_delay
            .start(config.vitals.stamina_regen_delay);

        cues.push(Cue::sound(Sound::PlayerRoll));
        cues.push(Cue::AnimTrigger {
            entity: EntityId::PLAYER,
            trigger: AnimTrigger::Roll,
        });
        Ok(direction)
    }
}

/// Moves the player for one tick. Rolls ignore input; swings slow walking.
pub fn advance_player(player: &mut PlayerState, arena: &Arena, config: &GameConfig, dt: f32) {
    if player.dead {
        return;
    }
    let velocity = match player.roll {
        Some(roll) => roll.direction * config.roll.speed,
        None => {
            let mut speed = config.movement.move_speed;
            if player.attacking {
                speed *= config.movement.attack_move_multiplier;
            }
            player.move_intent * speed
        }
    };
    player.position = arena.clamp(player.position + velocity * dt);
}

/// Turns the player toward the movement intent.
pub fn rotate_player(player: &mut PlayerState, config: &GameConfig, dt: f32) {
    if player.dead || player.is_rolling() {
        return;
    }
    let Some(target) = player.move_intent.try_normalize() else {
        return;
    };
    let t = (config.movement.rotation_speed * dt).min(1.0);
    player.facing = player.facing.lerp(target, t).try_normalize().unwrap_or(target);
}

/// Advances every action countdown and ends finished swings and rolls.
/// Returns true if the swing or roll state changed.
pub fn tick_timers(player: &mut PlayerState, config: &GameConfig, dt: f32) -> bool {
    let timers = &mut player.timers;
    let mut changed = false;

    timers.attack_swing.tick(dt);
    if player.attacking && timers.attack_swing.is_ready() {
        player.attacking = false;
        changed = true;
    }
    timers.roll.tick(dt);
    if player.roll.is_some() && timers.roll.is_ready() {
        player.roll = None;
        timers.roll_cooldown.start(config.roll.cooldown);
        changed = true;
    } else {
        timers.roll_cooldown.tick(dt);
    }
    timers.attack_cooldown.tick(dt);
    timers.stamina_regen_delay.tick(dt);
    changed
}

/// Regenerates stamina once the delay has passed and no action is active.
pub fn regenerate_stamina(player: &mut PlayerState, config: &GameConfig, dt: f32) {
    if player.dead
        || player.attacking
        || player.is_rolling()
        || !player.timers.stamina_regen_delay.is_ready()
    {
        return;
    }
    player
        .stamina
        .restore(config.vitals.stamina_regen_rate * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueLibrary;
    use crate::env::{ItemCatalog, ScanQuery};

    #[test]
    fn stick_input_below_deadzone_is_ignored() {
        let camera = CameraBasis::default();
        assert_eq!(camera.project(Vec2::new(0.05, 0.05), 0.1), Vec3::ZERO);
        assert_eq!(camera.project(Vec2::new(0.0, 1.0), 0.1), Vec3::Z);
    }

    #[test]
    fn projection_is_camera_relative_and_flat() {
        // Camera looking down at 45 degrees toward -X.
        let camera = CameraBasis {
            forward: Vec3::new(-1.0, -1.0, 0.0),
            right: Vec3::new(0.0, 0.0, -1.0),
        };
        let intent = camera.project(Vec2::new(0.0, 1.0), 0.1);
        assert!((intent - Vec3::NEG_X).length() < 1e-6);
        assert_eq!(intent.y, 0.0);
    }

    #[test]
    fn roll_direction_is_fixed_for_its_duration() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let dialogue = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);

        let roll = RollAction::new(Vec3::X);
        roll.pre_validate(&state, &env).unwrap();
        roll.apply(&mut state, &env, &mut CueBuffer::new()).unwrap();
        assert_eq!(state.player.stamina.current, 85.0);

        // Input swings the other way; the roll keeps going along +X.
        state.player.move_intent = Vec3::NEG_Z;
        let dt = 0.1;
        for _ in 0..3 {
            advance_player(&mut state.player, &state.arena, &config, dt);
            rotate_player(&mut state.player, &config, dt);
            tick_timers(&mut state.player, &config, dt);
        }
        assert_eq!(state.player.roll.map(|r| r.direction), Some(Vec3::X));
        // 3 ticks * 0.1s * 12 units/s
        assert!((state.player.position.x - 3.6).abs() < 1e-4);
        assert_eq!(state.player.position.z, 0.0);
    }

    #[test]
    fn roll_leaves_a_swing_running() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let dialogue = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.player.attacking = true;
        state.player.timers.attack_swing.start(config.attack.duration);
        let mut cues = CueBuffer::new();

        RollAction::new(Vec3::X)
            .apply(&mut state, &env, &mut cues)
            .unwrap();

        assert!(state.player.attacking);
        assert!(!state.player.timers.attack_swing.is_ready());
        assert!(cues.contains(&Cue::Sound {
            sound: Sound::PlayerRoll,
            volume: 0.4
        }));
    }

    #[test]
    fn roll_preconditions() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let dialogue = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &dialogue);
        let mut state = GameState::new(&config, Vec3::ZERO);

        assert_eq!(
            RollAction::new(Vec3::ZERO).pre_validate(&state, &env),
            Err(ActionError::NoMovementInput)
        );
        state.player.stamina.current = 14.0;
        assert!(matches!(
            RollAction::new(Vec3::X).pre_validate(&state, &env),
            Err(ActionError::InsufficientStamina { .. })
        ));
        state.player.stamina.current = 50.0;
        state.player.timers.roll_cooldown.start(0.2);
        assert!(matches!(
            RollAction::new(Vec3::X).pre_validate(&state, &env),
            Err(ActionError::RollOnCooldown { .. })
        ));
    }

    #[test]
    fn roll_ends_then_cooldown_runs() {
        let config = GameConfig::default();
        let mut player = PlayerState::new(&config, Vec3::ZERO);
        player.roll = Some(Roll { direction: Vec3::X });
        player.timers.roll.start(config.roll.duration);

        assert!(!tick_timers(&mut player, &config, 0.25));
        assert!(tick_timers(&mut player, &config, 0.25));
        assert!(!player.is_rolling());
        assert_eq!(player.timers.roll_cooldown.remaining(), config.roll.cooldown);
    }

    #[test]
    fn stamina_regen_waits_for_delay() {
        let config = GameConfig::default();
        let mut player = PlayerState::new(&config, Vec3::ZERO);
        player.stamina.current = 50.0;
        player.timers.stamina_regen_delay.start(1.0);

        tick_timers(&mut player, &config, 0.5);
        regenerate_stamina(&mut player, &config, 0.5);
        assert_eq!(player.stamina.current, 50.0);

        tick_timers(&mut player, &config, 0.5);
        regenerate_stamina(&mut player, &config, 0.5);
        // 15/s * 0.5s
        assert_eq!(player.stamina.current, 57.5);
    }

    #[test]
    fn swinging_slows_walking() {
        let config = GameConfig::default();
        let arena = Arena { half_extent: 100.0 };
        let mut player = PlayerState::new(&config, Vec3::ZERO);
        player.move_intent = Vec3::Z;
        player.attacking = true;
        advance_player(&mut player, &arena, &config, 1.0);
        // 5 * 0.3
        assert!((player.position.z - 1.5).abs() < 1e-6);
    }
}
