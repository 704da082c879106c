// Samurai character controller

use crate::core::transitions::TransitionSet;
use crate::engine::input::{Action, InputState};
use crate::game::animation::AnimationPlayer;
use crate::game::effects::{EffectAlign, EffectAnchor, EffectQueue, EffectRequest};
use crate::game::player::config::{ConfigError, PlayerConfig};
use crate::game::player::state::{BodyPart, PlayerState};
use crate::game::tilemap::TileQuery;
use glam::Vec2;

/// The player-controlled samurai
///
/// Each tick runs three phases over the state set: input mutates the
/// flags, physics integrates velocity from them, and the animation
/// phase reacts to the transitions recorded so far. History is cleared
/// at the end of the tick, so collision reactions routed afterwards
/// surface as transitions on the next tick.
pub struct Player {
    /// Pivot position in world units (sprite center)
    pub position: Vec2,
    /// Velocity in units per second
    pub velocity: Vec2,

    config: PlayerConfig,
    states: TransitionSet<PlayerState>,
    animation: AnimationPlayer,
    effects: EffectQueue,

    facing_right: bool,
    /// Distance climbed since the jump started
    current_jump_size: f32,
    /// Distance covered since the dash started
    current_dash_size: f32,
    /// Clock value of the last combo-opening swing
    last_first_attack: f32,
    /// Seconds since spawn
    clock: f32,
    /// Remaining time of the active swing, if any
    attack_timer: Option<f32>,
}

impl Player {
    /// Create a character at the spawn point
    ///
    /// The character starts idle and descending at terminal speed, so
    /// it settles onto whatever floor is below the spawn.
    pub fn new(config: PlayerConfig, spawn: Vec2, effects: EffectQueue) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut animation = AnimationPlayer::with_samurai_animations();
        animation.play("s_idl");

        log::info!("Spawning samurai at ({:.1}, {:.1})", spawn.x, spawn.y);

        Ok(Self {
            position: spawn,
            velocity: Vec2::new(0.0, -config.fall_speed),
            config,
            states: TransitionSet::new(),
            animation,
            effects,
            facing_right: true,
            current_jump_size: 0.0,
            current_dash_size: 0.0,
            last_first_attack: 0.0,
            clock: 0.0,
            attack_timer: None,
        })
    }

    /// Advance the character by one fixed tick
    pub fn update(&mut self, input: &InputState, map: &dyn TileQuery, dt: f32) {
        self.clock += dt;

        self.read_input(input);
        self.physics(input, map, dt);
        self.update_animations();
        self.animation.update(dt);

        self.states.clear_history();
        self.tick_attack_timer(input, dt);
    }

    fn read_input(&mut self, input: &InputState) {
        let in_air =
            self.states.has(PlayerState::Jumping) || self.states.has(PlayerState::Falling);

        // Right
        if input.just_pressed(Action::MoveRight) {
            if !self.states.has(PlayerState::Dashing) || in_air {
                self.states.add(PlayerState::MovingRight);
                self.states.remove(PlayerState::MovingLeft);
            } else if self.states.has(PlayerState::Dashing) && !self.facing_right {
                self.reset_movement(input);
            }
        }
        if input.just_released(Action::MoveRight) && !self.states.has(PlayerState::Dashing) {
            self.states.remove(PlayerState::MovingRight);
        }

        // Left
        if input.just_pressed(Action::MoveLeft) {
            if !self.states.has(PlayerState::Dashing) || in_air {
                self.states.add(PlayerState::MovingLeft);
                self.states.remove(PlayerState::MovingRight);
            } else if self.states.has(PlayerState::Dashing) && self.facing_right {
                self.reset_movement(input);
            }
        }
        if input.just_released(Action::MoveLeft) && !self.states.has(PlayerState::Dashing) {
            self.states.remove(PlayerState::MovingLeft);
        }

        // Down starts a fast fall, but only once already falling
        if input.just_pressed(Action::Down) && self.states.has(PlayerState::Falling) {
            self.states.add(PlayerState::FastFalling);
            self.trigger_fast_fall_star();
        }

        // Attack, buffering a follow-up swing if one is in progress
        if input.just_pressed(Action::Attack) {
            if !self.states.has(PlayerState::Attacking) {
                self.states.add(PlayerState::Attacking);
            } else {
                self.states.add(PlayerState::ContinueAttack);
            }
        }

        // Jump, or dash when the down modifier is held
        if input.just_pressed(Action::Jump) && self.states.has(PlayerState::OnGround) {
            if input.is_pressed(Action::Down) {
                // A dash can only restart once mostly finished
                let can_dash = self.current_dash_size <= 0.0
                    || self.current_dash_size >= self.config.dash_length * 0.8;
                if can_dash {
                    self.current_dash_size = 0.0;
                    self.states.remove(PlayerState::Dashing);
                    self.states.add(PlayerState::Dashing);
                    if self.facing_right {
                        self.states.add(PlayerState::MovingRight);
                    } else {
                        self.states.add(PlayerState::MovingLeft);
                    }
                }
            } else {
                self.states.add(PlayerState::Jumping);
            }
        } else if input.just_released(Action::Jump) && self.states.has(PlayerState::Jumping) {
            self.states.remove(PlayerState::Jumping);
            self.states.add(PlayerState::Falling);
        }
    }

    fn physics(&mut self, input: &InputState, map: &dyn TileQuery, dt: f32) {
        // Begin jump
        if self.states.was_added(PlayerState::Jumping) {
            self.velocity.y = self.config.jump_power;
            self.current_jump_size = 0.0;

            // Jumping out of a dash redirects it to the held direction
            if self.states.has(PlayerState::Dashing) {
                if input.is_pressed(Action::MoveLeft) {
                    self.states.remove(PlayerState::MovingRight);
                    self.states.add(PlayerState::MovingLeft);
                } else if input.is_pressed(Action::MoveRight) {
                    self.states.add(PlayerState::MovingRight);
                    self.states.remove(PlayerState::MovingLeft);
                }
            }
        }

        // Ascending, until the jump height is used up
        if self.states.has(PlayerState::Jumping) {
            self.current_jump_size += self.velocity.y * dt;
            if self.current_jump_size >= self.config.max_jump_height {
                self.states.remove(PlayerState::Jumping);
                self.states.add(PlayerState::Falling);
            }
        }

        // Horizontal movement, probing the map before committing
        self.velocity.x = 0.0;
        let mut correction = 0.0;
        if self.velocity.y > 0.0 {
            correction = -self.config.y_collision_correction;
        }

        let mut move_speed = self.config.speed;
        if self.states.has(PlayerState::Dashing) {
            if self.states.was_added(PlayerState::Dashing) {
                self.current_dash_size = 0.0;
            }

            move_speed = self.config.speed * self.config.dash_power;
            self.current_dash_size += move_speed * dt;
            if self.states.has(PlayerState::OnGround)
                && self.current_dash_size >= self.config.dash_length
            {
                self.reset_movement(input);
                move_speed = 0.0;
            }
        }

        if self.states.has(PlayerState::MovingRight) {
            let probe = self.position + Vec2::new(self.config.x_collision_correction, correction);
            if !map.is_solid_at(probe) {
                self.velocity.x = move_speed;
            }
        } else if self.states.has(PlayerState::MovingLeft) {
            let probe = self.position + Vec2::new(-self.config.x_collision_correction, correction);
            if !map.is_solid_at(probe) {
                self.velocity.x = -move_speed;
            }
        }

        // Falling
        if self.states.has(PlayerState::Falling) {
            if self.velocity.y > 0.0 {
                // Cutting the ascent, harder for a fast fall
                if self.states.was_added(PlayerState::FastFalling) {
                    self.velocity.y /= 10.0;
                } else if self.states.was_added(PlayerState::Falling) {
                    self.velocity.y /= 4.0;
                }
            }

            if self.states.has(PlayerState::FastFalling) {
                if self.velocity.y > -self.config.fall_speed * self.config.fast_fall_rate {
                    self.velocity.y -= self.config.gravity_pull * self.config.fast_fall_rate;
                }
            } else if self.velocity.y > -self.config.fall_speed {
                self.velocity.y -= self.config.gravity_pull;
            }
        }

        self.position += self.velocity * dt;
    }

    fn update_animations(&mut self) {
        if !self.states.been_modified() {
            return;
        }

        // Jump takeoff
        if self.states.was_added(PlayerState::Jumping) {
            self.animation.play_from_start("s_jump");
            self.trigger_jump_smoke();
            return;
        }

        // Tipping into the fall, rolling if there is sideways momentum
        if self.states.was_added(PlayerState::Falling) && !self.states.has(PlayerState::Attacking) {
            // Short hops roll faster than full jumps
            let speed = 2.0 - (self.current_jump_size * 100.0 / self.config.max_jump_height) / 100.0;
            self.animation.set_playback_speed(speed);

            if self.states.has(PlayerState::MovingRight) {
                if self.facing_right {
                    self.animation.play_from_start("s_roll_r");
                } else {
                    self.animation.play_from_start("s_roll_l");
                }
            } else if self.states.has(PlayerState::MovingLeft) {
                if self.facing_right {
                    self.animation.play_from_start("s_roll_l");
                } else {
                    self.animation.play_from_start("s_roll_r");
                }
            } else {
                self.animation.play_from_start("s_fall");
            }
        }

        // Landing reverts any roll speedup
        if self.states.was_added(PlayerState::OnGround) {
            self.animation.set_playback_speed(1.0);
        }

        // Sword swing, chaining into the second one when close enough
        if self.states.was_added(PlayerState::Attacking) {
            let since_first_attack = self.clock - self.last_first_attack;
            let mut clip = "s_sword";
            if self.animation.current_animation() == clip || since_first_attack < 1.0 {
                clip = "s_sword_2";
                self.last_first_attack = 0.0;
            } else {
                self.last_first_attack = self.clock;
            }
            self.animation.play_from_start(clip);
            self.attack_timer = Some(self.config.attack_duration);
        }

        if self.states.has(PlayerState::OnGround) {
            // Dash kickoff
            if self.states.was_added(PlayerState::Dashing) {
                self.animation.play_from_start("s_dash");
                self.trigger_dash_effects();
                return;
            }

            let started_to_move = self.states.was_added(PlayerState::MovingLeft)
                || self.states.was_added(PlayerState::MovingRight);
            let stopped_move = self.states.was_removed(PlayerState::MovingLeft)
                || self.states.was_removed(PlayerState::MovingRight);
            let is_moving = self.states.has(PlayerState::MovingRight)
                || self.states.has(PlayerState::MovingLeft);

            // Halting
            if stopped_move && !is_moving {
                self.animation.play("s_idl");
                return;
            }

            // Starting to move, or landing with momentum
            if (!self.states.has(PlayerState::Attacking) && started_to_move)
                || self.states.was_added(PlayerState::OnGround)
            {
                if self.states.has(PlayerState::MovingRight) {
                    self.face_right(true);
                    self.animation.play("s_run");
                } else if self.states.has(PlayerState::MovingLeft) {
                    self.face_right(false);
                    self.animation.play("s_run");
                }
            }
        }
    }

    /// React to a body part touching the map or, for the feet, the floor
    pub fn on_collide(&mut self, part: BodyPart, point: Vec2) {
        match part {
            BodyPart::Feet => {
                log::debug!("Landed on cell ({}, {})", point.x, point.y);

                self.states.remove(PlayerState::FastFalling);
                self.states.remove(PlayerState::Falling);
                self.states.remove(PlayerState::Jumping);
                self.states.add(PlayerState::OnGround);

                self.velocity.y = 0.0;
                if !self.states.has(PlayerState::MovingLeft)
                    && !self.states.has(PlayerState::MovingRight)
                {
                    self.animation.play_from_start("s_land");
                } else {
                    self.face_right(self.states.has(PlayerState::MovingRight));
                    self.animation.play("s_run");
                }
                self.position.y = point.y + self.config.land_y_adjust;

                self.trigger_land_smoke();
            }
            BodyPart::Head => {
                self.velocity.y = 0.0;
                self.states.add(PlayerState::Falling);
                self.states.remove(PlayerState::Jumping);
            }
            BodyPart::Body => {}
        }
    }

    /// React to a body part separating from the map
    pub fn on_collision_leave(&mut self, part: BodyPart) {
        if part == BodyPart::Feet {
            self.states.remove(PlayerState::OnGround);

            // Walked off a ledge
            if !self.states.has(PlayerState::Jumping) {
                self.states.add(PlayerState::Falling);
            }
        }
    }

    fn tick_attack_timer(&mut self, input: &InputState, dt: f32) {
        let Some(remaining) = &mut self.attack_timer else {
            return;
        };

        *remaining -= dt;
        if *remaining > 0.0 {
            return;
        }

        self.attack_timer = None;
        self.finish_attack(input);
    }

    /// End the active swing, chaining into a buffered one if present
    fn finish_attack(&mut self, input: &InputState) {
        self.states.remove(PlayerState::Attacking);

        if self.states.has(PlayerState::ContinueAttack) {
            log::debug!("Continuing attack combo");
            self.states.add(PlayerState::Attacking);
            self.states.remove(PlayerState::ContinueAttack);
        } else if !self.reset_movement(input) {
            // Settle into the matching held-sword pose
            let current = self.animation.current_animation();
            if current.contains("s_sword") {
                if current.contains('2') {
                    self.animation.play("s_sword_keep_2");
                } else {
                    self.animation.play("s_sword_keep");
                }
            }
        }
    }

    /// Drop dash and movement states, then re-add the held direction
    ///
    /// Returns whether a direction key was still held.
    fn reset_movement(&mut self, input: &InputState) -> bool {
        self.states.remove(PlayerState::Dashing);
        self.states.remove(PlayerState::MovingLeft);
        self.states.remove(PlayerState::MovingRight);
        self.current_dash_size = 0.0;

        if input.is_pressed(Action::MoveLeft) {
            self.states.add(PlayerState::MovingLeft);
            return true;
        }
        if input.is_pressed(Action::MoveRight) {
            self.states.add(PlayerState::MovingRight);
            return true;
        }

        false
    }

    fn face_right(&mut self, right: bool) {
        if self.facing_right != right {
            self.facing_right = right;
            self.animation.set_flip_horizontal(!right);
        }
    }

    fn effect_anchor(&self) -> EffectAnchor {
        EffectAnchor {
            position: self.position,
            sprite_height: self.config.height,
        }
    }

    fn trigger_fast_fall_star(&self) {
        self.effects.trigger(EffectRequest {
            clip: "Star".to_string(),
            align: EffectAlign::Bottom,
            offset: Vec2::new(0.0, 0.2),
            attach: true,
            flip: false,
            anchor: self.effect_anchor(),
        });
    }

    fn trigger_jump_smoke(&self) {
        self.effects.trigger(EffectRequest {
            clip: "jump_smoke".to_string(),
            align: EffectAlign::Bottom,
            offset: Vec2::new(0.0, 0.3),
            attach: false,
            flip: false,
            anchor: self.effect_anchor(),
        });
    }

    fn trigger_land_smoke(&self) {
        self.effects.trigger(EffectRequest {
            clip: "land_smoke".to_string(),
            align: EffectAlign::Bottom,
            offset: Vec2::new(0.0, 0.2),
            attach: false,
            flip: false,
            anchor: self.effect_anchor(),
        });
    }

    fn trigger_dash_effects(&self) {
        self.effects.trigger(EffectRequest {
            clip: "DashSmoke".to_string(),
            align: EffectAlign::Bottom,
            offset: Vec2::new(0.0, 0.4),
            attach: false,
            flip: !self.facing_right,
            anchor: self.effect_anchor(),
        });
        self.trigger_land_smoke();
    }

    /// Current state flags
    pub fn states(&self) -> &TransitionSet<PlayerState> {
        &self.states
    }

    /// Animation playback
    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    /// Tuning values
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Whether the sprite faces right
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Distance climbed since the current jump started
    pub fn jump_size(&self) -> f32 {
        self.current_jump_size
    }

    /// Distance covered since the current dash started
    pub fn dash_size(&self) -> f32 {
        self.current_dash_size
    }
}
