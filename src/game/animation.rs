// Sprite animation playback

use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "s_idl", "s_run")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for a character
///
/// Requests for clips that were never registered are ignored, so the
/// state machine can drive animations without checking the clip table
/// at every call site.
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Playback speed multiplier (1.0 = normal)
    playback_speed: f32,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            playback_speed: 1.0,
            flip_horizontal: false,
        }
    }

    /// Create an animation player loaded with the samurai clip set
    pub fn with_samurai_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("s_idl", 4, 6.0));
        player.add_animation(AnimationClip::looping("s_run", 6, 10.0));
        player.add_animation(AnimationClip::one_shot("s_jump", 4, 12.0));
        player.add_animation(AnimationClip::looping("s_fall", 2, 8.0));
        player.add_animation(AnimationClip::one_shot("s_roll_l", 5, 12.0));
        player.add_animation(AnimationClip::one_shot("s_roll_r", 5, 12.0));
        player.add_animation(AnimationClip::one_shot("s_land", 3, 12.0));
        player.add_animation(AnimationClip::one_shot("s_dash", 4, 14.0));
        player.add_animation(AnimationClip::one_shot("s_sword", 4, 16.0));
        player.add_animation(AnimationClip::one_shot("s_sword_2", 5, 16.0));
        player.add_animation(AnimationClip::looping("s_sword_keep", 2, 4.0));
        player.add_animation(AnimationClip::looping("s_sword_keep_2", 2, 4.0));

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Whether a clip with this name is registered
    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name; unknown names are ignored
    pub fn play(&mut self, name: &str) {
        if !self.animations.contains_key(name) {
            log::debug!("Ignoring unknown animation '{}'", name);
            return;
        }
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.current_frame = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    /// Play an animation from the beginning, even if it's already current
    pub fn play_from_start(&mut self, name: &str) {
        if !self.animations.contains_key(name) {
            log::debug!("Ignoring unknown animation '{}'", name);
            return;
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set playback speed (1.0 = normal, 2.0 = double speed)
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed.max(0.0);
    }

    /// Get the current playback speed
    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Update the animation (called every tick)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt * self.playback_speed;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        if let Some(clip) = self.animations.get(&self.current_animation) {
            !clip.looping && self.current_frame >= clip.frame_count - 1 && !self.playing
        } else {
            true
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}

/// Clips for the short particle effects spawned around the character
pub fn effect_clips() -> Vec<AnimationClip> {
    vec![
        AnimationClip::one_shot("Star", 5, 12.0),
        AnimationClip::one_shot("jump_smoke", 4, 12.0),
        AnimationClip::one_shot("land_smoke", 4, 12.0),
        AnimationClip::one_shot("DashSmoke", 6, 14.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping("s_idl", 4, 8.0);
        assert_eq!(clip.name, "s_idl");
        assert_eq!(clip.frame_count, 4);
        assert_eq!(clip.frame_duration, 0.125); // 1/8
        assert!(clip.looping);
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::looping("s_run", 6, 10.0);
        assert_eq!(clip.total_duration(), 0.6); // 6 frames * 0.1s
    }

    #[test]
    fn test_animation_player_play() {
        let mut player = AnimationPlayer::with_samurai_animations();
        player.play("s_idl");
        assert_eq!(player.current_animation(), "s_idl");

        player.play("s_run");
        assert_eq!(player.current_animation(), "s_run");
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_play_unknown_clip_is_ignored() {
        let mut player = AnimationPlayer::with_samurai_animations();
        player.play("s_idl");

        player.play("s_swim");
        assert_eq!(player.current_animation(), "s_idl");

        player.play_from_start("s_swim");
        assert_eq!(player.current_animation(), "s_idl");
    }

    #[test]
    fn test_play_same_clip_keeps_frame() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("test", 4, 10.0));
        player.play("test");
        player.update(0.15);
        assert_eq!(player.current_frame(), 1);

        player.play("test");
        assert_eq!(player.current_frame(), 1);

        player.play_from_start("test");
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_animation_player_update() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("test", 4, 10.0)); // 0.1s per frame
        player.play("test");

        player.update(0.15); // 1.5 frames worth
        assert_eq!(player.current_frame(), 1);

        player.update(0.1);
        assert_eq!(player.current_frame(), 2);
    }

    #[test]
    fn test_animation_looping() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("test", 3, 10.0));
        player.play("test");

        // Advance through all frames
        player.update(0.35); // 3.5 frames
        assert_eq!(player.current_frame(), 0); // Should loop back
        assert!(player.is_playing());
    }

    #[test]
    fn test_animation_one_shot() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::one_shot("test", 3, 10.0));
        player.play("test");

        // Advance past all frames
        player.update(0.5);
        assert_eq!(player.current_frame(), 2); // Last frame
        assert!(!player.is_playing());
        assert!(player.is_finished());
    }

    #[test]
    fn test_flip_horizontal() {
        let mut player = AnimationPlayer::with_samurai_animations();
        assert!(!player.is_flipped_horizontal());

        player.set_flip_horizontal(true);
        assert!(player.is_flipped_horizontal());
    }

    #[test]
    fn test_playback_speed() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("test", 4, 10.0));
        player.play("test");
        player.set_playback_speed(2.0);

        player.update(0.1); // Should advance 2 frames at 2x speed
        assert_eq!(player.current_frame(), 2);
    }

    #[test]
    fn test_samurai_clip_set() {
        let player = AnimationPlayer::with_samurai_animations();
        for name in [
            "s_idl",
            "s_run",
            "s_jump",
            "s_fall",
            "s_roll_l",
            "s_roll_r",
            "s_land",
            "s_dash",
            "s_sword",
            "s_sword_2",
            "s_sword_keep",
            "s_sword_keep_2",
        ] {
            assert!(player.has_animation(name), "missing clip {}", name);
        }
    }

    #[test]
    fn test_effect_clips_are_one_shot() {
        for clip in effect_clips() {
            assert!(!clip.looping, "effect clip {} should not loop", clip.name);
            assert!(clip.total_duration() > 0.0);
        }
    }
}
