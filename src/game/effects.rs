// One-shot particle effects spawned around the character

use crate::game::animation::{effect_clips, AnimationClip};
use glam::Vec2;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How an effect is placed relative to its anchor sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectAlign {
    /// Centered on the anchor position
    Center,
    /// Aligned to the bottom edge of the anchor sprite
    Bottom,
}

/// Snapshot of the sprite an effect is placed against
#[derive(Debug, Clone, Copy)]
pub struct EffectAnchor {
    pub position: Vec2,
    pub sprite_height: f32,
}

/// Request to spawn a single effect
#[derive(Debug, Clone)]
pub struct EffectRequest {
    /// Clip name, e.g. "jump_smoke"
    pub clip: String,
    pub align: EffectAlign,
    /// Offset applied after alignment
    pub offset: Vec2,
    /// Whether the effect follows the anchor while alive
    pub attach: bool,
    /// Whether the effect sprite is mirrored horizontally
    pub flip: bool,
    /// Anchor captured when the effect was triggered
    pub anchor: EffectAnchor,
}

/// Shared queue of pending effect requests
///
/// Cloned into whoever needs to spawn effects, drained by the effect
/// system once per tick.
#[derive(Clone)]
pub struct EffectQueue {
    requests: Arc<Mutex<Vec<EffectRequest>>>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an effect for the next update
    pub fn trigger(&self, request: EffectRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }

    /// Take all pending requests
    pub fn drain(&self) -> Vec<EffectRequest> {
        self.requests
            .lock()
            .map(|mut requests| std::mem::take(&mut *requests))
            .unwrap_or_default()
    }

    /// Whether any requests are pending
    pub fn is_empty(&self) -> bool {
        self.requests.lock().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl Default for EffectQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A spawned effect that is currently playing
#[derive(Debug)]
pub struct ActiveEffect {
    pub clip: String,
    pub position: Vec2,
    pub flip: bool,
    attached: bool,
    /// Offset from the anchor, kept so attached effects can follow it
    anchor_offset: Vec2,
    age: f32,
    lifetime: f32,
}

/// Spawns queued effects and retires them when their clip runs out
pub struct EffectSystem {
    queue: EffectQueue,
    clips: HashMap<String, AnimationClip>,
    active: Vec<ActiveEffect>,
}

impl EffectSystem {
    /// Create an effect system draining the given queue
    pub fn new(queue: EffectQueue) -> Self {
        let clips = effect_clips()
            .into_iter()
            .map(|clip| (clip.name.clone(), clip))
            .collect();

        Self {
            queue,
            clips,
            active: Vec::new(),
        }
    }

    /// Age active effects, then spawn any queued requests
    ///
    /// `anchor` is the current anchor position, used to keep attached
    /// effects following their target.
    pub fn update(&mut self, anchor: Vec2, dt: f32) {
        for effect in &mut self.active {
            effect.age += dt;
            if effect.attached {
                effect.position = anchor + effect.anchor_offset;
            }
        }
        self.active.retain(|effect| effect.age < effect.lifetime);

        for request in self.queue.drain() {
            self.spawn(request);
        }
    }

    fn spawn(&mut self, request: EffectRequest) {
        let Some(clip) = self.clips.get(&request.clip) else {
            log::warn!("Dropping effect with unknown clip '{}'", request.clip);
            return;
        };

        let base = match request.align {
            EffectAlign::Center => request.anchor.position,
            EffectAlign::Bottom => Vec2::new(
                request.anchor.position.x,
                request.anchor.position.y - request.anchor.sprite_height / 2.0,
            ),
        };
        let position = base + request.offset;

        self.active.push(ActiveEffect {
            clip: request.clip,
            position,
            flip: request.flip,
            attached: request.attach,
            anchor_offset: position - request.anchor.position,
            age: 0.0,
            lifetime: clip.total_duration(),
        });
    }

    /// Effects currently playing
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.active
    }
}
