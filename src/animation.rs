//! # Highlight Animation
//!
//! The found-token highlight as data: a [`HighlightSequence`] of timed
//! [`Stage`]s that the presentation layer samples each frame. Nothing here
//! knows about colors or terminals; a stage only produces a number in its
//! own range and the renderer decides what that number looks like.
//!
//! ## Standard sequence
//!
//! | Stage   | From | To  | Cycle | Cycles | Auto-reverse |
//! |---------|------|-----|-------|--------|--------------|
//! | Offset  | 0.0  | 1.0 | 0.5 s | 2      | yes          |
//! | Opacity | 1.0  | 0.3 | 0.5 s | 2      | yes          |
//! | Fill    | 0.0  | 1.0 | 1.0 s | 2      | yes          |
//!
//! Stages play one after another. Each stage has an even cycle count and
//! auto-reverses, so when the sequence ends the token is back where it
//! started.

use std::time::{Duration, Instant};

/// Which visual property a stage drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Vertical lift, 0.0 (resting) to 1.0 (fully raised)
    Offset,
    /// Token opacity, 1.0 is fully visible
    Opacity,
    /// Blend from the base color (0.0) to the accent color (1.0)
    Fill,
}

/// One timed effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub kind: EffectKind,
    pub from: f32,
    pub to: f32,
    pub cycle: Duration,
    pub cycles: u32,
    pub auto_reverse: bool,
}

impl Stage {
    pub fn duration(&self) -> Duration {
        self.cycle * self.cycles
    }

    /// Value of this stage `elapsed` after it began.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let cycle = self.cycle.as_secs_f32();
        if cycle <= 0.0 {
            return self.from;
        }

        let position = elapsed.as_secs_f32() / cycle;
        let index = position.floor();
        let mut progress = position - index;
        if self.auto_reverse && (index as u32) % 2 == 1 {
            progress = 1.0 - progress;
        }

        self.from + (self.to - self.from) * progress
    }
}

/// Visual state of the highlighted token at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenFrame {
    pub offset: f32,
    pub opacity: f32,
    pub fill: f32,
}

impl Default for TokenFrame {
    fn default() -> Self {
        Self {
            offset: 0.0,
            opacity: 1.0,
            fill: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSequence {
    stages: Vec<Stage>,
}

impl Default for HighlightSequence {
    fn default() -> Self {
        Self::standard()
    }
}

impl HighlightSequence {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Lift, fade, then recolor the token.
    pub fn standard() -> Self {
        let half_second = Duration::from_millis(500);
        Self::new(vec![
            Stage {
                kind: EffectKind::Offset,
                from: 0.0,
                to: 1.0,
                cycle: half_second,
                cycles: 2,
                auto_reverse: true,
            },
            Stage {
                kind: EffectKind::Opacity,
                from: 1.0,
                to: 0.3,
                cycle: half_second,
                cycles: 2,
                auto_reverse: true,
            },
            Stage {
                kind: EffectKind::Fill,
                from: 0.0,
                to: 1.0,
                cycle: Duration::from_secs(1),
                cycles: 2,
                auto_reverse: true,
            },
        ])
    }

    /// Play the sequence `speed` times faster. Non-positive or non-finite
    /// speeds leave it unchanged, as does any speed whose scaled cycle would
    /// not fit in a `Duration`.
    pub fn with_speed(mut self, speed: f32) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            return self;
        }
        for stage in &mut self.stages {
            if let Ok(cycle) = Duration::try_from_secs_f32(stage.cycle.as_secs_f32() / speed) {
                stage.cycle = cycle;
            }
        }
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Total play time of all stages back to back.
    pub fn duration(&self) -> Duration {
        self.stages.iter().map(Stage::duration).sum()
    }

    /// Frame `elapsed` after the sequence started, `None` once it has ended.
    pub fn sample(&self, elapsed: Duration) -> Option<TokenFrame> {
        let mut start = Duration::ZERO;
        for stage in &self.stages {
            let end = start + stage.duration();
            if elapsed < end {
                let value = stage.value_at(elapsed - start);
                let mut frame = TokenFrame::default();
                match stage.kind {
                    EffectKind::Offset => frame.offset = value,
                    EffectKind::Opacity => frame.opacity = value,
                    EffectKind::Fill => frame.fill = value,
                }
                return Some(frame);
            }
            start = end;
        }
        None
    }
}

/// A highlight currently playing on one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub index: usize,
    /// Token row generation the index refers to
    pub generation: u64,
    pub started_at: Instant,
}

/// Plays at most one highlight at a time.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    sequence: HighlightSequence,
    active: Option<Highlight>,
}

impl Animator {
    pub fn new(sequence: HighlightSequence) -> Self {
        Self {
            sequence,
            active: None,
        }
    }

    /// Start highlighting token `index`, replacing any running highlight.
    pub fn start(&mut self, index: usize, generation: u64, now: Instant) {
        self.active = Some(Highlight {
            index,
            generation,
            started_at: now,
        });
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Drop the running highlight if it targets a token row other than
    /// `generation`.
    pub fn invalidate(&mut self, generation: u64) {
        if self
            .active
            .is_some_and(|highlight| highlight.generation != generation)
        {
            self.active = None;
        }
    }

    pub fn active(&self) -> Option<Highlight> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Index and frame of the highlighted token at `now`. Finishes the
    /// highlight once the sequence has played out.
    pub fn frame(&mut self, now: Instant) -> Option<(usize, TokenFrame)> {
        let highlight = self.active?;
        let elapsed = now.saturating_duration_since(highlight.started_at);
        match self.sequence.sample(elapsed) {
            Some(frame) => Some((highlight.index, frame)),
            None => {
                self.active = None;
                None
            }
        }
    }
}
