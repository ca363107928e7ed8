//! # Screen transitions
//!
//! When a new screen replaces the previous one it can appear instantly,
//! fade in, or be typed out cell by cell. Both animations are plain state
//! advanced once per frame with the elapsed milliseconds.
//!
//! [`ArtSequence`] drives short art-variant animations (an enemy's attack
//! frames, for example) against the same speed setting.

use serde::{Deserialize, Serialize};

use super::grid_renderer::RevealLimit;
use crate::assets::DEFAULT_VARIANT;

/// Frame durations selectable through [`AnimationSpeed`], fastest first
pub const SPEED_STEPS_MS: [u32; 5] = [100, 400, 700, 1000, 1500];

/// Most frames an [`ArtSequence`] holds
pub const MAX_ART_FRAMES: usize = 4;

/// How a freshly built screen replaces the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Shown immediately at full opacity
    #[default]
    Instant,
    /// Alpha animated from 0 to 1
    Fade,
    /// Cells revealed in row-major order
    Typewriter,
}

/// Index into [`SPEED_STEPS_MS`]; out-of-range indices clamp to the slowest step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSpeed(pub u8);

impl AnimationSpeed {
    /// Duration in milliseconds
    pub fn duration_ms(self) -> u32 {
        let index = usize::from(self.0).min(SPEED_STEPS_MS.len() - 1);
        SPEED_STEPS_MS[index]
    }
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(1)
    }
}

/// Running screen transition
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenTransition {
    mode: ReplaceMode,
    duration_ms: u32,
    total_cells: usize,
    alpha: f32,
    revealed: usize,
    active: bool,
}

impl ScreenTransition {
    /// Finished transition: full opacity, everything visible
    pub fn instant() -> Self {
        Self::begin(ReplaceMode::Instant, 0, 0)
    }

    /// Start a transition for a grid of `total_cells` cells
    pub fn begin(mode: ReplaceMode, total_cells: usize, duration_ms: u32) -> Self {
        Self {
            mode,
            duration_ms,
            total_cells,
            alpha: if mode == ReplaceMode::Fade { 0.0 } else { 1.0 },
            revealed: 0,
            active: mode != ReplaceMode::Instant,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: u32) {
        if !self.active {
            return;
        }
        let duration = self.duration_ms.max(1) as f32;

        match self.mode {
            ReplaceMode::Instant => self.active = false,
            ReplaceMode::Fade => {
                self.alpha += dt_ms as f32 / duration;
                if self.alpha >= 1.0 {
                    self.alpha = 1.0;
                    self.active = false;
                }
            }
            ReplaceMode::Typewriter => {
                if self.revealed >= self.total_cells {
                    self.active = false;
                    return;
                }
                let step = (self.total_cells as f32 * (dt_ms as f32 / duration)).ceil() as usize;
                self.revealed = (self.revealed + step.max(1)).min(self.total_cells);
                if self.revealed == self.total_cells {
                    self.active = false;
                }
            }
        }
    }

    /// Current uniform alpha
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Cells the renderer may draw this frame
    pub fn reveal_limit(&self) -> RevealLimit {
        if self.mode == ReplaceMode::Typewriter && self.active {
            RevealLimit::Cells(self.revealed)
        } else {
            RevealLimit::All
        }
    }

    /// Whether frames still change
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mode this transition runs
    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }
}

impl Default for ScreenTransition {
    fn default() -> Self {
        Self::instant()
    }
}

/// Timed sequence of art variants that settles back to `normal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtSequence {
    frames: Vec<String>,
    step: usize,
    deadline_ms: u64,
    active: bool,
    current: String,
}

impl ArtSequence {
    /// Idle sequence showing `normal`
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            step: 0,
            deadline_ms: 0,
            active: false,
            current: DEFAULT_VARIANT.to_string(),
        }
    }

    /// Start playing `frames` (at most [`MAX_ART_FRAMES`]) at time `now_ms`.
    /// The first frame shows immediately. Returns whether anything was queued.
    pub fn queue<S: AsRef<str>>(&mut self, frames: &[S], now_ms: u64, speed: AnimationSpeed) -> bool {
        if frames.is_empty() {
            return false;
        }
        self.frames = frames
            .iter()
            .take(MAX_ART_FRAMES)
            .map(|frame| frame.as_ref().to_string())
            .collect();
        self.step = 0;
        self.current = self.frames[0].clone();
        self.deadline_ms = now_ms + u64::from(speed.duration_ms());
        self.active = true;
        true
    }

    /// Advance at time `now_ms`; returns whether the shown variant changed
    pub fn tick(&mut self, now_ms: u64, speed: AnimationSpeed) -> bool {
        if !self.active || now_ms < self.deadline_ms {
            return false;
        }

        self.step += 1;
        if let Some(frame) = self.frames.get(self.step) {
            self.current = frame.clone();
            self.deadline_ms = now_ms + u64::from(speed.duration_ms());
            return true;
        }

        self.active = false;
        if self.current == DEFAULT_VARIANT {
            false
        } else {
            self.current = DEFAULT_VARIANT.to_string();
            true
        }
    }

    /// Variant to show now
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether frames are still pending
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for ArtSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_speed_steps() {
        assert_eq!(AnimationSpeed::default().duration_ms(), 400);
        assert_eq!(AnimationSpeed(0).duration_ms(), 100);
        assert_eq!(AnimationSpeed(4).duration_ms(), 1500);
        assert_eq!(AnimationSpeed(200).duration_ms(), 1500);
    }

    #[test]
    fn test_instant_is_finished() {
        let mut transition = ScreenTransition::begin(ReplaceMode::Instant, 100, 400);
        assert!(!transition.is_active());
        transition.tick(16);
        assert_relative_eq!(transition.alpha(), 1.0);
        assert_eq!(transition.reveal_limit(), RevealLimit::All);
    }

    #[test]
    fn test_fade_accumulates_alpha() {
        let mut transition = ScreenTransition::begin(ReplaceMode::Fade, 100, 400);
        assert_relative_eq!(transition.alpha(), 0.0);

        transition.tick(100);
        assert_relative_eq!(transition.alpha(), 0.25);
        transition.tick(200);
        assert_relative_eq!(transition.alpha(), 0.75);
        assert!(transition.is_active());

        transition.tick(500);
        assert_relative_eq!(transition.alpha(), 1.0);
        assert!(!transition.is_active());
        assert_eq!(transition.reveal_limit(), RevealLimit::All);
    }

    #[test]
    fn test_typewriter_steps_and_finishes() {
        let mut transition = ScreenTransition::begin(ReplaceMode::Typewriter, 100, 1000);
        assert_eq!(transition.reveal_limit(), RevealLimit::Cells(0));

        transition.tick(16);
        assert_eq!(transition.reveal_limit(), RevealLimit::Cells(2));
        // Zero elapsed time still advances one cell
        transition.tick(0);
        assert_eq!(transition.reveal_limit(), RevealLimit::Cells(3));

        transition.tick(5000);
        assert!(!transition.is_active());
        assert_eq!(transition.reveal_limit(), RevealLimit::All);
    }

    #[test]
    fn test_typewriter_is_monotonic_and_bounded() {
        let total = 37;
        let mut transition = ScreenTransition::begin(ReplaceMode::Typewriter, total, 700);
        let mut last = 0;
        for dt in [3, 16, 0, 40, 16, 16, 250, 16, 1000] {
            transition.tick(dt);
            let shown = match transition.reveal_limit() {
                RevealLimit::Cells(n) => n,
                RevealLimit::All => total,
            };
            assert!(shown >= last);
            assert!(shown <= total);
            last = shown;
        }
        assert_eq!(last, total);
    }

    #[test]
    fn test_replace_mode_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ReplaceMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"fade\"").unwrap();
        assert_eq!(parsed.mode, ReplaceMode::Fade);
        assert!(toml::from_str::<Wrapper>("mode = \"Fade\"").is_err());
    }

    #[test]
    fn test_art_sequence_plays_and_settles() {
        let speed = AnimationSpeed(0);
        let mut sequence = ArtSequence::new();
        assert_eq!(sequence.current(), "normal");

        assert!(sequence.queue(&["attack", "attack_head"], 1000, speed));
        assert_eq!(sequence.current(), "attack");

        assert!(!sequence.tick(1050, speed));
        assert!(sequence.tick(1100, speed));
        assert_eq!(sequence.current(), "attack_head");

        assert!(sequence.tick(1200, speed));
        assert_eq!(sequence.current(), "normal");
        assert!(!sequence.is_active());
        assert!(!sequence.tick(5000, speed));
    }

    #[test]
    fn test_art_sequence_caps_frames() {
        let speed = AnimationSpeed(0);
        let mut sequence = ArtSequence::new();
        assert!(!sequence.queue::<&str>(&[], 0, speed));

        sequence.queue(&["a", "b", "c", "d", "e"], 0, speed);
        let mut shown = vec![sequence.current().to_string()];
        let mut now = 0;
        while sequence.is_active() {
            now += 100;
            if sequence.tick(now, speed) {
                shown.push(sequence.current().to_string());
            }
        }
        assert_eq!(shown, vec!["a", "b", "c", "d", "normal"]);
    }
}
