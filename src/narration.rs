//! Narration
//!
//! The intro is a short run of captions ("beats") shown one after another
//! while the camera circles the city. [`NarrationSequencer`] is a plain
//! state machine driven by the frame clock:
//!
//! ```text
//! Idle --(start delay)--> Showing(0) --> ... --> Showing(n-1) --> Completed
//!   \__________________________ skip() _________________________/
//! ```
//!
//! Each beat fades in, holds, then fades out before the next one starts.
//! `Completed` is terminal and is reported once.

use std::borrow::Cow;

/// One caption of the intro.
#[derive(Debug, Clone, PartialEq)]
pub struct Beat {
    pub text: Cow<'static, str>,
    /// Seconds from the beat's start until it begins to fade out.
    pub duration: f32,
}

impl Beat {
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>, duration: f32) -> Self {
        Self {
            text: text.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrationSettings {
    /// Wait before the first beat, while the title overlay fades away.
    pub start_delay: f32,
    pub fade_in: f32,
    pub fade_out: f32,
    pub beats: Vec<Beat>,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            start_delay: 0.8,
            fade_in: 1.0,
            fade_out: 1.0,
            beats: default_beats(),
        }
    }
}

/// The four Marrakech captions.
#[must_use]
pub fn default_beats() -> Vec<Beat> {
    [
        "Marrakech... The Red City under the silver crescent.",
        "Behold the Medina in miniature, a toy-box of trade and ancient code.",
        "In the quiet shadows, legends come to life. Observe the Merchants and the Spirits of the night.",
        "Engage with the silence. Step into the Moroccan Protocol.",
    ]
    .into_iter()
    .map(|text| Beat::new(text, 4.5))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationPhase {
    Idle,
    Showing(usize),
    Completed,
}

/// Result of [`NarrationSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NarrationStep<'a> {
    Beat(usize, &'a Beat),
    Completed,
}

/// Transitions reported by [`NarrationSequencer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationEvent {
    BeatStarted(usize),
    Completed,
}

#[derive(Debug, Clone)]
pub struct NarrationSequencer {
    settings: NarrationSettings,
    phase: NarrationPhase,
    /// Seconds spent in the current phase.
    timer: f32,
}

impl NarrationSequencer {
    #[must_use]
    pub fn new(settings: NarrationSettings) -> Self {
        Self {
            settings,
            phase: NarrationPhase::Idle,
            timer: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> NarrationPhase {
        self.phase
    }

    #[must_use]
    pub fn beats(&self) -> &[Beat] {
        &self.settings.beats
    }

    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == NarrationPhase::Completed
    }

    /// The beat on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<(usize, &Beat)> {
        match self.phase {
            NarrationPhase::Showing(i) => self.settings.beats.get(i).map(|beat| (i, beat)),
            _ => None,
        }
    }

    /// Moves to the next beat, or to `Completed` after the last one.
    ///
    /// Calling it again once completed keeps returning `Completed`.
    pub fn advance(&mut self) -> NarrationStep<'_> {
        let next = match self.phase {
            NarrationPhase::Idle => 0,
            NarrationPhase::Showing(i) => i + 1,
            NarrationPhase::Completed => return NarrationStep::Completed,
        };
        self.timer = 0.0;

        match self.settings.beats.get(next) {
            Some(beat) => {
                self.phase = NarrationPhase::Showing(next);
                log::debug!("Narration beat {next}: {}", beat.text);
                NarrationStep::Beat(next, beat)
            }
            None => {
                self.phase = NarrationPhase::Completed;
                log::info!("Narration completed");
                NarrationStep::Completed
            }
        }
    }

    /// Advances the timers by `dt` seconds.
    ///
    /// Returns the transition that happened during this step, if any. Large
    /// steps may skip through several beats; only the last transition is
    /// reported, except that completion is never swallowed.
    pub fn update(&mut self, dt: f32) -> Option<NarrationEvent> {
        if self.is_completed() {
            return None;
        }
        self.timer += dt.max(0.0);

        let mut event = None;
        loop {
            let span = match self.phase {
                NarrationPhase::Idle => self.settings.start_delay,
                NarrationPhase::Showing(i) => self.beat_span(i),
                NarrationPhase::Completed => return event,
            };
            if self.timer < span {
                return event;
            }
            let carry = self.timer - span;
            event = Some(match self.advance() {
                NarrationStep::Beat(i, _) => NarrationEvent::BeatStarted(i),
                NarrationStep::Completed => NarrationEvent::Completed,
            });
            self.timer = carry;
        }
    }

    /// Jumps straight to `Completed`. Returns false if it already was.
    pub fn skip(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        log::info!("Narration skipped");
        self.phase = NarrationPhase::Completed;
        self.timer = 0.0;
        true
    }

    /// Opacity of the current caption: ramps up over the fade-in, holds at
    /// one, ramps down over the fade-out. Zero when nothing is shown.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        let NarrationPhase::Showing(i) = self.phase else {
            return 0.0;
        };
        let Some(beat) = self.settings.beats.get(i) else {
            return 0.0;
        };
        let t = self.timer;
        let fade_in = if self.settings.fade_in > 0.0 {
            (t / self.settings.fade_in).min(1.0)
        } else {
            1.0
        };
        let fade_out = if t <= beat.duration {
            1.0
        } else if self.settings.fade_out > 0.0 {
            1.0 - ((t - beat.duration) / self.settings.fade_out).min(1.0)
        } else {
            0.0
        };
        fade_in.min(fade_out).max(0.0)
    }

    fn beat_span(&self, index: usize) -> f32 {
        self.settings
            .beats
            .get(index)
            .map_or(0.0, |beat| beat.duration.max(0.0) + self.settings.fade_out.max(0.0))
    }
}

impl Default for NarrationSequencer {
    fn default() -> Self {
        Self::new(NarrationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_precedes_first_beat() {
        let mut narration = NarrationSequencer::default();
        assert_eq!(narration.update(0.5), None);
        assert_eq!(narration.phase(), NarrationPhase::Idle);
        assert_eq!(narration.update(0.4), Some(NarrationEvent::BeatStarted(0)));
    }

    #[test]
    fn opacity_fades_in_and_out() {
        let mut narration = NarrationSequencer::default();
        narration.advance();
        narration.update(0.5);
        assert!((narration.opacity() - 0.5).abs() < 1e-5);
        narration.update(3.0);
        assert!((narration.opacity() - 1.0).abs() < 1e-5);
        narration.update(1.5);
        assert!((narration.opacity() - 0.5).abs() < 1e-5);
    }
}
