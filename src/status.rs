//! The HUD status beacon: a status code that changes now and then and a
//! corner indicator that occasionally dims.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

pub const STATUS_CODES: [&str; 4] = ["SYNC_STABLE", "EXHIBITION_READY", "NODE_01_AUTH", "ARCHIVE_LINKED"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSettings {
    /// Chance per tick that the HUD refreshes.
    pub refresh_chance: f64,
    /// Chance per refresh that the indicator dims.
    pub dim_chance: f64,
    pub dim_opacity: f32,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            refresh_chance: 0.05,
            dim_chance: 0.1,
            dim_opacity: 0.4,
        }
    }
}

/// What the HUD shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStatus {
    pub daylight_percent: u8,
    pub code: &'static str,
    pub indicator_opacity: f32,
}

impl Default for HudStatus {
    fn default() -> Self {
        Self {
            daylight_percent: 100,
            code: STATUS_CODES[0],
            indicator_opacity: 1.0,
        }
    }
}

impl HudStatus {
    /// The two HUD lines.
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [format!("DAYLIGHT: {}%", self.daylight_percent), format!("STATUS: {}", self.code)]
    }
}

/// Seeded flicker source for [`HudStatus`].
#[derive(Debug)]
pub struct StatusBeacon {
    settings: StatusSettings,
    status: HudStatus,
    rng: StdRng,
}

impl StatusBeacon {
    #[must_use]
    pub fn new(settings: StatusSettings, seed: u64) -> Self {
        Self {
            settings,
            status: HudStatus::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn status(&self) -> &HudStatus {
        &self.status
    }

    /// Rolls for a refresh. Returns the new status when one happened.
    pub fn tick(&mut self) -> Option<&HudStatus> {
        if !self.rng.random_bool(self.settings.refresh_chance.clamp(0.0, 1.0)) {
            return None;
        }
        let index = self.rng.random_range(0..STATUS_CODES.len());
        self.status.code = STATUS_CODES[index];
        self.status.indicator_opacity = if self.rng.random_bool(self.settings.dim_chance.clamp(0.0, 1.0)) {
            self.settings.dim_opacity
        } else {
            1.0
        };
        Some(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_flickers_the_same() {
        let mut a = StatusBeacon::new(StatusSettings::default(), 9);
        let mut b = StatusBeacon::new(StatusSettings::default(), 9);
        for _ in 0..500 {
            assert_eq!(a.tick().copied(), b.tick().copied());
        }
    }

    #[test]
    fn certain_refresh_always_reports() {
        let settings = StatusSettings {
            refresh_chance: 1.0,
            dim_chance: 0.0,
            ..StatusSettings::default()
        };
        let mut beacon = StatusBeacon::new(settings, 1);
        let status = beacon.tick().copied().unwrap();
        assert!(STATUS_CODES.contains(&status.code));
        assert_eq!(status.indicator_opacity, 1.0);
        assert_eq!(status.lines()[0], "DAYLIGHT: 100%");
    }
}
