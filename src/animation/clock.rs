use std::time::Duration;

/// What was wrong with a raw frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingAnomaly {
    NotFinite,
    Negative(f32),
    TooLong(f32),
}

/// Frame clock fed with externally measured deltas.
///
/// Every delta is sanitised before use: non-finite or negative values
/// become the fallback delta, overlong ones are clamped to `max_dt`.
/// Anomalies are logged and never surface as errors.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    fallback_dt: f32,
    /// Sanitised delta of the last tick, seconds.
    pub delta: f32,
    /// Sum of all sanitised deltas.
    pub elapsed: Duration,
    /// Total number of ticks.
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25, 0.0)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(max_dt: f32, fallback_dt: f32) -> Self {
        Self {
            max_dt,
            fallback_dt,
            delta: 0.0,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Clamps `raw` into `[0, max_dt]`, replacing garbage with `fallback`.
    #[must_use]
    pub fn sanitize(raw: f32, max_dt: f32, fallback: f32) -> (f32, Option<TimingAnomaly>) {
        if !raw.is_finite() {
            (fallback, Some(TimingAnomaly::NotFinite))
        } else if raw < 0.0 {
            (fallback, Some(TimingAnomaly::Negative(raw)))
        } else if raw > max_dt {
            (max_dt, Some(TimingAnomaly::TooLong(raw)))
        } else {
            (raw, None)
        }
    }

    /// Advances the clock and returns the sanitised delta.
    pub fn tick(&mut self, raw_dt: f32) -> f32 {
        let (dt, anomaly) = Self::sanitize(raw_dt, self.max_dt, self.fallback_dt);
        if let Some(anomaly) = anomaly {
            log::warn!("Frame {}: timing anomaly {anomaly:?}, using dt = {dt}", self.frame_count);
        }
        self.delta = dt;
        self.elapsed += Duration::try_from_secs_f32(dt).unwrap_or(Duration::ZERO);
        self.frame_count += 1;
        dt
    }

    /// Elapsed time in seconds, for the time-based formulas.
    #[inline]
    #[must_use]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    #[inline]
    #[must_use]
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_deltas_fall_back() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(-5.0), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.tick(3.0), 0.25);
        assert_eq!(clock.frame_count, 3);
        assert!((clock.elapsed_secs() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn elapsed_keeps_advancing_in_long_sessions() {
        for start_secs in [100_000, 300_000, 600_000, 2_000_000] {
            let mut clock = FrameClock::default();
            clock.elapsed = Duration::from_secs(start_secs);
            let before = clock.elapsed_secs();
            for _ in 0..60 {
                clock.tick(1.0 / 60.0);
            }
            let advanced = clock.elapsed_secs() - before;
            assert!((advanced - 1.0).abs() < 1e-3, "start {start_secs}: advanced {advanced}");
        }
    }
}
