use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

pub const STAT_ANIMATION_DURATION: Duration = Duration::from_millis(2000);

/// Fraction of the animation completed at `elapsed`, clamped to `[0, 1]`.
pub fn animation_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Linear interpolation that returns `end` exactly once progress reaches 1.
pub fn interpolate(start: f64, end: f64, progress: f64) -> f64 {
    if progress >= 1.0 {
        return end;
    }
    (end - start).mul_add(progress, start)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatAnimation {
    start: f64,
    end: f64,
    started_at: Instant,
    duration: Duration,
}

impl StatAnimation {
    pub const fn new(start: f64, end: f64, started_at: Instant, duration: Duration) -> Self {
        Self {
            start,
            end,
            started_at,
            duration,
        }
    }

    /// Value to display at `now`. A clock reading before the start counts as zero elapsed.
    pub fn sample(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        interpolate(
            self.start,
            self.end,
            animation_progress(elapsed, self.duration),
        )
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// A numeric tile on the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStat {
    pub label: &'static str,
    pub target: f64,
    pub displayed: f64,
    pub unit: &'static str,
    pub decimals: usize,
}

impl DashboardStat {
    pub const fn new(label: &'static str, target: f64, unit: &'static str, decimals: usize) -> Self {
        Self {
            label,
            target,
            displayed: 0.0,
            unit,
            decimals,
        }
    }

    pub fn display_text(&self) -> String {
        format!(
            "{value:.decimals$}{unit}",
            value = self.displayed,
            decimals = self.decimals,
            unit = self.unit
        )
    }
}

pub fn default_stats() -> Vec<DashboardStat> {
    vec![
        DashboardStat::new("Monitored Locations", 1247.0, "", 0),
        DashboardStat::new("High Risk Areas", 89.0, "", 0),
        DashboardStat::new("Avg Temperature", 24.5, "°C", 1),
        DashboardStat::new("Carbon Reduction", 15.3, "%", 1),
    ]
}

#[derive(Debug, Clone, Copy)]
struct Running {
    target: usize,
    animation: StatAnimation,
}

/// Drives every running stat animation from the display refresh tick.
#[derive(Debug, Default)]
pub struct StatAnimator {
    running: Vec<Running>,
}

impl StatAnimator {
    pub const fn new() -> Self {
        Self {
            running: Vec::new(),
        }
    }

    /// Starts (or restarts) the animation for the stat at index `target`.
    pub fn animate(&mut self, target: usize, start: f64, end: f64, now: Instant, duration: Duration) {
        self.running.retain(|running| running.target != target);
        self.running.push(Running {
            target,
            animation: StatAnimation::new(start, end, now, duration),
        });
    }

    /// Writes the current frame into `stats` and drops finished animations.
    pub fn tick(&mut self, now: Instant, stats: &mut [DashboardStat]) {
        for running in &self.running {
            if let Some(stat) = stats.get_mut(running.target) {
                stat.displayed = running.animation.sample(now);
            }
        }
        self.running
            .retain(|running| !running.animation.is_finished(now));
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}
