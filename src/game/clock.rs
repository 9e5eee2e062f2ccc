use super::config::SpeedLevel;

/// Fixed-timestep scheduler
///
/// Wall-clock deltas from the frame driver are accumulated and spent in
/// whole steps; the remainder carries over to the next frame. The first
/// timestamp only sets the baseline.
#[derive(Debug, Clone)]
pub struct StepClock {
    speeds: Vec<SpeedLevel>,
    current: usize,
    step_ms: f64,
    accumulator_ms: f64,
    last_ts: Option<f64>,
}

impl StepClock {
    /// Create a clock over `speeds`, starting at index `initial`
    ///
    /// `speeds` must be non-empty with positive rates; an out-of-range
    /// `initial` falls back to the first level.
    pub fn new(speeds: Vec<SpeedLevel>, initial: usize) -> Self {
        let current = if initial < speeds.len() { initial } else { 0 };
        let step_ms = speeds[current].step_ms();
        Self {
            speeds,
            current,
            step_ms,
            accumulator_ms: 0.0,
            last_ts: None,
        }
    }

    /// Feed a frame timestamp and run `update` once per whole step due
    ///
    /// Returns how many times `update` ran.
    pub fn advance<F: FnMut()>(&mut self, now_ms: f64, mut update: F) -> u32 {
        let last = *self.last_ts.get_or_insert(now_ms);
        let dt = (now_ms - last).max(0.0);
        self.last_ts = Some(now_ms.max(last));

        self.accumulator_ms += dt;
        let mut steps = 0;
        while self.accumulator_ms >= self.step_ms {
            update();
            self.accumulator_ms -= self.step_ms;
            steps += 1;
        }
        steps
    }

    /// Switch to the speed level at `index`
    ///
    /// The pending accumulator is left as is; the new interval applies from
    /// the next `advance`. Returns false for an unknown index.
    pub fn select_speed(&mut self, index: usize) -> bool {
        let Some(level) = self.speeds.get(index) else {
            return false;
        };
        self.current = index;
        self.step_ms = level.step_ms();
        tracing::info!(speed = %level.label, step_ms = self.step_ms, "speed changed");
        true
    }

    pub fn speed(&self) -> &SpeedLevel {
        &self.speeds[self.current]
    }

    pub fn speed_index(&self) -> usize {
        self.current
    }

    pub fn speeds(&self) -> &[SpeedLevel] {
        &self.speeds
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Time collected toward the next step
    pub fn pending_ms(&self) -> f64 {
        self.accumulator_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn clock() -> StepClock {
        let config = GameConfig::default();
        StepClock::new(config.speeds, config.default_speed)
    }

    fn ten_hz() -> StepClock {
        StepClock::new(vec![SpeedLevel::new("Ten", 10.0), SpeedLevel::new("Twenty", 20.0)], 0)
    }

    #[test]
    fn test_default_is_normal() {
        let clock = clock();
        assert_eq!(clock.speed().label, "Normal");
        assert_eq!(clock.speed_index(), 1);
        assert!((clock.step_ms() - 1000.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = ten_hz();
        let mut calls = 0;
        assert_eq!(clock.advance(5_000.0, || calls += 1), 0);
        assert_eq!(calls, 0);
        assert_eq!(clock.pending_ms(), 0.0);
    }

    #[test]
    fn test_steps_depend_on_elapsed_time_only() {
        let mut clock = ten_hz();
        clock.advance(0.0, || {});

        // Jittery frames totalling 350 ms at 10 Hz give three steps.
        let mut calls = 0;
        for ts in [16.0, 40.0, 41.0, 199.0, 200.0, 350.0] {
            clock.advance(ts, || calls += 1);
        }
        assert_eq!(calls, 3);
        assert!((clock.pending_ms() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_frame_runs_several_steps() {
        let mut clock = ten_hz();
        clock.advance(100.0, || {});
        let mut calls = 0;
        assert_eq!(clock.advance(425.0, || calls += 1), 3);
        assert_eq!(calls, 3);
        assert!((clock.pending_ms() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_change_keeps_accumulator() {
        let mut clock = ten_hz();
        clock.advance(0.0, || {});
        assert_eq!(clock.advance(80.0, || {}), 0);

        assert!(clock.select_speed(1));
        assert!((clock.pending_ms() - 80.0).abs() < 1e-9);

        // 80 ms pending already covers one 50 ms step.
        assert_eq!(clock.advance(80.0, || {}), 1);
        assert!((clock.pending_ms() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_speed_rejected() {
        let mut clock = clock();
        assert!(!clock.select_speed(7));
        assert_eq!(clock.speed_index(), 1);
    }

    #[test]
    fn test_backwards_timestamp_adds_nothing() {
        let mut clock = ten_hz();
        clock.advance(1_000.0, || {});
        assert_eq!(clock.advance(900.0, || {}), 0);
        assert_eq!(clock.pending_ms(), 0.0);
        assert_eq!(clock.advance(1_100.0, || {}), 1);
    }

    #[test]
    fn test_out_of_range_initial_falls_back() {
        let clock = StepClock::new(GameConfig::default().speeds, 10);
        assert_eq!(clock.speed_index(), 0);
    }
}
