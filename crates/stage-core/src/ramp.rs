//! Frame-stepped linear gain ramps toward a preset.
//!
//! The scheduler is ticked from outside (one tick per animation frame in the
//! browser), so it can be driven deterministically in tests.

use crate::constants::PRESET_SCALE;
use crate::scene::GainVec;

/// One in-flight transition of every source gain toward a target.
#[derive(Clone, Debug, PartialEq)]
pub struct GainRampJob {
    baseline: GainVec,
    target: GainVec,
    increment: GainVec,
    steps: u32,
    step: u32,
}

impl GainRampJob {
    /// `current` holds the live gains (0..1); `preset` holds targets on the
    /// 0..100 preset scale. Entries beyond `current.len()` are ignored and
    /// sources without a usable entry hold their gain.
    pub fn new(current: &[f32], preset: &[f32], duration_ms: f32, steps_per_sec: f32) -> Self {
        let steps = step_count(duration_ms, steps_per_sec);
        let baseline: GainVec = current.iter().copied().collect();
        let target: GainVec = current
            .iter()
            .enumerate()
            .map(|(i, cur)| match preset.get(i) {
                Some(v) if v.is_finite() => v.clamp(0.0, PRESET_SCALE) / PRESET_SCALE,
                _ => *cur,
            })
            .collect();
        let increment = baseline
            .iter()
            .zip(&target)
            .map(|(b, t)| if steps == 0 { 0.0 } else { (t - b) / steps as f32 })
            .collect();
        Self {
            baseline,
            target,
            increment,
            steps,
            step: 0,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn target(&self) -> &[f32] {
        &self.target
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps
    }

    /// Advance one step and return the gains for it. The last step lands
    /// exactly on the target.
    fn advance(&mut self) -> GainVec {
        self.step = (self.step + 1).min(self.steps.max(1));
        if self.step >= self.steps {
            return self.target.clone();
        }
        let k = self.step as f32;
        self.baseline
            .iter()
            .zip(&self.increment)
            .zip(&self.target)
            .map(|((b, inc), t)| {
                let v = b + inc * k;
                // never step past the target
                if *inc >= 0.0 {
                    v.min(*t)
                } else {
                    v.max(*t)
                }
            })
            .collect()
    }
}

fn step_count(duration_ms: f32, steps_per_sec: f32) -> u32 {
    if !(duration_ms.is_finite() && duration_ms > 0.0 && steps_per_sec > 0.0) {
        return 0;
    }
    (duration_ms * steps_per_sec / 1000.0).round() as u32
}

#[derive(Clone, Debug, PartialEq)]
pub struct RampTick {
    pub gains: GainVec,
    pub finished: bool,
}

/// Holds at most one live [`GainRampJob`]; starting a new one replaces it.
pub struct RampScheduler {
    job: Option<GainRampJob>,
    steps_per_sec: f32,
    // bumped on every start so observers can tell a superseding ramp apart
    generation: u64,
}

impl RampScheduler {
    pub fn new(steps_per_sec: f32) -> Self {
        Self {
            job: None,
            steps_per_sec,
            generation: 0,
        }
    }

    /// Start ramping from `current` toward `preset`, superseding any job in
    /// flight. Passing the live gains as `current` keeps the transition
    /// continuous.
    pub fn start(&mut self, current: &[f32], preset: &[f32], duration_ms: f32) -> &GainRampJob {
        if self.job.is_some() {
            log::debug!("[ramp] superseding in-flight ramp");
        }
        let job = GainRampJob::new(current, preset, duration_ms, self.steps_per_sec);
        log::debug!("[ramp] {} steps over {} ms", job.steps(), duration_ms);
        self.generation += 1;
        self.job.insert(job)
    }

    /// Number of ramps started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.job.is_some()
    }

    /// Advance the live job by one step. The job is dropped once it lands on
    /// its target.
    pub fn tick(&mut self) -> Option<RampTick> {
        let job = self.job.as_mut()?;
        let gains = job.advance();
        let finished = job.is_finished();
        if finished {
            self.job = None;
        }
        Some(RampTick { gains, finished })
    }
}
