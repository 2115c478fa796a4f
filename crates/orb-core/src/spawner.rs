use crate::config::MotionParams;
use crate::constants::FULL_TURN;
use crate::motion::MotionFrame;
use crate::particle::BurstParticle;
use crate::rng::RandomSource;

/// Decides, once per tick, whether a burst is born.
///
/// One Bernoulli trial per tick with probability `activity * spawn_chance`,
/// and only while activity is strictly above the threshold. Below the
/// threshold no random draw is consumed.
#[derive(Clone, Debug)]
pub struct Spawner {
    resolution_scale: f64,
}

impl Spawner {
    pub fn new(resolution_scale: f64) -> Self {
        Self { resolution_scale }
    }

    pub fn should_spawn(&self, activity: f64, params: &MotionParams, rng: &mut dyn RandomSource) -> bool {
        activity > params.spawn_threshold && rng.chance(activity * params.spawn_chance)
    }

    pub fn maybe_spawn(
        &self,
        frame: &MotionFrame,
        params: &MotionParams,
        rng: &mut dyn RandomSource,
    ) -> Option<BurstParticle> {
        if !self.should_spawn(frame.activity, params, rng) {
            return None;
        }
        Some(self.spawn(frame, params, rng))
    }

    /// Unconditionally build a burst with randomized heading, speed, length
    /// and palette color, starting just outside the scaled overlay.
    pub fn spawn(&self, frame: &MotionFrame, params: &MotionParams, rng: &mut dyn RandomSource) -> BurstParticle {
        let s = self.resolution_scale;
        let angle = rng.uniform(0.0, FULL_TURN);
        let speed = rng.uniform(params.burst_speed[0], params.burst_speed[1]) * s;
        let length = rng.uniform(params.burst_length[0], params.burst_length[1]) * s;
        let color = if rng.unit() > 0.5 {
            params.burst_palette[0]
        } else {
            params.burst_palette[1]
        };
        let start = params.burst_origin * s * frame.total_scale;
        BurstParticle::new(angle, speed, length, color, start, params.burst_stroke * s)
    }
}
