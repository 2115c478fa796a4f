use crate::config::MotionParams;
use crate::state::ConversationState;

/// Scale factors derived for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame {
    /// Smoothed activity after this tick's update.
    pub activity: f64,
    /// Breathing pulse around 1.0.
    pub pulse: f64,
    /// Extra scale from activity.
    pub speech_expansion: f64,
    /// pulse + speech_expansion. Scales the overlay and the burst origin.
    pub total_scale: f64,
}

impl MotionFrame {
    /// Per-ring scale: outer rings expand progressively more during speech.
    pub fn ring_scale(&self, index: usize, ripple: f64) -> f64 {
        self.total_scale + self.speech_expansion * (index as f64 * ripple)
    }
}

/// Smoothed activity level plus the breathing phase.
///
/// The target is a discrete per-state level; the smoothed value chases it
/// with a first-order low-pass, so state changes read as continuous motion.
/// The phase advances per logical tick, not per wall-clock second.
#[derive(Clone, Debug)]
pub struct MotionModel {
    params: MotionParams,
    phase: f64,
    activity: f64,
}

impl MotionModel {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            phase: 0.0,
            activity: 0.0,
        }
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn activity(&self) -> f64 {
        self.activity
    }

    /// Smooth toward the state's target, advance the phase, derive scales.
    pub fn advance(&mut self, state: ConversationState) -> MotionFrame {
        let p = &self.params;
        let target = state.target_activity(p);
        self.activity += (target - self.activity) * p.smoothing;
        self.phase += p.phase_step;

        let pulse = 1.0 + (self.phase * p.pulse_frequency).sin() * p.pulse_amplitude;
        let speech_expansion = self.activity * p.speech_expansion;

        MotionFrame {
            activity: self.activity,
            pulse,
            speech_expansion,
            total_scale: pulse + speech_expansion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> MotionModel {
        MotionModel::new(MotionParams::default())
    }

    #[test]
    fn test_first_tick() {
        let mut m = model();
        let f = m.advance(ConversationState::Speaking);
        assert_relative_eq!(f.activity, 0.08, epsilon = 1e-12);
        assert_relative_eq!(m.phase(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(f.pulse, 1.0 + 0.1f64.sin() * 0.02, epsilon = 1e-12);
        assert_relative_eq!(f.speech_expansion, 0.04, epsilon = 1e-12);
        assert_relative_eq!(f.total_scale, f.pulse + 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_idle_stays_at_rest() {
        let mut m = model();
        for _ in 0..50 {
            let f = m.advance(ConversationState::Idle);
            assert_eq!(f.activity, 0.0);
            assert!((f.pulse - 1.0).abs() <= 0.02 + 1e-12);
        }
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut m = model();
        let mut prev = 0.0;
        for _ in 0..300 {
            let f = m.advance(ConversationState::Speaking);
            assert!(f.activity >= prev, "activity went backwards");
            assert!(f.activity <= 0.8, "overshoot: {}", f.activity);
            prev = f.activity;
        }
        assert_relative_eq!(prev, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_decays_back_to_idle() {
        let mut m = model();
        for _ in 0..100 {
            m.advance(ConversationState::Speaking);
        }
        let mut prev = m.activity();
        for _ in 0..300 {
            let f = m.advance(ConversationState::Idle);
            assert!(f.activity >= 0.0);
            assert!(f.activity <= prev);
            prev = f.activity;
        }
        assert!(prev < 1e-9);
    }

    #[test]
    fn test_ring_scale_ripples_outward() {
        let f = MotionFrame {
            activity: 0.8,
            pulse: 1.0,
            speech_expansion: 0.4,
            total_scale: 1.4,
        };
        assert_relative_eq!(f.ring_scale(0, 0.2), 1.4);
        assert_relative_eq!(f.ring_scale(1, 0.2), 1.48, epsilon = 1e-12);
        assert_relative_eq!(f.ring_scale(3, 0.2), 1.64, epsilon = 1e-12);
    }
}
