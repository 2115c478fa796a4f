use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::constants::{
    BASELINE_HEIGHT, BURST_CYAN, BURST_PURPLE, OVERLAY_BASE_SIZE, OVERLAY_MASTER_SIZE, RING_CYAN,
    RING_PURPLE, RING_VIOLET, RING_WHITE,
};
use crate::error::{ConfigError, Result};

/// Everything fixed at engine construction. No runtime reconfiguration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub motion: MotionParams,
    pub overlay: OverlaySpec,
    /// Innermost first. Index order is also draw order.
    pub rings: Vec<RingSpec>,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 24.0,
            motion: MotionParams::default(),
            overlay: OverlaySpec::default(),
            rings: RingSpec::default_set(),
        }
    }
}

impl OrbConfig {
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self {
            width,
            height,
            fps,
            ..Self::default()
        }
    }

    /// Resolution scale: height / 360. Every radius, speed and size is
    /// authored at 360p and multiplied by this.
    pub fn resolution_scale(&self) -> f64 {
        self.height as f64 / BASELINE_HEIGHT
    }

    /// Target wall-clock time per tick.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !self.fps.is_finite()
            || self.fps <= 0.0
            || Duration::try_from_secs_f64(1.0 / self.fps).is_err()
        {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        self.motion.validate()
    }
}

/// Tunable constants of the motion model. Defaults reproduce the reference look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// First-order low-pass factor pulling activity toward its target.
    pub smoothing: f64,
    /// Breathing phase advance per tick.
    pub phase_step: f64,
    pub pulse_amplitude: f64,
    pub pulse_frequency: f64,
    /// Scale added per unit of activity.
    pub speech_expansion: f64,
    /// Ring spin multiplier: speed * (1 + activity * gain).
    pub ring_speed_gain: f64,
    /// Extra expansion per ring index during speech.
    pub ring_ripple: f64,

    pub idle_target: f64,
    pub thinking_target: f64,
    pub speaking_target: f64,

    /// Bursts spawn only while activity is strictly above this.
    pub spawn_threshold: f64,
    /// Per-tick spawn probability = activity * spawn_chance.
    pub spawn_chance: f64,
    /// Outward speed range at 360p, `[low, high)`.
    pub burst_speed: [f64; 2],
    /// Initial streak length range at 360p, `[low, high)`.
    pub burst_length: [f64; 2],
    /// Spawn distance from center at 360p, before total scale.
    pub burst_origin: f64,
    /// Streak stroke width at 360p.
    pub burst_stroke: f64,
    pub burst_palette: [Rgba; 2],

    pub length_decay: f64,
    pub alpha_decay: f64,
    pub min_alpha: u8,
    pub min_length: f64,

    /// Overlay edge length at 360p.
    pub overlay_size: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            phase_step: 0.05,
            pulse_amplitude: 0.02,
            pulse_frequency: 2.0,
            speech_expansion: 0.5,
            ring_speed_gain: 5.0,
            ring_ripple: 0.2,
            idle_target: 0.0,
            thinking_target: 0.4,
            speaking_target: 0.8,
            spawn_threshold: 0.4,
            spawn_chance: 0.3,
            burst_speed: [5.0, 15.0],
            burst_length: [20.0, 50.0],
            burst_origin: 80.0,
            burst_stroke: 2.0,
            burst_palette: [BURST_CYAN, BURST_PURPLE],
            length_decay: 0.95,
            alpha_decay: 0.9,
            min_alpha: 10,
            min_length: 1.0,
            overlay_size: OVERLAY_BASE_SIZE,
        }
    }
}

impl MotionParams {
    pub fn validate(&self) -> Result<()> {
        // Factors outside (0, 1] would overshoot the target or grow particles.
        for (name, value) in [
            ("smoothing", self.smoothing),
            ("length_decay", self.length_decay),
            ("alpha_decay", self.alpha_decay),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidParam { name, value });
            }
        }
        for (name, [lo, hi]) in [
            ("burst_speed", self.burst_speed),
            ("burst_length", self.burst_length),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(ConfigError::InvalidParam { name, value: lo });
            }
        }
        Ok(())
    }
}

/// One ring as authored at 360p. Scaled into a [`crate::Ring`] at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub radius: f64,
    pub width: f64,
    /// Degrees per tick at zero activity. Negative spins counter-clockwise.
    pub speed: f64,
    pub color: Rgba,
    /// 0 = solid ring.
    #[serde(default)]
    pub dashes: u32,
    #[serde(default)]
    pub start_angle: f64,
}

impl RingSpec {
    pub fn new(radius: f64, width: f64, speed: f64, color: Rgba, dashes: u32, start_angle: f64) -> Self {
        Self {
            radius,
            width,
            speed,
            color,
            dashes,
            start_angle,
        }
    }

    /// The four reference rings, innermost first.
    pub fn default_set() -> Vec<RingSpec> {
        vec![
            RingSpec::new(65.0, 2.0, 3.0, RING_CYAN, 3, 0.0),
            RingSpec::new(80.0, 4.0, -1.0, RING_PURPLE, 0, 0.0),
            RingSpec::new(95.0, 1.0, 1.5, RING_WHITE, 6, 45.0),
            RingSpec::new(110.0, 6.0, -0.5, RING_VIOLET, 2, 90.0),
        ]
    }
}

/// Where the overlay image comes from and how large it is kept in memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySpec {
    /// `None` renders the placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Longest edge of the master copy, resampled once at load time.
    pub master_size: u32,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self {
            path: None,
            master_size: OVERLAY_MASTER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OrbConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolution_scale_from_height() {
        assert_eq!(OrbConfig::new(1280, 720, 24.0).resolution_scale(), 2.0);
        assert_eq!(OrbConfig::new(640, 360, 24.0).resolution_scale(), 1.0);
    }

    #[test]
    fn test_frame_interval() {
        let config = OrbConfig::new(64, 36, 25.0);
        assert_eq!(config.frame_interval(), Duration::from_millis(40));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = OrbConfig::new(0, 720, 24.0).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroDimension {
                width: 0,
                height: 720
            }
        );
    }

    #[test]
    fn test_rejects_bad_fps() {
        for fps in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-20] {
            assert!(
                matches!(
                    OrbConfig::new(64, 36, fps).validate(),
                    Err(ConfigError::InvalidFrameRate(_))
                ),
                "fps {fps}"
            );
        }
    }

    #[test]
    fn test_slow_fps_has_interval() {
        let config = OrbConfig::new(64, 36, 0.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_overshooting_smoothing() {
        let mut config = OrbConfig::default();
        config.motion.smoothing = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParam {
                name: "smoothing",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut params = MotionParams::default();
        params.burst_length = [50.0, 20.0];
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: OrbConfig = toml::from_str(
            r#"
            height = 360
            [motion]
            smoothing = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.height, 360);
        assert_eq!(config.width, 1280);
        assert_eq!(config.motion.smoothing, 0.2);
        assert_eq!(config.motion.alpha_decay, 0.9);
        assert_eq!(config.rings.len(), 4);
    }

    #[test]
    fn test_toml_rings_override() {
        let config: OrbConfig = toml::from_str(
            r#"
            [[rings]]
            radius = 50.0
            width = 3.0
            speed = 2.0
            color = [255, 0, 0, 255]
            "#,
        )
        .unwrap();
        assert_eq!(config.rings.len(), 1);
        assert_eq!(config.rings[0].dashes, 0);
        assert_eq!(config.rings[0].color, Rgba::new(255, 0, 0, 255));
    }
}
