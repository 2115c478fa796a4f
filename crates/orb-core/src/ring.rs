use crate::color::Rgba;
use crate::config::RingSpec;
use crate::constants::FULL_TURN;
use crate::surface::{Point, Surface};

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round tiny negatives up to exactly 360.
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Rotating ring: solid arc or evenly spaced dashes.
///
/// Part of a fixed set built at startup and never destroyed. The angle
/// advances once per tick, faster with higher activity.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub width: f64,
    pub base_speed: f64,
    pub color: Rgba,
    pub dash_count: u32,
    angle: f64,
}

impl Ring {
    pub fn new(radius: f64, width: f64, base_speed: f64, color: Rgba, dash_count: u32, start_angle: f64) -> Self {
        Self {
            radius,
            width,
            base_speed,
            color,
            dash_count,
            angle: normalize_degrees(start_angle),
        }
    }

    /// Build from a 360p spec, scaling radius and stroke width.
    pub fn from_spec(spec: &RingSpec, resolution_scale: f64) -> Self {
        Self::new(
            spec.radius * resolution_scale,
            spec.width * resolution_scale,
            spec.speed,
            spec.color,
            spec.dashes,
            spec.start_angle,
        )
    }

    /// Current angle in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Angular span of one dash; a full turn for a solid ring.
    pub fn dash_span(&self) -> f64 {
        if self.dash_count > 0 {
            FULL_TURN / (2.0 * self.dash_count as f64)
        } else {
            FULL_TURN
        }
    }

    /// Advance by `base_speed * (1 + activity * gain)` degrees.
    pub fn update(&mut self, activity: f64, gain: f64) {
        let speed = self.base_speed * (1.0 + activity * gain);
        self.angle = normalize_degrees(self.angle + speed);
    }

    /// `(start, sweep)` in degrees for every arc this ring draws.
    pub fn arcs(&self) -> Vec<(f64, f64)> {
        if self.dash_count == 0 {
            return vec![(self.angle, FULL_TURN)];
        }
        let span = self.dash_span();
        (0..self.dash_count)
            .map(|i| (self.angle + i as f64 * span * 2.0, span))
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface, center: Point, scale: f64) {
        let radius = self.radius * scale;
        let width = self.width * scale;
        for (start, sweep) in self.arcs() {
            surface.stroke_arc(center, radius, width, start, sweep, self.color);
        }
    }
}
