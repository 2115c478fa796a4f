use crate::color::Rgba;
use crate::config::MotionParams;
use crate::surface::{Point, Surface};

/// Radial streak shooting out from the orb.
///
/// Moves outward at constant speed while its length shrinks and its alpha
/// fades geometrically. Neither ever grows back. Dead once either falls
/// below its floor.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstParticle {
    /// Emission angle in degrees, fixed for life.
    pub angle: f64,
    pub speed: f64,
    /// Stroke width, fixed at spawn.
    pub stroke: f64,
    distance: f64,
    length: f64,
    color: Rgba,
    alive: bool,
}

impl BurstParticle {
    pub fn new(angle: f64, speed: f64, length: f64, color: Rgba, start_distance: f64, stroke: f64) -> Self {
        Self {
            angle,
            speed,
            stroke,
            distance: start_distance,
            length,
            color,
            alive: true,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn alpha(&self) -> u8 {
        self.color.a
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// One tick: move out, shrink, fade (alpha truncates to an integer).
    pub fn update(&mut self, params: &MotionParams) {
        self.distance += self.speed;
        self.length *= params.length_decay;
        let alpha = (self.color.a as f64 * params.alpha_decay) as u8;
        self.color = self.color.with_alpha(alpha);
        if alpha < params.min_alpha || self.length < params.min_length {
            self.alive = false;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, center: Point) {
        let from = center.polar(self.angle, self.distance);
        let to = center.polar(self.angle, self.distance + self.length);
        surface.stroke_line(from, to, self.stroke, self.color);
    }
}
