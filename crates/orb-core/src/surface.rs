use crate::color::Rgba;

/// Point in canvas pixels, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` along `degrees`, measured clockwise
    /// from the +x axis (screen coordinates).
    pub fn polar(self, degrees: f64, distance: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            x: self.x + rad.cos() * distance,
            y: self.y + rad.sin() * distance,
        }
    }
}

/// Drawing target for rings and bursts.
///
/// Angles are degrees, clockwise from the +x axis. An arc's `radius` is the
/// outer edge of its stroke; the stroke fills `[radius - width, radius]`.
pub trait Surface {
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Rgba,
    );

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba);
}
