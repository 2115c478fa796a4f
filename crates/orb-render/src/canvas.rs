use orb_core::{Point, Rgba, Surface};
use tiny_skia::{Color, LineCap, Paint, Path, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Stroke, Transform};

use crate::error::{RenderError, Result};
use crate::frame::Frame;

/// Polyline resolution for arcs, in degrees per segment.
const ARC_STEP_DEG: f64 = 2.0;

/// Opaque black RGBA canvas backed by a tiny-skia pixmap.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
        pixmap.fill(Color::BLACK);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Integer pixel center, matching how the overlay is positioned.
    pub fn center(&self) -> Point {
        Point::new((self.width() / 2) as f64, (self.height() / 2) as f64)
    }

    /// Source-over blit with the image's top-left at `center - size / 2`.
    pub fn draw_image_centered(&mut self, image: PixmapRef<'_>, center: Point) {
        let x = center.x as i32 - (image.width() / 2) as i32;
        let y = center.y as i32 - (image.height() / 2) as i32;
        self.pixmap
            .draw_pixmap(x, y, image, &PixmapPaint::default(), Transform::identity(), None);
    }

    pub fn into_frame(self) -> Result<Frame> {
        let (width, height) = (self.width(), self.height());
        // Starts opaque and every draw is source-over, so the premultiplied
        // bytes are already straight RGBA.
        Frame::new(width, height, self.pixmap.take())
    }

    fn stroke(&mut self, path: &Path, width: f64, color: Rgba) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

fn arc_path(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> Option<Path> {
    let closed = sweep_deg.abs() >= 360.0;
    let steps = ((sweep_deg.abs() / ARC_STEP_DEG).ceil() as usize).max(1);
    let last = if closed { steps - 1 } else { steps };

    let mut pb = PathBuilder::new();
    for i in 0..=last {
        let deg = start_deg + sweep_deg * i as f64 / steps as f64;
        let p = center.polar(deg, radius);
        if i == 0 {
            pb.move_to(p.x as f32, p.y as f32);
        } else {
            pb.line_to(p.x as f32, p.y as f32);
        }
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

impl Surface for Canvas {
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Rgba,
    ) {
        if width <= 0.0 || radius <= 0.0 {
            return;
        }
        // Stroke is centered on its path; keep the outer edge at `radius`.
        let mid = (radius - width / 2.0).max(0.0);
        if let Some(path) = arc_path(center, mid, start_deg, sweep_deg) {
            self.stroke(&path, width, color);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        if width <= 0.0 || from == to {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    fn px(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
        frame.pixel(x, y).unwrap()
    }

    #[test]
    fn test_new_canvas_is_opaque_black() {
        let frame = Canvas::new(8, 4).unwrap().into_frame().unwrap();
        assert_eq!(frame.data().len(), 8 * 4 * 4);
        assert!(frame.data().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_size_canvas_fails() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(RenderError::Canvas {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_center_is_integer() {
        let canvas = Canvas::new(101, 51).unwrap();
        assert_eq!(canvas.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_solid_arc_covers_band_inside_radius() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let center = canvas.center();
        canvas.stroke_arc(center, 40.0, 8.0, 0.0, 360.0, RED);
        let frame = canvas.into_frame().unwrap();

        // Band is radius 32..40: inside at 36, empty at 28 and 44.
        assert_eq!(px(&frame, 50, 86), [255, 0, 0, 255]);
        assert_eq!(px(&frame, 14, 50), [255, 0, 0, 255]);
        assert_eq!(px(&frame, 50, 78), [0, 0, 0, 255]);
        assert_eq!(px(&frame, 50, 94), [0, 0, 0, 255]);
        assert_eq!(px(&frame, 50, 50), [0, 0, 0, 255]);
    }

    #[test]
    fn test_partial_arc_covers_only_its_sweep() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let center = canvas.center();
        // 45°..135° spans the bottom of the circle in screen space.
        canvas.stroke_arc(center, 40.0, 8.0, 45.0, 90.0, RED);
        let frame = canvas.into_frame().unwrap();

        assert_eq!(px(&frame, 50, 86), [255, 0, 0, 255]);
        assert_eq!(px(&frame, 50, 13), [0, 0, 0, 255]);
        assert_eq!(px(&frame, 86, 50), [0, 0, 0, 255]);
    }

    #[test]
    fn test_translucent_line_blends_over_black() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.stroke_line(
            Point::new(0.0, 10.0),
            Point::new(20.0, 10.0),
            4.0,
            Rgba::new(255, 255, 255, 128),
        );
        let frame = canvas.into_frame().unwrap();
        let [r, g, b, a] = px(&frame, 10, 10);
        assert_eq!(a, 255);
        assert!((126..=130).contains(&r), "r = {r}");
        assert_eq!((r, g), (g, b));
    }

    #[test]
    fn test_degenerate_strokes_draw_nothing() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.stroke_line(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 2.0, RED);
        canvas.stroke_arc(Point::new(5.0, 5.0), 3.0, 0.0, 0.0, 360.0, RED);
        let frame = canvas.into_frame().unwrap();
        assert!(frame.data().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_image_centered() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        let mut image = Pixmap::new(4, 4).unwrap();
        image.fill(Color::from_rgba8(0, 0, 255, 255));
        canvas.draw_image_centered(image.as_ref(), canvas.center());
        let frame = canvas.into_frame().unwrap();

        // top-left at (5 - 2, 5 - 2)
        assert_eq!(px(&frame, 3, 3), [0, 0, 255, 255]);
        assert_eq!(px(&frame, 6, 6), [0, 0, 255, 255]);
        assert_eq!(px(&frame, 2, 3), [0, 0, 0, 255]);
        assert_eq!(px(&frame, 7, 7), [0, 0, 0, 255]);
    }
}
