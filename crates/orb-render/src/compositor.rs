use orb_core::{MotionFrame, OrbConfig, OrbScene};

use crate::asset::OverlayImage;
use crate::canvas::Canvas;
use crate::error::Result;
use crate::frame::Frame;

/// Layers one frame: bursts, then the pulsing overlay, then the rings.
///
/// The order is fixed. Bursts sit behind the overlay and the overlay sits
/// behind the rings.
pub struct Compositor {
    width: u32,
    height: u32,
    overlay: OverlayImage,
    /// Overlay edge in pixels at total scale 1.0.
    overlay_base: f64,
}

impl Compositor {
    pub fn new(config: &OrbConfig, overlay: OverlayImage) -> Self {
        Self {
            width: config.width,
            height: config.height,
            overlay,
            overlay_base: config.motion.overlay_size * config.resolution_scale(),
        }
    }

    pub fn overlay(&self) -> &OverlayImage {
        &self.overlay
    }

    /// Overlay edge in whole pixels for this frame.
    pub fn overlay_size(&self, motion: &MotionFrame) -> u32 {
        (self.overlay_base * motion.total_scale).max(0.0) as u32
    }

    pub fn compose(&self, scene: &OrbScene, motion: &MotionFrame) -> Result<Frame> {
        let mut canvas = Canvas::new(self.width, self.height)?;
        let center = canvas.center();

        scene.draw_particles(&mut canvas, center);

        let size = self.overlay_size(motion);
        if size > 0 {
            let scaled = self.overlay.scaled(size)?;
            canvas.draw_image_centered(scaled.as_ref(), center);
        }

        scene.draw_rings(&mut canvas, center, motion);

        canvas.into_frame()
    }
}
