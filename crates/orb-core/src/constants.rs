use crate::color::Rgba;

/// Frame height all geometry is authored against. Resolution scale = height / 360.
pub const BASELINE_HEIGHT: f64 = 360.0;

/// Degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Burst palette, cyan half.
pub const BURST_CYAN: Rgba = Rgba::new(34, 211, 238, 255);

/// Burst palette, purple half.
pub const BURST_PURPLE: Rgba = Rgba::new(147, 51, 234, 255);

/// Ring palette.
pub const RING_CYAN: Rgba = Rgba::new(34, 211, 238, 200);
pub const RING_PURPLE: Rgba = Rgba::new(147, 51, 234, 255);
pub const RING_WHITE: Rgba = Rgba::new(255, 255, 255, 150);
pub const RING_VIOLET: Rgba = Rgba::new(100, 50, 200, 100);

/// Overlay edge length at 360p, before pulse and speech expansion.
pub const OVERLAY_BASE_SIZE: f64 = 130.0;

/// Longest edge the master overlay is resampled to at load time.
pub const OVERLAY_MASTER_SIZE: u32 = 600;
