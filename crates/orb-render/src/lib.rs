//! Raster side of the voice orb.
//!
//! Turns an [`orb_core::OrbScene`] into RGBA frames (tiny-skia canvas, image
//! crate for the overlay asset) and runs the fixed-rate frame loop that hands
//! every frame to a [`FrameSink`].

pub mod asset;
pub mod canvas;
pub mod compositor;
pub mod engine;
pub mod error;
pub mod frame;
pub mod sink;

pub use asset::{AssetProvider, FileAsset, OverlayImage};
pub use canvas::Canvas;
pub use compositor::Compositor;
pub use engine::{OrbEngine, StateHandle};
pub use error::{RenderError, Result};
pub use frame::{Frame, PixelFormat};
pub use sink::{ChannelSink, FrameSink, NullSink, WriterSink};
