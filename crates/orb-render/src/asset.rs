//! Overlay image loading with placeholder fallback.
//!
//! The master copy is decoded once and, if larger than the configured master
//! size, shrunk with Lanczos3. Each frame then resamples it bilinearly to the
//! current pulse size. A missing or broken asset never fails startup.

use std::io;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba as Pixel, RgbaImage};
use orb_core::{OverlaySpec, Rgba};
use tiny_skia::{IntSize, Pixmap};
use tracing::{error, info, warn};

use crate::error::{RenderError, Result};

/// Edge length of the fallback square.
pub const PLACEHOLDER_SIZE: u32 = 250;

/// Fallback when no asset exists.
pub const MISSING_COLOR: Rgba = Rgba::new(100, 100, 255, 255);

/// Fallback when the asset exists but cannot be decoded.
pub const BROKEN_COLOR: Rgba = Rgba::new(255, 0, 0, 255);

/// Supplies the decoded overlay.
pub trait AssetProvider {
    fn load(&self) -> Result<RgbaImage>;

    /// Human-readable origin for log lines.
    fn describe(&self) -> String;
}

/// Overlay read from an image file (PNG or JPEG).
#[derive(Clone, Debug)]
pub struct FileAsset {
    path: PathBuf,
}

impl FileAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssetProvider for FileAsset {
    fn load(&self) -> Result<RgbaImage> {
        if !self.path.exists() {
            return Err(RenderError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", self.path.display()),
            )));
        }
        Ok(image::open(&self.path)?.to_rgba8())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn is_missing(e: &RenderError) -> bool {
    match e {
        RenderError::Io(io) => io.kind() == io::ErrorKind::NotFound,
        RenderError::Image(image::ImageError::IoError(io)) => io.kind() == io::ErrorKind::NotFound,
        _ => false,
    }
}

/// Master copy of the overlay image.
#[derive(Clone, Debug)]
pub struct OverlayImage {
    master: RgbaImage,
}

impl OverlayImage {
    pub fn from_image(master: RgbaImage) -> Self {
        Self { master }
    }

    /// Solid square of the given color.
    pub fn placeholder(color: Rgba) -> Self {
        let pixel = Pixel([color.r, color.g, color.b, color.a]);
        Self::from_image(RgbaImage::from_pixel(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, pixel))
    }

    /// Load through `provider`, substituting a placeholder on any failure.
    pub fn load(provider: &dyn AssetProvider, master_size: u32) -> Self {
        match provider.load() {
            Ok(image) => {
                let master = shrink_to_fit(image, master_size);
                info!(
                    "loaded overlay {} at {}x{}",
                    provider.describe(),
                    master.width(),
                    master.height()
                );
                Self::from_image(master)
            }
            Err(e) if is_missing(&e) => {
                warn!("overlay {} not found, using placeholder", provider.describe());
                Self::placeholder(MISSING_COLOR)
            }
            Err(e) => {
                error!("failed to load overlay {}: {e}", provider.describe());
                Self::placeholder(BROKEN_COLOR)
            }
        }
    }

    /// Load from config; no path means the missing-asset placeholder.
    pub fn from_spec(spec: &OverlaySpec) -> Self {
        match &spec.path {
            Some(path) => Self::load(&FileAsset::new(path), spec.master_size),
            None => {
                info!("no overlay configured, using placeholder");
                Self::placeholder(MISSING_COLOR)
            }
        }
    }

    pub fn master(&self) -> &RgbaImage {
        &self.master
    }

    /// Bilinear resample to `size`×`size`, premultiplied for compositing.
    pub fn scaled(&self, size: u32) -> Result<Pixmap> {
        let err = || RenderError::Canvas {
            width: size,
            height: size,
        };
        let int_size = IntSize::from_wh(size, size).ok_or_else(err)?;
        let resized = imageops::resize(&self.master, size, size, FilterType::Triangle);
        Pixmap::from_vec(premultiply(resized.into_raw()), int_size).ok_or_else(err)
    }
}

/// Shrink so neither side exceeds `max`, keeping aspect. Never enlarges.
fn shrink_to_fit(image: RgbaImage, max: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if max == 0 || (w <= max && h <= max) {
        return image;
    }
    let ratio = (max as f64 / w as f64).min(max as f64 / h as f64);
    let nw = ((w as f64 * ratio).round() as u32).clamp(1, max);
    let nh = ((h as f64 * ratio).round() as u32).clamp(1, max);
    imageops::resize(&image, nw, nh, FilterType::Lanczos3)
}

fn premultiply(mut data: Vec<u8>) -> Vec<u8> {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
    data
}
