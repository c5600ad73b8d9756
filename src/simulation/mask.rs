//! Zone classification of the raster mask.
//!
//! The mask is a classified bitmap, distinct from the visual track image, whose
//! pixel colors encode what each spot of the world *is*: drivable track, wall,
//! slow zone or one of the ordered checkpoints. Collision and radar both sample
//! it through the single [`classify_rgb`] function so their verdicts can never
//! drift apart.

use serde::{Deserialize, Serialize};

/// An RGB pixel sampled from the mask.
pub type Rgb = (u8, u8, u8);

/// What a mask pixel means to the simulation.
///
/// Every pixel maps to exactly one zone; coordinates outside the raster are
/// always [`Zone::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    /// Drivable track (near-black pixels).
    Track,
    /// Solid wall (saturated red pixels).
    Wall,
    /// Off-track area that damps velocity but does not kill.
    Slow,
    /// One of the ordered checkpoints, numbered from 1.
    Checkpoint(u8),
    /// Outside the raster entirely.
    OutOfBounds,
}

impl Zone {
    /// `true` for the wall zone, the only zone radar rays stop at.
    pub fn is_wall(self) -> bool {
        matches!(self, Zone::Wall)
    }

    /// Checkpoint number if this zone is a checkpoint, `None` otherwise.
    pub fn checkpoint(self) -> Option<u8> {
        match self {
            Zone::Checkpoint(n) => Some(n),
            _ => None,
        }
    }
}

/// Classifies a mask pixel color into its zone.
///
/// Thresholds match the mask palette the tracks are painted with:
/// near-black is track, saturated red is wall, the green/cyan/yellow/magenta
/// hue bands are checkpoints 1-4 and anything else (white, gray, antialiased
/// edges) is a slow zone.
pub fn classify_rgb(r: u8, g: u8, b: u8) -> Zone {
    let (r, g, b) = (u16::from(r), u16::from(g), u16::from(b));
    let avg = (r + g + b) / 3;

    if avg < 50 {
        return Zone::Track;
    }

    if r > 150 && g < 100 && b < 100 {
        return Zone::Wall;
    }

    // Checkpoint hue bands, in lap order.
    if g > 150 && r < 150 && b < 150 && g > r && g > b {
        return Zone::Checkpoint(1); // green
    }
    if g > 150 && b > 150 && r < 150 {
        return Zone::Checkpoint(2); // cyan
    }
    if r > 150 && g > 150 && b < 150 {
        return Zone::Checkpoint(3); // yellow
    }
    if r > 150 && b > 150 && g < 150 {
        return Zone::Checkpoint(4); // magenta
    }

    Zone::Slow
}

/// Read-only view of a classified track raster.
///
/// Implementations are shared by every vehicle in a generation and must never
/// mutate during one, which is what makes parallel per-vehicle ticks safe.
pub trait Mask: Sync {
    /// Raster width in pixels.
    fn width(&self) -> i32;

    /// Raster height in pixels.
    fn height(&self) -> i32;

    /// The pixel at `(x, y)`, or `None` when the coordinate is off the raster.
    fn pixel(&self, x: i32, y: i32) -> Option<Rgb>;

    /// Classifies the pixel at `(x, y)`.
    ///
    /// Out-of-range reads are not an error path: they classify as
    /// [`Zone::OutOfBounds`] and the caller applies the consequences.
    fn zone_at(&self, x: i32, y: i32) -> Zone {
        match self.pixel(x, y) {
            Some((r, g, b)) => classify_rgb(r, g, b),
            None => Zone::OutOfBounds,
        }
    }
}

/// An owned RGB raster implementing [`Mask`].
///
/// Built by the asset-loading layer from a decoded mask image, or directly by
/// tests that paint synthetic tracks.
#[derive(Debug, Clone)]
pub struct MaskBuffer {
    width: i32,
    height: i32,
    pixels: Vec<u8>, // RGB triples, row-major
}

impl MaskBuffer {
    /// Creates a raster filled with a single color.
    pub fn filled(width: i32, height: i32, color: Rgb) -> Self {
        assert!(width > 0 && height > 0, "mask dimensions must be positive");
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Creates a raster from raw row-major RGB bytes.
    ///
    /// Returns `None` when the byte length does not match the dimensions.
    pub fn from_rgb_bytes(width: i32, height: i32, pixels: Vec<u8>) -> Option<Self> {
        if width <= 0 || height <= 0 || pixels.len() != (width * height * 3) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Paints an axis-aligned rectangle with a color, clipped to the raster.
    pub fn paint_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        for y in y0.max(0)..y1.min(self.height) {
            for x in x0.max(0)..x1.min(self.width) {
                let idx = ((y * self.width + x) * 3) as usize;
                self.pixels[idx] = color.0;
                self.pixels[idx + 1] = color.1;
                self.pixels[idx + 2] = color.2;
            }
        }
    }
}

impl Mask for MaskBuffer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some((self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }
}
