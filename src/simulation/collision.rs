//! Oriented bounding-box collision classification.
//!
//! Samples the mask at the four corners of a reduced-size box around the
//! vehicle and folds the per-corner zones into one verdict. The checker is
//! pure: the vehicle applies the consequences.

use serde::{Deserialize, Serialize};

use super::mask::{Mask, Zone};

/// Classifies vehicle positions against the mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionChecker {
    /// Collision box length (already reduced from the visual footprint).
    length: f32,
    /// Collision box width (already reduced from the visual footprint).
    width: f32,
}

impl CollisionChecker {
    /// Creates a checker for a vehicle with the given visual footprint.
    ///
    /// `hitbox_scale` shrinks the box (typically to 40%) so scraping a wall
    /// with a fender is forgiven.
    pub fn new(length: f32, width: f32, hitbox_scale: f32) -> Self {
        Self {
            length: length * hitbox_scale,
            width: width * hitbox_scale,
        }
    }

    /// The four collision box corners for a pose, in mask pixels.
    pub fn corners(&self, x: f32, y: f32, angle: f32) -> [(f32, f32); 4] {
        let (hl, hw) = (self.length / 2.0, self.width / 2.0);
        let (sin, cos) = angle.sin_cos();

        [(-hl, -hw), (hl, -hw), (hl, hw), (-hl, hw)].map(|(dx, dy)| {
            let rx = dx * cos - dy * sin;
            let ry = dx * sin + dy * cos;
            (x + rx, y + ry)
        })
    }

    /// Classifies a candidate pose.
    ///
    /// Any corner off the raster short-circuits to [`Zone::OutOfBounds`] and
    /// any wall corner to [`Zone::Wall`]. Otherwise a slow corner wins over a
    /// checkpoint corner, which wins over plain track, matching the order the
    /// tick algorithm applies consequences in.
    pub fn classify(&self, mask: &dyn Mask, x: f32, y: f32, angle: f32) -> Zone {
        let mut slow = false;
        let mut checkpoint: Option<u8> = None;

        for (cx, cy) in self.corners(x, y, angle) {
            match mask.zone_at(cx as i32, cy as i32) {
                Zone::OutOfBounds => return Zone::OutOfBounds,
                Zone::Wall => return Zone::Wall,
                Zone::Slow => slow = true,
                Zone::Checkpoint(n) => checkpoint = Some(n),
                Zone::Track => {}
            }
        }

        if slow {
            Zone::Slow
        } else if let Some(n) = checkpoint {
            Zone::Checkpoint(n)
        } else {
            Zone::Track
        }
    }
}
