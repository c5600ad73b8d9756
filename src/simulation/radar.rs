//! Fixed-angle raycast distance sensor.
//!
//! Radar rays march outward from the vehicle in fixed-length steps until they
//! hit a wall-classified pixel, leave the raster or exhaust their range. The
//! reading is a pure function of pose and mask; only the last sweep is kept.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::mask::{Mask, Zone};
use super::params::RadarParams;

/// One resolved radar ray.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarRay {
    /// End point of the ray (hit point, raster edge or max range).
    pub end: (f32, f32),
    /// Euclidean distance from the vehicle to the end point.
    pub distance: f32,
}

/// The radar sensor of one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Radar {
    /// Ray geometry and quantization.
    pub params: RadarParams,
    /// Rays from the last sweep, one per configured angle.
    pub rays: Vec<RadarRay>,
}

impl Radar {
    /// Creates a radar with no rays cast yet.
    pub fn new(params: RadarParams) -> Self {
        Self {
            params,
            rays: Vec::new(),
        }
    }

    /// Recasts all rays from the given pose against the mask.
    ///
    /// Only walls stop a ray; slow zones and checkpoint colors are transparent
    /// to the radar.
    pub fn update(&mut self, x: f32, y: f32, heading: f32, mask: &dyn Mask) {
        self.rays.clear();

        for offset_deg in self.params.angles.clone() {
            let ray_angle = heading + offset_deg.to_radians();
            let (sin, cos) = ray_angle.sin_cos();

            let mut end = (x, y);
            let mut length = 0.0;
            while length < self.params.max_length {
                let probe = (x + cos * length, y + sin * length);
                match mask.zone_at(probe.0 as i32, probe.1 as i32) {
                    Zone::OutOfBounds | Zone::Wall => break,
                    _ => end = probe,
                }
                length += self.params.step;
            }

            let distance = ((end.0 - x).powi(2) + (end.1 - y).powi(2)).sqrt();
            self.rays.push(RadarRay { end, distance });
        }
    }

    /// Quantized distance bands for the external evaluator.
    ///
    /// Always exactly `num_rays` values; each is `distance / unit` truncated,
    /// so readings stay in `0..=max_length / unit`. Zero-filled before the
    /// first sweep.
    pub fn get_data(&self) -> Vec<i32> {
        let mut data = vec![0; self.params.num_rays()];
        for (slot, ray) in data.iter_mut().zip(&self.rays) {
            *slot = (ray.distance / self.params.unit) as i32;
        }
        data
    }

    /// The same reading scaled to `[0, 1]` as a fixed-length input vector.
    pub fn sensor_vector(&self) -> Array1<f32> {
        let max_band = self.params.max_length / self.params.unit;
        Array1::from_iter(self.get_data().iter().map(|&d| d as f32 / max_band))
    }

    /// Discards the last sweep.
    pub fn reset(&mut self) {
        self.rays.clear();
    }
}
