//! # Layered Noise Fields
//!
//! Weighted sums of Perlin octaves ("waves") sampled over a grid.

use crate::config::SCALE_EPSILON;
use crate::grid::Field;
use crate::utils::clamp01;
use log::warn;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// One weighted octave of a noise field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Constant added to both sample coordinates
    pub seed: f64,
    /// Multiplier applied to the sample coordinates
    pub frequency: f64,
    /// Weight of this octave; must be non-negative
    pub amplitude: f64,
}

impl Wave {
    pub const fn new(seed: f64, frequency: f64, amplitude: f64) -> Self {
        Self {
            seed,
            frequency,
            amplitude,
        }
    }
}

/// Sample-space translation shared by all fields of one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseOffset {
    pub x: f64,
    pub y: f64,
}

impl NoiseOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Generator of normalized multi-octave noise.
///
/// Cell `(x, y)` samples every wave at
/// `((x / scale + offset.x) * frequency + seed, (y / scale + offset.y) * frequency + seed)`
/// and returns the amplitude-weighted mean, so results stay in `[0, 1]` for
/// non-negative amplitudes. An empty wave list (or zero total amplitude)
/// yields 0 everywhere.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Creates a noise source with the given permutation seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Single-octave Perlin noise remapped into `[0, 1]`.
    pub fn perlin01(&self, x: f64, y: f64) -> f64 {
        clamp01((self.perlin.get([x, y]) + 1.0) * 0.5)
    }

    /// Samples the layered field at one real-valued grid coordinate.
    pub fn sample(&self, x: f64, y: f64, waves: &[Wave], scale: f64, offset: NoiseOffset) -> f64 {
        let sample_x = x / scale + offset.x;
        let sample_y = y / scale + offset.y;

        let (sum, total_amplitude) = waves.iter().fold((0.0, 0.0), |(sum, total), wave| {
            let value = self.perlin01(
                sample_x * wave.frequency + wave.seed,
                sample_y * wave.frequency + wave.seed,
            );
            (sum + wave.amplitude * value, total + wave.amplitude)
        });

        if total_amplitude > 0.0 {
            sum / total_amplitude
        } else {
            0.0
        }
    }

    /// Generates a `width × height` field.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{NoiseField, NoiseOffset, Wave};
    ///
    /// let waves = [Wave::new(0.0, 1.0, 1.0)];
    /// let field = NoiseField::new(0).generate(8, 8, &waves, 4.0, NoiseOffset::default());
    /// assert!(field.values().all(|v| (0.0..=1.0).contains(v)));
    /// ```
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        waves: &[Wave],
        scale: f64,
        offset: NoiseOffset,
    ) -> Field<f64> {
        let scale = effective_scale(scale);
        if waves.is_empty() {
            warn!("Noise field requested with no waves, using a flat zero field");
        }
        Field::from_fn(width, height, |x, y| {
            self.sample(x as f64, y as f64, waves, scale, offset)
        })
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Clamps non-positive (or NaN) scales to [`SCALE_EPSILON`].
pub fn effective_scale(scale: f64) -> f64 {
    if scale > 0.0 {
        scale
    } else {
        warn!("Noise scale {scale} is not positive, clamping to {SCALE_EPSILON}");
        SCALE_EPSILON
    }
}
