//! # Biome Classification
//!
//! Maps (height, moisture, heat) samples onto configured biomes, with a
//! blended tint between the two closest matches.

use crate::utils::{clamp01, lerp};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Interpolates from `self` toward `other` by `t` in `[0, 1]`.
    pub fn lerp(self, other: Tint, t: f64) -> Tint {
        let mix = |a: f32, b: f32| lerp(a as f64, b as f64, t) as f32;
        Tint {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A biome: minimum thresholds on the three fields plus blending data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeDefinition {
    pub name: String,
    pub min_height: f64,
    pub min_moisture: f64,
    pub min_heat: f64,
    /// Base colour of the biome
    #[serde(default)]
    pub tint: Tint,
    /// Higher values give harder borders between biomes
    #[serde(default = "default_blend_sharpness")]
    pub blend_sharpness: f64,
}

fn default_blend_sharpness() -> f64 {
    6.0
}

impl BiomeDefinition {
    /// Creates a biome with the default tint and sharpness.
    pub fn new(name: &str, min_height: f64, min_moisture: f64, min_heat: f64) -> Self {
        Self {
            name: name.to_string(),
            min_height,
            min_moisture,
            min_heat,
            tint: Tint::WHITE,
            blend_sharpness: default_blend_sharpness(),
        }
    }

    /// Sets the tint.
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// True iff every sample meets or exceeds its threshold.
    pub fn matches(&self, height: f64, moisture: f64, heat: f64) -> bool {
        height >= self.min_height && moisture >= self.min_moisture && heat >= self.min_heat
    }

    /// Sum of absolute differences between the samples and the thresholds.
    pub fn score(&self, height: f64, moisture: f64, heat: f64) -> f64 {
        (height - self.min_height).abs()
            + (moisture - self.min_moisture).abs()
            + (heat - self.min_heat).abs()
    }
}

/// Outcome of classifying one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeMatch {
    /// Index of the chosen biome
    pub biome: usize,
    /// Index of the runner-up, if at least two biomes matched
    pub runner_up: Option<usize>,
    /// Score of the chosen biome (0 when it was the fallback)
    pub score: f64,
    /// Blended tint
    pub tint: Tint,
}

/// Nearest-threshold biome selector over a non-empty biome list.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeClassifier {
    biomes: Vec<BiomeDefinition>,
}

impl BiomeClassifier {
    /// Creates a classifier.
    ///
    /// Fails on an empty list: there would be no fallback biome.
    pub fn new(biomes: Vec<BiomeDefinition>) -> DelveResult<Self> {
        if biomes.is_empty() {
            return Err(DelveError::InvalidConfig(
                "at least one biome definition is required".to_string(),
            ));
        }
        Ok(Self { biomes })
    }

    pub fn biomes(&self) -> &[BiomeDefinition] {
        &self.biomes
    }

    /// Picks the matching biome with the lowest score.
    ///
    /// Only biomes whose thresholds are all met compete; equal scores go to
    /// the biome listed first. With no match the first biome is used. The
    /// tint blends from the runner-up toward the winner with weight
    /// `(1 / (1 + gap))^sharpness`, where `gap` is the score difference.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{BiomeClassifier, BiomeDefinition};
    ///
    /// let classifier = BiomeClassifier::new(vec![
    ///     BiomeDefinition::new("grass", 0.0, 0.0, 0.0),
    ///     BiomeDefinition::new("forest", 0.3, 0.5, 0.2),
    /// ]).unwrap();
    /// assert_eq!(classifier.classify(0.4, 0.6, 0.3).biome, 1);
    /// assert_eq!(classifier.classify(0.4, 0.1, 0.3).biome, 0);
    /// ```
    pub fn classify(&self, height: f64, moisture: f64, heat: f64) -> BiomeMatch {
        let mut best: Option<(usize, f64)> = None;
        let mut second: Option<(usize, f64)> = None;

        for (index, biome) in self.biomes.iter().enumerate() {
            if !biome.matches(height, moisture, heat) {
                continue;
            }
            let score = biome.score(height, moisture, heat);
            match best {
                Some((_, best_score)) if score >= best_score => {
                    if second.map_or(true, |(_, second_score)| score < second_score) {
                        second = Some((index, score));
                    }
                }
                _ => {
                    second = best;
                    best = Some((index, score));
                }
            }
        }

        let (biome, score) = best.unwrap_or((0, 0.0));
        let winner = &self.biomes[biome];
        let tint = match second {
            Some((runner_up, second_score)) => {
                let gap = (second_score - score).max(0.0001);
                let weight = clamp01((1.0 / (1.0 + gap)).powf(winner.blend_sharpness));
                self.biomes[runner_up].tint.lerp(winner.tint, weight)
            }
            None => winner.tint,
        };

        BiomeMatch {
            biome,
            runner_up: second.map(|(index, _)| index),
            score,
            tint,
        }
    }
}
