//! Binding of dataset columns into renderer-ready point buffers

use crate::dataset::{ColumnSelection, ColumnView, Dataset, DatasetId};
use crate::error::ConfigError;
use crate::point::{point_size, PointRecord, DEFAULT_FOREGROUND};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A complete point buffer built from one column selection
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    pub dataset_id: DatasetId,
    pub selection: ColumnSelection,
    pub records: Vec<PointRecord>,
}

impl PointBuffer {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Converts a dataset and four column selections into a [`PointBuffer`]
#[derive(Debug, Clone)]
pub struct PointDatasetBinder {
    rng: StdRng,
    foreground: [f32; 4],
    background_range: [f32; 2],
}

impl PointDatasetBinder {
    /// Create a binder with an entropy-seeded color generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a binder with a fixed seed, for reproducible colors
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            foreground: DEFAULT_FOREGROUND,
            background_range: [0.85, 1.0],
        }
    }

    /// Override the fixed foreground color
    pub fn with_foreground(mut self, color: [f32; 4]) -> Self {
        self.foreground = color;
        self
    }

    /// Override the per-channel range of the random background color
    pub fn with_background_range(mut self, range: [f32; 2]) -> Self {
        self.background_range = range;
        self
    }

    /// Build a point buffer from `selection`.
    ///
    /// Every column is resolved and validated before the buffer is allocated,
    /// so a failure never yields a partially filled buffer.
    pub fn bind(
        &mut self,
        dataset: &dyn Dataset,
        selection: &ColumnSelection,
    ) -> Result<PointBuffer, ConfigError> {
        let [x, y, z, size] = self.resolve(dataset, selection)?;
        let n = size.len();

        let records = (0..n)
            .map(|i| PointRecord {
                position: [x.values[i] as f32, y.values[i] as f32, z.values[i] as f32],
                size: point_size(size.values[i]),
                fg_color: self.foreground,
                bg_color: self.random_background(),
            })
            .collect::<Vec<_>>();

        log::debug!(
            "bound {} points from dataset '{}' ({}, {}, {}, size={})",
            n,
            dataset.id(),
            selection.x,
            selection.y,
            selection.z,
            selection.size
        );

        Ok(PointBuffer {
            dataset_id: dataset.id().clone(),
            selection: selection.clone(),
            records,
        })
    }

    fn resolve<'a>(
        &self,
        dataset: &'a dyn Dataset,
        selection: &ColumnSelection,
    ) -> Result<[ColumnView<'a>; 4], ConfigError> {
        let [rx, ry, rz, rs] = selection.requests(dataset.id());
        let size = rs.resolve(dataset)?;
        let x = rx.resolve(dataset)?;
        let y = ry.resolve(dataset)?;
        let z = rz.resolve(dataset)?;

        // Row count is defined by the size column.
        let n = size.len();
        for column in [&x, &y, &z] {
            if column.len() != n {
                return Err(ConfigError::LengthMismatch {
                    column: column.label.clone(),
                    expected: n,
                    actual: column.len(),
                });
            }
        }

        // Checked after narrowing: finite f64 beyond f32 range becomes inf.
        for column in [&x, &y, &z] {
            if let Some(row) = column.values.iter().position(|v| !(*v as f32).is_finite()) {
                return Err(ConfigError::NonFiniteValue {
                    column: column.label.clone(),
                    row,
                });
            }
        }
        if let Some(row) = size.values.iter().position(|v| !point_size(*v).is_finite()) {
            return Err(ConfigError::NonFiniteValue {
                column: size.label.clone(),
                row,
            });
        }

        if let Some((row, &value)) = size.values.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(ConfigError::NegativeSize {
                column: size.label.clone(),
                row,
                value,
            });
        }

        Ok([x, y, z, size])
    }

    fn random_background(&mut self) -> [f32; 4] {
        let [lo, hi] = self.background_range;
        let mut channel = || {
            if lo < hi {
                self.rng.gen_range(lo..=hi)
            } else {
                lo
            }
        };
        [channel(), channel(), channel(), channel()]
    }
}

impl Default for PointDatasetBinder {
    fn default() -> Self {
        Self::new()
    }
}
