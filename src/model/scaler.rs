//! Standard scaling fitted at training time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Per-feature (x - mean) / scale transform, exported to JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Load scaler parameters from a JSON export.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let scaler: Self = serde_json::from_reader(BufReader::new(file))?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(Error::Model(format!(
                "{}: mean has {} entries, scale has {}",
                path.display(),
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        Ok(scaler)
    }

    /// No-op scaler of the given width.
    pub fn identity(dimension: usize) -> Self {
        Self {
            mean: vec![0.0; dimension],
            scale: vec![1.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Scale one row. Constant features carry scale 0 in the export and pass
    /// through centered only.
    pub fn transform(&self, row: &[f32]) -> Result<Vec<f32>, Error> {
        if row.len() != self.mean.len() {
            return Err(Error::Model(format!(
                "scaler input has {} values, expected {}",
                row.len(),
                self.mean.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let divisor = if scale == 0.0 { 1.0 } else { scale };
                ((x as f64 - mean) / divisor) as f32
            })
            .collect())
    }
}
