use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// AngleBundle – one dataset's orientation
// ---------------------------------------------------------------------------

/// Stage orientation of a dataset: tilt about the x axis and about the
/// y axis, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleBundle {
    pub x_angle: f64,
    pub y_angle: f64,
}

impl AngleBundle {
    pub fn new(x_angle: f64, y_angle: f64) -> Self {
        Self { x_angle, y_angle }
    }
}

// ---------------------------------------------------------------------------
// Dataset – one record of the input file
// ---------------------------------------------------------------------------

/// A single parsed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub id: String,
    /// Orientation the positions were recorded at.
    #[serde(flatten)]
    pub angles: AngleBundle,
    /// Particle positions in file order; the index names the marker downstream.
    pub positions: Vec<(f64, f64)>,
}

impl Dataset {
    pub fn new(id: impl Into<String>, angles: AngleBundle, positions: Vec<(f64, f64)>) -> Self {
        Self {
            id: id.into(),
            angles,
            positions,
        }
    }

    pub fn x_angle(&self) -> f64 {
        self.angles.x_angle
    }

    pub fn y_angle(&self) -> f64 {
        self.angles.y_angle
    }
}

// ---------------------------------------------------------------------------
// ParseResult – every dataset of one input source
// ---------------------------------------------------------------------------

/// Datasets keyed by id, iterated in the order their ids first appeared.
///
/// Inserting an id that is already present replaces the stored dataset but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    datasets: Vec<Dataset>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a dataset. Returns the replaced dataset when the id was taken.
    pub fn insert(&mut self, dataset: Dataset) -> Option<Dataset> {
        match self.index.get(&dataset.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.datasets[slot], dataset)),
            None => {
                self.index.insert(dataset.id.clone(), self.datasets.len());
                self.datasets.push(dataset);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Dataset> {
        self.index.get(id).map(|&slot| &self.datasets[slot])
    }

    /// The dataset parsed first, conventionally used as the reference.
    pub fn first(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.datasets.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|ds| ds.id.as_str())
    }

    /// Number of datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether no dataset was parsed.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a Dataset;
    type IntoIter = std::slice::Iter<'a, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Dataset> for ParseResult {
    fn from_iter<I: IntoIterator<Item = Dataset>>(iter: I) -> Self {
        let mut result = ParseResult::new();
        for ds in iter {
            result.insert(ds);
        }
        result
    }
}
