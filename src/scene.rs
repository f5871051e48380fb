use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::color::{group_colors, Rgb};
use crate::data::model::ParseResult;
use crate::tilt::tilt_angle;

/// Marker radius used when the caller has no preference.
pub const DEFAULT_MARKER_RADIUS: f64 = 0.5;

/// Every group is rotated about the x axis through the origin.
pub const ROTATION_AXIS: [f64; 3] = [1.0, 0.0, 0.0];
pub const PIVOT: [f64; 3] = [0.0, 0.0, 0.0];

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("reference dataset '{0}' not found")]
    UnknownReference(String),

    #[error("no datasets to place")]
    Empty,
}

// ---------------------------------------------------------------------------
// Scene description handed to the renderer
// ---------------------------------------------------------------------------

/// One sphere marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `<dataset id>_<position index>`.
    pub name: String,
    pub location: [f64; 3],
    pub radius: f64,
}

/// All markers of one dataset, sharing a material and a rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGroup {
    /// Dataset id; also the group and material name.
    pub id: String,
    pub color: Rgb,
    /// Rotation applied to the whole group, in degrees.
    pub tilt_angle_degrees: f64,
    pub rotation_axis: [f64; 3],
    pub pivot: [f64; 3],
    pub markers: Vec<Marker>,
}

/// Everything the renderer needs to draw a parse result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePlan {
    pub reference: String,
    pub groups: Vec<MarkerGroup>,
}

impl ScenePlan {
    /// Plan marker groups for every dataset in parse order.
    ///
    /// `reference` names the dataset angles are measured against; `None`
    /// picks the first dataset parsed.
    pub fn build(
        result: &ParseResult,
        reference: Option<&str>,
        marker_radius: f64,
    ) -> Result<Self, SceneError> {
        let reference = resolve_reference(result, reference)?;
        info!("placing {} dataset(s) relative to '{reference}'", result.len());

        let groups = relative_tilts(result, reference)?
            .into_iter()
            .zip(result)
            .zip(group_colors(result.len()))
            .map(|(((id, angle), dataset), color)| {
                let markers = dataset
                    .positions
                    .iter()
                    .enumerate()
                    .map(|(j, &(x, y))| Marker {
                        name: format!("{id}_{j}"),
                        location: [x, y, 0.0],
                        radius: marker_radius,
                    })
                    .collect();
                MarkerGroup {
                    id: id.to_string(),
                    color,
                    tilt_angle_degrees: angle,
                    rotation_axis: ROTATION_AXIS,
                    pivot: PIVOT,
                    markers,
                }
            })
            .collect();

        Ok(ScenePlan {
            reference: reference.to_string(),
            groups,
        })
    }

    /// Total number of markers across all groups.
    pub fn marker_count(&self) -> usize {
        self.groups.iter().map(|g| g.markers.len()).sum()
    }
}

fn resolve_reference<'a>(
    result: &'a ParseResult,
    reference: Option<&'a str>,
) -> Result<&'a str, SceneError> {
    match reference {
        Some(id) => result
            .get(id)
            .map(|ds| ds.id.as_str())
            .ok_or_else(|| SceneError::UnknownReference(id.to_string())),
        None => result
            .first()
            .map(|ds| ds.id.as_str())
            .ok_or(SceneError::Empty),
    }
}

/// Tilt angle of every dataset against `reference`, in parse order.
pub fn relative_tilts<'a>(
    result: &'a ParseResult,
    reference: &str,
) -> Result<Vec<(&'a str, f64)>, SceneError> {
    let reference = result
        .get(reference)
        .ok_or_else(|| SceneError::UnknownReference(reference.to_string()))?;
    Ok(result
        .iter()
        .map(|ds| (ds.id.as_str(), tilt_angle(&reference.angles, &ds.angles)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BASE_COLORS;
    use crate::data::loader::parse_str;

    const INPUT: &str = "ID: ref\nx: 0\ny: 0\n1,2\n3,4\n\nID: tilted\nx: 0\ny: 90\n5,6\n\nID: lone\nx: 20\ny: 0\n";

    #[test]
    fn first_dataset_is_default_reference() {
        let result = parse_str(INPUT).unwrap();
        let plan = ScenePlan::build(&result, None, DEFAULT_MARKER_RADIUS).unwrap();

        assert_eq!(plan.reference, "ref");
        assert_eq!(plan.groups.len(), 3);
        assert_eq!(plan.groups[0].tilt_angle_degrees, 0.0);
        assert!((plan.groups[1].tilt_angle_degrees - 90.0).abs() < 1e-9);
        assert!((plan.groups[2].tilt_angle_degrees - 20.0).abs() < 1e-9);
    }

    #[test]
    fn markers_are_named_and_placed_in_order() {
        let result = parse_str(INPUT).unwrap();
        let plan = ScenePlan::build(&result, None, 0.25).unwrap();

        let names: Vec<&str> = plan.groups[0].markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["ref_0", "ref_1"]);
        assert_eq!(plan.groups[0].markers[1].location, [3.0, 4.0, 0.0]);
        assert!(plan.groups[0].markers.iter().all(|m| m.radius == 0.25));
        assert!(plan.groups[2].markers.is_empty());
        assert_eq!(plan.marker_count(), 3);
    }

    #[test]
    fn groups_get_colors_and_rotation_about_x() {
        let result = parse_str(INPUT).unwrap();
        let plan = ScenePlan::build(&result, None, DEFAULT_MARKER_RADIUS).unwrap();
        for (group, color) in plan.groups.iter().zip(BASE_COLORS) {
            assert_eq!(group.color, color);
            assert_eq!(group.rotation_axis, ROTATION_AXIS);
            assert_eq!(group.pivot, PIVOT);
        }
    }

    #[test]
    fn explicit_reference() {
        let result = parse_str(INPUT).unwrap();
        let plan = ScenePlan::build(&result, Some("tilted"), DEFAULT_MARKER_RADIUS).unwrap();
        assert_eq!(plan.reference, "tilted");
        assert!((plan.groups[0].tilt_angle_degrees - 90.0).abs() < 1e-9);
        assert_eq!(plan.groups[1].tilt_angle_degrees, 0.0);
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let result = parse_str(INPUT).unwrap();
        let err = ScenePlan::build(&result, Some("nope"), DEFAULT_MARKER_RADIUS).unwrap_err();
        assert!(matches!(err, SceneError::UnknownReference(ref id) if id == "nope"));
    }

    #[test]
    fn empty_result_cannot_be_planned() {
        let err = ScenePlan::build(&ParseResult::new(), None, DEFAULT_MARKER_RADIUS).unwrap_err();
        assert!(matches!(err, SceneError::Empty));
    }

    #[test]
    fn more_than_six_groups_are_all_placed() {
        let text: String = (0..8)
            .map(|i| format!("ID: g{i}\nx: {}\ny: 0\n0,0\n\n", i * 5))
            .collect();
        let result = parse_str(&text).unwrap();
        let plan = ScenePlan::build(&result, None, DEFAULT_MARKER_RADIUS).unwrap();
        assert_eq!(plan.groups.len(), 8);
        assert!((plan.groups[7].tilt_angle_degrees - 35.0).abs() < 1e-9);
        assert_eq!(plan.groups[7].color, group_colors(8)[7]);
        assert_eq!(plan.marker_count(), 8);
    }
}
