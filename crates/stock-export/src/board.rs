use lathe_types::StagedObject;
use tracing::debug;

use crate::errors::ExportError;
use crate::svg::SvgBuilder;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const ACCENT: &str = "#00ff41";

/// Front-elevation technical board for one blueprint.
///
/// Points are drawn in the XY plane offset to the board centre, with no
/// scaling. The score is printed to four decimals.
pub fn technical_board_svg(object: &StagedObject) -> Result<String, ExportError> {
    let points = board_points(object)?;

    let mut svg = SvgBuilder::new(WIDTH, HEIGHT, "#050505");
    svg.text(20.0, 40.0, 16, ACCENT, "BIM-HELIPOLIEDRAL DOCUMENTATION")
        .text(20.0, 70.0, 12, "#888", &format!("ID: {}", object.id))
        .text(
            20.0,
            90.0,
            12,
            "#888",
            &format!(
                "DOMAIN: {} | UNIT: {}",
                object.domain,
                object.unit_scale.unit_symbol()
            ),
        )
        .polyline(&points, ACCENT, 2.0)
        .text(
            20.0,
            550.0,
            10,
            ACCENT,
            &format!("RECOVERY SCORE: {:.4}", object.recovery_score),
        );

    debug!(id = %object.id, points = points.len(), "technical board rendered");
    Ok(svg.build())
}

fn board_points(object: &StagedObject) -> Result<Vec<(f64, f64)>, ExportError> {
    if object.points.is_empty() {
        return Err(ExportError::NoPoints {
            id: object.id.clone(),
        });
    }
    if object.points.iter().flatten().any(|c| !c.is_finite()) {
        return Err(ExportError::NonFinite {
            id: object.id.clone(),
        });
    }
    let cx = f64::from(WIDTH) / 2.0;
    let cy = f64::from(HEIGHT) / 2.0;
    Ok(object
        .points
        .iter()
        .map(|p| (p[0] + cx, p[1] + cy))
        .collect())
}
