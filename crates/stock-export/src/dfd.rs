//! Exploded-view disassembly sheet.

use lathe_kernel::{Point3d, Vec3};
use lathe_types::{AssemblyInstance, StagedObject};
use tracing::debug;

use crate::errors::ExportError;
use crate::svg::SvgBuilder;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const AMBER: &str = "#ffb000";

/// Distance each point is pushed along the withdrawal direction.
pub const EXPLOSION_FACTOR: f64 = 50.0;
/// Drawing units per model unit.
pub const VIEW_SCALE: f64 = 5.0;

/// Exploded view of an instance's blueprint.
///
/// The withdrawal direction is the instance position, normalized. An instance
/// at the origin has no direction and is drawn unexploded. Dashed lines join
/// each point's resting position to its exploded one.
pub fn dfd_svg(instance: &AssemblyInstance, blueprint: &StagedObject) -> Result<String, ExportError> {
    if blueprint.points.is_empty() {
        return Err(ExportError::NoPoints {
            id: blueprint.id.clone(),
        });
    }
    if blueprint.points.iter().flatten().any(|c| !c.is_finite()) {
        return Err(ExportError::NonFinite {
            id: blueprint.id.clone(),
        });
    }

    let direction = Point3d::from_array(instance.position)
        .to_vec3()
        .normalized()
        .unwrap_or(Vec3::ZERO);
    let offset = direction * EXPLOSION_FACTOR;

    let (resting, exploded): (Vec<(f64, f64)>, Vec<(f64, f64)>) = blueprint
        .points
        .iter()
        .map(|&p| {
            let p = Point3d::from_array(p);
            (project(p), project(p + offset))
        })
        .unzip();

    let dfd = &instance.dfd;
    let mut svg = SvgBuilder::new(WIDTH, HEIGHT, "#050505");
    svg.text(20.0, 40.0, 14, AMBER, "ISO 8887-1: DISASSEMBLY PROTOCOL")
        .text(20.0, 65.0, 10, "#666", &format!("COMPONENT ID: {}", instance.id))
        .text(20.0, 80.0, 10, "#666", &format!("BLUEPRINT: {}", blueprint.id));

    let mark = svg.mark();
    for (from, to) in resting.iter().zip(&exploded) {
        svg.dashed_line(*from, *to, "#444");
    }
    svg.group_since(mark, r#"opacity="0.4""#);

    svg.closed_path(&exploded, "#00ff41", 2.0)
        .text(
            20.0,
            520.0,
            10,
            AMBER,
            &format!("TOOL: {}", dfd.disassembly_tool.to_uppercase()),
        )
        .text(20.0, 535.0, 10, AMBER, &format!("TYPE: {}", dfd.connection_type.label()))
        .text(
            20.0,
            550.0,
            10,
            AMBER,
            &format!("RECYCLABILITY: {:.0}%", dfd.recyclability_index * 100.0),
        );
    for (i, step) in dfd.steps.iter().enumerate() {
        svg.text(420.0, 520.0 + 15.0 * i as f64, 10, "#888", &format!("{}. {}", i + 1, step));
    }

    debug!(instance = %instance.id, points = exploded.len(), "disassembly sheet rendered");
    Ok(svg.build())
}

/// Front view: X right, Y up, centred on the sheet.
fn project(p: Point3d) -> (f64, f64) {
    (
        f64::from(WIDTH) / 2.0 + p.x * VIEW_SCALE,
        f64::from(HEIGHT) / 2.0 - p.y * VIEW_SCALE,
    )
}
