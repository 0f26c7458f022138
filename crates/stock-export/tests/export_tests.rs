use chrono::Utc;
use lathe_types::*;
use serde_json::Value;
use stock_export::*;
use uuid::Uuid;

// ── Helper functions ─────────────────────────────────────────────────────

fn blueprint(points: Vec<[f64; 3]>) -> StagedObject {
    StagedObject {
        id: "ISO-1A2B3C4D".to_string(),
        name: "UNIT-1F".to_string(),
        points,
        polar_instructions: None,
        layer: 32.5,
        domain: Domain::Auto,
        unit_scale: UnitScale::IsoMetrical,
        description: "ISO AUTO Active Topology".to_string(),
        recovery_score: 0.123456,
        timestamp: Utc::now(),
        revolution_angle: 360.0,
        is_lathe: false,
        status: GeometryStatus::Committed {
            origin: Origin::Manual,
        },
        disassembly: DisassemblyData::default(),
        external_ref: None,
    }
}

fn instance_at(position: [f64; 3], dfd: DisassemblyData) -> AssemblyInstance {
    AssemblyInstance {
        id: Uuid::new_v4(),
        blueprint_id: "ISO-1A2B3C4D".to_string(),
        position,
        rotation: 0.0,
        layer: 32.5,
        render_mode: RenderMode::Euclidian,
        manifestation: Manifestation::Wireframe,
        dfd,
    }
}

fn triangle() -> Vec<[f64; 3]> {
    vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]
}

// ── Technical board ──────────────────────────────────────────────────────

#[test]
fn board_offsets_points_to_centre() {
    let svg = technical_board_svg(&blueprint(triangle())).unwrap();
    assert!(svg.contains(r#"width="800" height="600""#));
    assert!(svg.contains(r#"points="400.00,300.00 410.00,300.00 400.00,310.00""#));
}

#[test]
fn board_labels_id_domain_and_score() {
    let svg = technical_board_svg(&blueprint(triangle())).unwrap();
    assert!(svg.contains("ID: ISO-1A2B3C4D"));
    assert!(svg.contains("DOMAIN: AUTO | UNIT: mm"));
    assert!(svg.contains("RECOVERY SCORE: 0.1235"));
}

#[test]
fn board_rejects_empty_geometry() {
    assert_eq!(
        technical_board_svg(&blueprint(Vec::new())).unwrap_err(),
        ExportError::NoPoints {
            id: "ISO-1A2B3C4D".to_string()
        }
    );
}

#[test]
fn board_rejects_non_finite_geometry() {
    let err = technical_board_svg(&blueprint(vec![[f64::NAN, 0.0, 0.0]])).unwrap_err();
    assert!(matches!(err, ExportError::NonFinite { .. }));
}

// ── Exploded view ────────────────────────────────────────────────────────

#[test]
fn dfd_explodes_along_instance_direction() {
    let inst = instance_at([0.0, 20.0, 0.0], DisassemblyData::default());
    let svg = dfd_svg(&inst, &blueprint(triangle())).unwrap();
    // (0,0,0) pushed 50 up, scaled by 5: y = 300 - 250.
    assert!(svg.contains("M 400.00 50.00"));
    assert!(svg.contains(r#"x1="400.00" y1="300.00" x2="400.00" y2="50.00""#));
    assert!(svg.contains(r#"stroke-dasharray="5,5""#));
    assert!(svg.contains(" Z\""));
}

#[test]
fn dfd_at_origin_is_not_exploded() {
    let inst = instance_at([0.0, 0.0, 0.0], DisassemblyData::default());
    let svg = dfd_svg(&inst, &blueprint(triangle())).unwrap();
    assert!(svg.contains("M 400.00 300.00 L 450.00 300.00 L 400.00 250.00 Z"));
}

#[test]
fn dfd_lists_tool_type_and_recyclability() {
    let dfd = DisassemblyData::for_connection(ConnectionType::Welded);
    let inst = instance_at([1.0, 0.0, 0.0], dfd.clone());
    let svg = dfd_svg(&inst, &blueprint(triangle())).unwrap();
    assert!(svg.contains(&format!("TOOL: {}", dfd.disassembly_tool.to_uppercase())));
    assert!(svg.contains("TYPE: WELDED"));
    assert!(svg.contains("RECYCLABILITY: 30%"));
    assert!(svg.contains(&format!("COMPONENT ID: {}", inst.id)));
    assert!(svg.contains("1. Release"));
}

#[test]
fn dfd_escapes_free_text() {
    let mut dfd = DisassemblyData::default();
    dfd.steps = vec!["Pry <gently> & lift".to_string()];
    let inst = instance_at([1.0, 0.0, 0.0], dfd);
    let svg = dfd_svg(&inst, &blueprint(triangle())).unwrap();
    assert!(svg.contains("Pry &lt;gently&gt; &amp; lift"));
}

#[test]
fn dfd_rejects_empty_blueprint() {
    let inst = instance_at([1.0, 0.0, 0.0], DisassemblyData::default());
    assert!(matches!(
        dfd_svg(&inst, &blueprint(Vec::new())),
        Err(ExportError::NoPoints { .. })
    ));
}

// ── Manifest ─────────────────────────────────────────────────────────────

#[test]
fn manifest_has_format_header() {
    let objects = vec![blueprint(triangle())];
    let json = stock_manifest(&objects, &ExportMetadata::new("Workshop")).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["format"], MANIFEST_FORMAT);
    assert_eq!(value["version"], MANIFEST_VERSION);
    assert_eq!(value["metadata"]["name"], "Workshop");
    assert!(value["metadata"]["exported"].is_string());
    assert_eq!(value["objects"][0]["id"], "ISO-1A2B3C4D");
    assert_eq!(value["objects"][0]["domain"], "AUTO");
    assert_eq!(value["objects"][0]["status"]["type"], "Committed");
}

#[test]
fn manifest_is_pretty_printed() {
    let json = stock_manifest(&[], &ExportMetadata::new("Empty")).unwrap();
    assert!(json.contains('\n'));
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["objects"].as_array().map(Vec::len), Some(0));
}
