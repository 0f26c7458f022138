use draft_engine::{DraftPhase, PurgeScope, Workflow};
use lathe_bridge::*;
use lathe_types::*;
use serde_json::{json, Value};

// ── Helper functions ─────────────────────────────────────────────────────

fn ready_state() -> BridgeState {
    let mut state = BridgeState::new();
    dispatch(&mut state, UiToEngine::SelectDomain { domain: Domain::Bim });
    dispatch(&mut state, UiToEngine::SetPrecisionLines { enabled: false });
    state
}

fn draw_face(state: &mut BridgeState) {
    for point in [
        [0.0, 0.0, 10.0],
        [10.0, 0.0, 0.0],
        [0.0, 0.0, -10.0],
        [0.0, 0.0, 9.5],
    ] {
        dispatch(state, UiToEngine::AddPoint { point });
    }
}

fn commit_face(state: &mut BridgeState) -> String {
    draw_face(state);
    match dispatch(
        state,
        UiToEngine::Commit {
            domain: Domain::Bim,
            unit_scale: UnitScale::Meters,
        },
    ) {
        EngineToUi::Committed { id, promoted, .. } => {
            assert!(!promoted);
            id
        }
        other => panic!("expected Committed, got {:?}", other),
    }
}

fn lattice_token() -> Value {
    json!({
        "action": "DRAW_OBJECT",
        "payload": {
            "generatorCall": { "function": "generateLattice", "params": { "resolution": 3 } },
            "baseLayer": 20
        }
    })
}

fn begin(state: &mut BridgeState) -> u64 {
    match dispatch(state, UiToEngine::BeginAssistant) {
        EngineToUi::AssistantStarted { generation, .. } => generation,
        other => panic!("expected AssistantStarted, got {:?}", other),
    }
}

// ── Message format ───────────────────────────────────────────────────────

#[test]
fn messages_are_tagged_by_type() {
    let json = serde_json::to_value(UiToEngine::Undo).unwrap();
    assert_eq!(json, json!({ "type": "Undo" }));

    let msg: UiToEngine =
        serde_json::from_str(r#"{"type":"Commit","domain":"CHIP","unit_scale":"Micrometer"}"#)
            .unwrap();
    assert!(matches!(
        msg,
        UiToEngine::Commit {
            domain: Domain::Chip,
            unit_scale: UnitScale::Micrometer
        }
    ));
}

#[test]
fn purge_scope_defaults_to_draft() {
    let msg: UiToEngine = serde_json::from_str(r#"{"type":"Purge"}"#).unwrap();
    assert!(matches!(
        msg,
        UiToEngine::Purge {
            scope: PurgeScope::Draft
        }
    ));
}

#[test]
fn malformed_json_yields_error_response() {
    let mut state = BridgeState::new();
    let out: Value = serde_json::from_str(&process_json(&mut state, "{nope")).unwrap();
    assert_eq!(out["type"], "Error");
    let out: Value =
        serde_json::from_str(&process_json(&mut state, r#"{"type":"Teleport"}"#)).unwrap();
    assert_eq!(out["type"], "Error");
}

#[test]
fn json_round_trip_through_process_json() {
    let mut state = BridgeState::new();
    let out = process_json(&mut state, r#"{"type":"AddPoint","point":[1.0,0.0,0.0]}"#);
    let out: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(out["type"], "DomainRequired");
    assert_eq!(out["suggested"], "CHIP");
}

// ── Drafting ─────────────────────────────────────────────────────────────

#[test]
fn add_point_reports_closure() {
    let mut state = ready_state();
    let mut last = None;
    for point in [
        [0.0, 0.0, 10.0],
        [10.0, 0.0, 0.0],
        [0.0, 0.0, -10.0],
        [0.0, 0.0, 9.5],
    ] {
        last = Some(dispatch(&mut state, UiToEngine::AddPoint { point }));
    }
    assert!(matches!(
        last,
        Some(EngineToUi::PointAdded {
            index: 3,
            closed: true,
            ..
        })
    ));
    assert!(matches!(
        dispatch(&mut state, UiToEngine::AddPoint { point: [1.0, 1.0, 1.0] }),
        EngineToUi::PointIgnored
    ));
}

#[test]
fn commit_materializes_blueprint() {
    let mut state = ready_state();
    let id = commit_face(&mut state);
    assert!(id.starts_with("ISO-"));
    assert_eq!(state.session.stock().len(), 1);
    assert_eq!(state.session.phase(), DraftPhase::Idle);
}

#[test]
fn empty_commit_is_reported() {
    let mut state = ready_state();
    assert!(matches!(
        dispatch(
            &mut state,
            UiToEngine::Commit {
                domain: Domain::Bim,
                unit_scale: UnitScale::Meters
            }
        ),
        EngineToUi::NothingToCommit
    ));
}

#[test]
fn settings_show_up_in_snapshot() {
    let mut state = ready_state();
    dispatch(&mut state, UiToEngine::SetLayer { layer: 10.0 });
    dispatch(&mut state, UiToEngine::SetRevolutionAngle { degrees: 90.0 });
    dispatch(&mut state, UiToEngine::SetMode { mode: AppMode::Assembly });
    let EngineToUi::StateUpdated { state: snap } = dispatch(&mut state, UiToEngine::GetState)
    else {
        panic!("expected snapshot");
    };
    assert_eq!(snap.layer, 10.0);
    assert_eq!(snap.active_radius, 25.0);
    assert_eq!(snap.revolution_angle, 90.0);
    assert_eq!(snap.mode, AppMode::Assembly);
    assert_eq!(snap.domain, Some(Domain::Bim));
}

#[test]
fn continue_and_undo_update_snapshot() {
    let mut state = ready_state();
    draw_face(&mut state);
    let EngineToUi::StateUpdated { state: snap } =
        dispatch(&mut state, UiToEngine::ContinueDrawing)
    else {
        panic!("expected snapshot");
    };
    assert_eq!(snap.faces.len(), 1);
    assert!(snap.points.is_empty());

    dispatch(&mut state, UiToEngine::AddPoint { point: [1.0, 0.0, 0.0] });
    let EngineToUi::StateUpdated { state: snap } = dispatch(&mut state, UiToEngine::Undo) else {
        panic!("expected snapshot");
    };
    assert!(snap.points.is_empty());
    assert_eq!(snap.faces.len(), 1);
}

// ── Assistant ────────────────────────────────────────────────────────────

#[test]
fn assistant_proposal_then_approval() {
    let mut state = ready_state();
    let generation = begin(&mut state);

    let staged = dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation,
            token: lattice_token(),
        },
    );
    let EngineToUi::ProposalStaged { id, state: snap } = staged else {
        panic!("expected ProposalStaged");
    };
    assert!(id.starts_with("NEURO-"));
    assert_eq!(snap.stock.len(), 1);
    assert!(snap.stock[0].is_ghost());
    assert_eq!(snap.stock[0].points.len(), 9);
    assert_eq!(
        snap.workflow,
        Workflow::Stabilizing {
            pending_id: id.clone()
        }
    );

    let committed = dispatch(
        &mut state,
        UiToEngine::Commit {
            domain: Domain::Auto,
            unit_scale: UnitScale::IsoMetrical,
        },
    );
    assert!(matches!(
        committed,
        EngineToUi::Committed { id: ref cid, promoted: true, .. } if *cid == id
    ));
    assert!(!state.session.stock()[0].is_ghost());
}

#[test]
fn proposal_uses_active_radius() {
    let mut state = ready_state();
    dispatch(&mut state, UiToEngine::SetLayer { layer: 4.0 });
    let generation = begin(&mut state);
    let token = json!({
        "action": "DRAW_OBJECT",
        "payload": { "points": [{ "theta": 0.0, "phi": 0.0 }] }
    });
    dispatch(&mut state, UiToEngine::CompleteAssistant { generation, token });
    let y = state.session.stock()[0].points[0][1];
    assert!((y - 10.0).abs() < 1e-9);
}

#[test]
fn second_request_while_busy_is_refused() {
    let mut state = ready_state();
    begin(&mut state);
    match dispatch(&mut state, UiToEngine::BeginAssistant) {
        EngineToUi::Error { message } => assert!(message.contains("in flight")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn commit_makes_in_flight_response_stale() {
    let mut state = ready_state();
    let generation = begin(&mut state);
    commit_face(&mut state);

    let late = dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation,
            token: lattice_token(),
        },
    );
    assert!(matches!(late, EngineToUi::Stale { generation: g } if g == generation));
    assert_eq!(state.session.stock().len(), 1);
    assert!(!state.session.stock()[0].is_ghost());

    let next = begin(&mut state);
    assert!(next > generation);
}

#[test]
fn purge_and_domain_change_invalidate() {
    let mut state = ready_state();
    begin(&mut state);
    dispatch(
        &mut state,
        UiToEngine::Purge {
            scope: PurgeScope::Draft,
        },
    );
    assert!(!state.assistant.is_busy());

    begin(&mut state);
    dispatch(&mut state, UiToEngine::SelectDomain { domain: Domain::Bim });
    assert!(state.assistant.is_busy());
    dispatch(&mut state, UiToEngine::SelectDomain { domain: Domain::Chip });
    assert!(!state.assistant.is_busy());
}

#[test]
fn empty_token_is_ignored_not_an_error() {
    let mut state = ready_state();
    let generation = begin(&mut state);
    let out = dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation,
            token: json!({ "action": "TECHNICAL_ADVICE" }),
        },
    );
    assert!(matches!(out, EngineToUi::ProposalIgnored { .. }));
    assert!(state.session.stock().is_empty());
    assert!(!state.assistant.is_busy());
}

#[test]
fn failed_request_frees_the_gate() {
    let mut state = ready_state();
    let generation = begin(&mut state);
    dispatch(
        &mut state,
        UiToEngine::FailAssistant {
            generation,
            message: "network down".to_string(),
        },
    );
    assert!(!state.assistant.is_busy());
}

#[test]
fn resubmitted_committed_geometry_is_ignored() {
    let mut state = ready_state();
    let g = begin(&mut state);
    dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation: g,
            token: lattice_token(),
        },
    );
    dispatch(
        &mut state,
        UiToEngine::Commit {
            domain: Domain::Bim,
            unit_scale: UnitScale::Meters,
        },
    );
    let g = begin(&mut state);
    let out = dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation: g,
            token: lattice_token(),
        },
    );
    assert!(matches!(out, EngineToUi::ProposalIgnored { .. }));
    assert_eq!(state.session.stock().len(), 1);
}

#[test]
fn reject_proposal_removes_ghost() {
    let mut state = ready_state();
    let generation = begin(&mut state);
    dispatch(
        &mut state,
        UiToEngine::CompleteAssistant {
            generation,
            token: lattice_token(),
        },
    );
    let EngineToUi::StateUpdated { state: snap } =
        dispatch(&mut state, UiToEngine::RejectProposal)
    else {
        panic!("expected snapshot");
    };
    assert!(snap.stock.is_empty());
    assert_eq!(snap.workflow, Workflow::Manual);
}

#[test]
fn gate_generations_increase() {
    let mut gate = AssistantGate::new();
    let a = gate.begin().unwrap();
    assert_eq!(gate.begin(), Err(BridgeError::AssistantBusy { generation: a }));
    gate.complete(a).unwrap();
    assert_eq!(
        gate.complete(a),
        Err(BridgeError::StaleResponse { generation: a })
    );
    let b = gate.begin().unwrap();
    assert_eq!(b, a + 1);
    gate.invalidate();
    assert_eq!(gate.in_flight(), None);
}

// ── Stock, assembly and queries ──────────────────────────────────────────

#[test]
fn deploy_and_score_instance() {
    let mut state = ready_state();
    let id = commit_face(&mut state);
    let EngineToUi::Deployed { instance_id } = dispatch(
        &mut state,
        UiToEngine::Deploy {
            blueprint_id: id,
            position: [0.0, 0.0, 30.0],
        },
    ) else {
        panic!("expected Deployed");
    };
    match dispatch(&mut state, UiToEngine::InstanceRecoverability { id: instance_id }) {
        EngineToUi::Recoverability { score, .. } => assert!((score - 1.0).abs() < 1e-12),
        other => panic!("expected Recoverability, got {:?}", other),
    }
}

#[test]
fn missing_references_are_not_found() {
    let mut state = ready_state();
    assert!(matches!(
        dispatch(
            &mut state,
            UiToEngine::Deploy {
                blueprint_id: "ISO-GONE0000".to_string(),
                position: [0.0, 0.0, 0.0]
            }
        ),
        EngineToUi::NotFound { .. }
    ));
    assert!(matches!(
        dispatch(&mut state, UiToEngine::LathePreview { id: "x".to_string() }),
        EngineToUi::NotFound { .. }
    ));
    assert!(matches!(
        dispatch(
            &mut state,
            UiToEngine::RemoveInstance {
                id: uuid::Uuid::new_v4()
            }
        ),
        EngineToUi::NotFound { .. }
    ));
}

#[test]
fn lathe_preview_returns_mesh() {
    let mut state = ready_state();
    let id = commit_face(&mut state);
    match dispatch(&mut state, UiToEngine::LathePreview { id }) {
        EngineToUi::MeshReady { mesh, .. } => {
            assert_eq!(mesh.vertex_count(), 65 * 4);
            assert_eq!(mesh.normals.len(), mesh.vertices.len());
        }
        other => panic!("expected MeshReady, got {:?}", other),
    }
}

#[test]
fn draft_outline_query() {
    let mut state = ready_state();
    dispatch(&mut state, UiToEngine::AddPoint { point: [10.0, 0.0, 0.0] });
    dispatch(&mut state, UiToEngine::AddPoint { point: [0.0, 10.0, 0.0] });
    match dispatch(&mut state, UiToEngine::DraftOutline { segments: 4 }) {
        EngineToUi::Outline { points } => assert_eq!(points.len(), 5),
        other => panic!("expected Outline, got {:?}", other),
    }
}

#[test]
fn oversized_outline_request_is_clamped() {
    let mut state = ready_state();
    dispatch(&mut state, UiToEngine::AddPoint { point: [10.0, 0.0, 0.0] });
    dispatch(&mut state, UiToEngine::AddPoint { point: [0.0, 10.0, 0.0] });
    let max = state.session.config.draft.max_outline_segments;
    let msg = json!({ "type": "DraftOutline", "segments": u64::MAX }).to_string();
    let reply: Value = serde_json::from_str(&process_json(&mut state, &msg)).unwrap();
    assert_eq!(reply["type"], "Outline");
    assert_eq!(reply["points"].as_array().unwrap().len(), max + 1);
}

// ── Export ───────────────────────────────────────────────────────────────

#[test]
fn exports_produce_documents() {
    let mut state = ready_state();
    let id = commit_face(&mut state);

    match dispatch(&mut state, UiToEngine::ExportBoard { id: id.clone() }) {
        EngineToUi::ExportReady { kind, data } => {
            assert_eq!(kind, ExportKind::TechnicalBoard);
            assert!(data.starts_with("<svg"));
            assert!(data.contains(&id));
        }
        other => panic!("expected ExportReady, got {:?}", other),
    }

    let EngineToUi::Deployed { instance_id } = dispatch(
        &mut state,
        UiToEngine::Deploy {
            blueprint_id: id.clone(),
            position: [0.0, 5.0, 0.0],
        },
    ) else {
        panic!("expected Deployed");
    };
    match dispatch(&mut state, UiToEngine::ExportDisassembly { instance_id }) {
        EngineToUi::ExportReady { kind, data } => {
            assert_eq!(kind, ExportKind::Disassembly);
            assert!(data.contains("DISASSEMBLY PROTOCOL"));
        }
        other => panic!("expected ExportReady, got {:?}", other),
    }

    match dispatch(
        &mut state,
        UiToEngine::ExportManifest {
            name: "Workshop".to_string(),
        },
    ) {
        EngineToUi::ExportReady { kind, data } => {
            assert_eq!(kind, ExportKind::Manifest);
            let value: Value = serde_json::from_str(&data).unwrap();
            assert_eq!(value["format"], "lathe-stock");
            assert_eq!(value["objects"][0]["id"], Value::String(id));
        }
        other => panic!("expected ExportReady, got {:?}", other),
    }
    assert_eq!(state.project_name, "Workshop");
}

#[test]
fn disassembly_export_of_dangling_instance_is_not_found() {
    let mut state = ready_state();
    let id = commit_face(&mut state);
    let EngineToUi::Deployed { instance_id } = dispatch(
        &mut state,
        UiToEngine::Deploy {
            blueprint_id: id.clone(),
            position: [0.0, 5.0, 0.0],
        },
    ) else {
        panic!("expected Deployed");
    };
    dispatch(&mut state, UiToEngine::RemoveBlueprint { id });
    assert!(matches!(
        dispatch(&mut state, UiToEngine::ExportDisassembly { instance_id }),
        EngineToUi::NotFound { .. }
    ));
}
