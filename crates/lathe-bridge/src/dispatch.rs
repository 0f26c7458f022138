use draft_engine::{AddOutcome, CommitOutcome, ProposalOutcome, SessionError};
use stock_export::{dfd_svg, stock_manifest, technical_board_svg, ExportMetadata};
use tracing::{debug, info};

use crate::messages::{EngineToUi, ExportKind, SessionSnapshot, UiToEngine};
use crate::state::{BridgeError, BridgeState};

/// Dispatch a UI message and return the response.
///
/// Never panics. Errors become [`EngineToUi::Error`]; expected no-ops such as
/// stale assistant responses or missing blueprints get their own variants.
pub fn dispatch(state: &mut BridgeState, msg: UiToEngine) -> EngineToUi {
    match handle_message(state, msg) {
        Ok(response) => response,
        Err(BridgeError::StaleResponse { generation }) => EngineToUi::Stale { generation },
        Err(BridgeError::Session(SessionError::BlueprintNotFound { id })) => {
            EngineToUi::NotFound { id }
        }
        Err(BridgeError::Session(SessionError::InstanceNotFound { id })) => EngineToUi::NotFound {
            id: id.to_string(),
        },
        Err(e) => EngineToUi::Error {
            message: e.to_string(),
        },
    }
}

/// Parse a JSON message, dispatch it and serialize the response.
pub fn process_json(state: &mut BridgeState, json_input: &str) -> String {
    let response = match serde_json::from_str::<UiToEngine>(json_input) {
        Ok(msg) => dispatch(state, msg),
        Err(e) => EngineToUi::Error {
            message: format!("Failed to parse message: {}", e),
        },
    };
    to_json(&response)
}

pub(crate) fn to_json(response: &EngineToUi) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}"}}"#,
            e.to_string().replace('"', "'")
        )
    })
}

fn handle_message(state: &mut BridgeState, msg: UiToEngine) -> Result<EngineToUi, BridgeError> {
    match msg {
        // -- Drafting --
        UiToEngine::SelectDomain { domain } => {
            state.select_domain(domain);
            Ok(state_updated(state))
        }

        UiToEngine::AddPoint { point } => {
            let response = match state.session.add_point(point.into()) {
                AddOutcome::DomainRequired { suggested } => EngineToUi::DomainRequired { suggested },
                AddOutcome::Ignored | AddOutcome::Rejected => EngineToUi::PointIgnored,
                AddOutcome::Added { index, point } => EngineToUi::PointAdded {
                    index,
                    point,
                    closed: false,
                },
                AddOutcome::Closed { index, point } => EngineToUi::PointAdded {
                    index,
                    point,
                    closed: true,
                },
            };
            Ok(response)
        }

        UiToEngine::ContinueDrawing => {
            state.session.continue_drawing();
            Ok(state_updated(state))
        }

        UiToEngine::Commit { domain, unit_scale } => {
            let response = match state.commit(domain, unit_scale)? {
                CommitOutcome::Materialized { id } => EngineToUi::Committed {
                    id,
                    promoted: false,
                    state: SessionSnapshot::of(&state.session),
                },
                CommitOutcome::Promoted { id } => EngineToUi::Committed {
                    id,
                    promoted: true,
                    state: SessionSnapshot::of(&state.session),
                },
                CommitOutcome::NothingToCommit => EngineToUi::NothingToCommit,
            };
            Ok(response)
        }

        UiToEngine::Undo => {
            state.session.undo();
            Ok(state_updated(state))
        }

        UiToEngine::Purge { scope } => {
            state.purge(scope);
            Ok(state_updated(state))
        }

        // -- Settings --
        UiToEngine::SetLayer { layer } => {
            state.session.set_layer(layer);
            Ok(state_updated(state))
        }

        UiToEngine::SetPrecisionLines { enabled } => {
            state.session.set_precision_lines(enabled);
            Ok(state_updated(state))
        }

        UiToEngine::SetMode { mode } => {
            state.session.set_mode(mode);
            Ok(state_updated(state))
        }

        UiToEngine::SetManifestation { manifestation } => {
            state.session.set_manifestation(manifestation);
            Ok(state_updated(state))
        }

        UiToEngine::SetRenderMode { render_mode } => {
            state.session.set_render_mode(render_mode);
            Ok(state_updated(state))
        }

        UiToEngine::SetRevolutionAngle { degrees } => {
            state.session.set_revolution_angle(degrees);
            Ok(state_updated(state))
        }

        // -- Stock and assembly --
        UiToEngine::Deploy {
            blueprint_id,
            position,
        } => Ok(match state.session.deploy(&blueprint_id, position) {
            Some(instance_id) => EngineToUi::Deployed { instance_id },
            None => EngineToUi::NotFound { id: blueprint_id },
        }),

        UiToEngine::RemoveBlueprint { id } => {
            state.session.remove_blueprint(&id)?;
            Ok(state_updated(state))
        }

        UiToEngine::RemoveInstance { id } => {
            state.session.remove_instance(id)?;
            Ok(state_updated(state))
        }

        UiToEngine::RejectProposal => {
            state.session.reject_proposal();
            Ok(state_updated(state))
        }

        // -- Assistant --
        UiToEngine::BeginAssistant => {
            let generation = state.assistant.begin()?;
            Ok(EngineToUi::AssistantStarted {
                generation,
                radius: state.session.active_radius(),
            })
        }

        UiToEngine::CompleteAssistant { generation, token } => {
            state.assistant.complete(generation)?;
            let radius = state.session.active_radius();
            let Some(object) = state.neuro.transmute(&token, radius) else {
                return Ok(EngineToUi::ProposalIgnored {
                    reason: "token produced no geometry".to_string(),
                });
            };
            match state.session.receive_proposal(object) {
                ProposalOutcome::Staged { id } => {
                    info!(%id, generation, "assistant proposal staged");
                    Ok(EngineToUi::ProposalStaged {
                        id,
                        state: SessionSnapshot::of(&state.session),
                    })
                }
                ProposalOutcome::AlreadyCommitted { id } => Ok(EngineToUi::ProposalIgnored {
                    reason: format!("{} is already committed", id),
                }),
                ProposalOutcome::NotAGhost { id } => Ok(EngineToUi::ProposalIgnored {
                    reason: format!("{} is not a proposal", id),
                }),
            }
        }

        UiToEngine::FailAssistant {
            generation,
            message,
        } => {
            state.fail_assistant(generation, &message)?;
            Ok(state_updated(state))
        }

        // -- Queries --
        UiToEngine::GetState => Ok(state_updated(state)),

        UiToEngine::LathePreview { id } => {
            let mesh = state.session.lathe_preview(&id)?;
            Ok(EngineToUi::MeshReady { id, mesh })
        }

        UiToEngine::DraftOutline { segments } => Ok(EngineToUi::Outline {
            points: state
                .session
                .draft_outline(segments)
                .iter()
                .map(|p| p.to_array())
                .collect(),
        }),

        UiToEngine::InstanceRecoverability { id } => {
            let score = state.session.instance_recoverability(id)?;
            Ok(EngineToUi::Recoverability {
                instance_id: id,
                score,
            })
        }

        // -- Export --
        UiToEngine::ExportBoard { id } => {
            let object = state
                .session
                .blueprint(&id)
                .ok_or_else(|| SessionError::BlueprintNotFound { id: id.clone() })?;
            Ok(EngineToUi::ExportReady {
                kind: ExportKind::TechnicalBoard,
                data: technical_board_svg(object)?,
            })
        }

        UiToEngine::ExportDisassembly { instance_id } => {
            let instance = state
                .session
                .instance(instance_id)
                .ok_or(SessionError::InstanceNotFound { id: instance_id })?;
            let blueprint = state.session.blueprint(&instance.blueprint_id).ok_or_else(|| {
                SessionError::BlueprintNotFound {
                    id: instance.blueprint_id.clone(),
                }
            })?;
            Ok(EngineToUi::ExportReady {
                kind: ExportKind::Disassembly,
                data: dfd_svg(instance, blueprint)?,
            })
        }

        UiToEngine::ExportManifest { name } => {
            state.project_name = name;
            let metadata = ExportMetadata::new(state.project_name.clone());
            let data = stock_manifest(state.session.stock(), &metadata)?;
            debug!(bytes = data.len(), "manifest export ready");
            Ok(EngineToUi::ExportReady {
                kind: ExportKind::Manifest,
                data,
            })
        }
    }
}

fn state_updated(state: &BridgeState) -> EngineToUi {
    EngineToUi::StateUpdated {
        state: SessionSnapshot::of(&state.session),
    }
}
