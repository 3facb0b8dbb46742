//! End-to-end workflow properties, driven through the dispatcher.

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use delve_core::enums::{ResearchPhase, SubquestionStatus};
use delve_core::errors::WorkflowError;
use delve_core::inputs::{DispatchRequest, FindingInput, PhaseInput};
use delve_core::responses::StepResponse;
use delve_engine::{Dispatcher, PhaseEngine, SessionStore};

#[fixture]
fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(SessionStore::new()), PhaseEngine::default())
}

fn finding(url: &str) -> FindingInput {
    FindingInput {
        url: url.to_string(),
        title: "Source".into(),
        content: "Extracted content".into(),
        relevance_note: "Relevant".into(),
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn step(d: &Dispatcher, session_id: &str, input: PhaseInput) -> Result<StepResponse, WorkflowError> {
    d.dispatch(DispatchRequest::advance(session_id, input))
}

fn start(d: &Dispatcher) -> String {
    d.dispatch(DispatchRequest::start("impact of AI in healthcare"))
        .unwrap()
        .session_id
}

fn to_decomposition(d: &Dispatcher) -> String {
    let id = start(d);
    step(
        d,
        &id,
        PhaseInput::Elaborate {
            elaboration: "Clinical and operational impact, 2018 onward".into(),
        },
    )
    .unwrap();
    id
}

fn to_research(d: &Dispatcher) -> String {
    let id = to_decomposition(d);
    step(
        d,
        &id,
        PhaseInput::Decompose {
            subquestions: texts(&["A", "B", "C"]),
        },
    )
    .unwrap();
    id
}

/// One representative input per operation.
fn every_input() -> Vec<PhaseInput> {
    vec![
        PhaseInput::Elaborate {
            elaboration: "e".into(),
        },
        PhaseInput::Decompose {
            subquestions: texts(&["x", "y", "z"]),
        },
        PhaseInput::RecordFindings {
            subquestion_index: 0,
            findings: vec![finding("https://a.example")],
        },
        PhaseInput::Synthesize {
            synthesis: "s".into(),
        },
        PhaseInput::FinalizeReport { report: "r".into() },
        PhaseInput::Abandon { reason: "stop".into() },
        PhaseInput::Status,
    ]
}

#[rstest]
fn full_round_trip_completes(dispatcher: Dispatcher) {
    let id = to_research(&dispatcher);
    for index in 0..3 {
        step(
            &dispatcher,
            &id,
            PhaseInput::RecordFindings {
                subquestion_index: index,
                findings: vec![finding(&format!("https://{index}.example"))],
            },
        )
        .unwrap();
    }
    step(
        &dispatcher,
        &id,
        PhaseInput::Synthesize {
            synthesis: "Synthesis".into(),
        },
    )
    .unwrap();
    let done = step(&dispatcher, &id, PhaseInput::FinalizeReport { report: "R".into() }).unwrap();

    assert_eq!(done.phase, ResearchPhase::Complete);
    let session = dispatcher.store().get(&id).unwrap();
    assert_eq!(session.report.as_deref(), Some("R"));
    assert_eq!(session.subquestions.len(), 3);
    assert!(
        session
            .subquestions
            .iter()
            .all(|sq| sq.status == SubquestionStatus::Researched)
    );
}

#[rstest]
fn record_findings_on_fresh_session_is_invalid_phase(dispatcher: Dispatcher) {
    let opened = dispatcher
        .dispatch(DispatchRequest::start("impact of AI in healthcare"))
        .unwrap();
    assert_eq!(opened.phase, ResearchPhase::Elaboration);

    let err = step(
        &dispatcher,
        &opened.session_id,
        PhaseInput::RecordFindings {
            subquestion_index: 0,
            findings: Vec::new(),
        },
    )
    .unwrap_err();

    let WorkflowError::InvalidPhase {
        current, expected, ..
    } = err
    else {
        panic!("expected InvalidPhase, got {err:?}");
    };
    assert_eq!(current, ResearchPhase::Elaboration);
    assert_eq!(expected, vec![ResearchPhase::Research]);
}

#[rstest]
#[case::too_few(&["A", "B"])]
#[case::too_many(&["A", "B", "C", "D", "E", "F"])]
#[case::empty_list(&[])]
#[case::blank_entry(&["A", "", "C"])]
#[case::whitespace_entry(&["A", "B", "  \t"])]
#[case::exact_duplicate(&["A", "B", "A"])]
#[case::case_duplicate(&["Alpha", "beta", "ALPHA"])]
fn invalid_decompositions_leave_session_in_decomposition(
    dispatcher: Dispatcher,
    #[case] items: &[&str],
) {
    let id = to_decomposition(&dispatcher);

    let err = step(
        &dispatcher,
        &id,
        PhaseInput::Decompose {
            subquestions: texts(items),
        },
    )
    .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation { .. }), "{err:?}");
    let session = dispatcher.store().get(&id).unwrap();
    assert_eq!(session.phase, ResearchPhase::Decomposition);
    assert!(session.subquestions.is_empty());
}

#[rstest]
fn second_record_for_same_index_is_already_researched(dispatcher: Dispatcher) {
    let id = to_research(&dispatcher);
    let first = PhaseInput::RecordFindings {
        subquestion_index: 1,
        findings: vec![finding("https://first.example")],
    };
    step(&dispatcher, &id, first).unwrap();
    let findings_before = dispatcher.store().get(&id).unwrap().findings;

    let err = step(
        &dispatcher,
        &id,
        PhaseInput::RecordFindings {
            subquestion_index: 1,
            findings: vec![finding("https://second.example")],
        },
    )
    .unwrap_err();

    assert_eq!(err, WorkflowError::AlreadyResearched { index: 1 });
    assert_eq!(dispatcher.store().get(&id).unwrap().findings, findings_before);
}

#[rstest]
#[case(&[0, 1, 2])]
#[case(&[2, 1, 0])]
#[case(&[1, 0, 2])]
#[case(&[2, 0, 1])]
fn synthesis_follows_last_researched_in_any_order(
    dispatcher: Dispatcher,
    #[case] order: &[usize],
) {
    let id = to_research(&dispatcher);
    let mut phases = Vec::new();
    for &index in order {
        let response = step(
            &dispatcher,
            &id,
            PhaseInput::RecordFindings {
                subquestion_index: index,
                findings: Vec::new(),
            },
        )
        .unwrap();
        phases.push(response.phase);
    }

    assert_eq!(
        phases,
        vec![
            ResearchPhase::Research,
            ResearchPhase::Research,
            ResearchPhase::Synthesis
        ]
    );
}

#[rstest]
fn abandon_then_only_status_succeeds(dispatcher: Dispatcher) {
    let id = to_research(&dispatcher);
    let abandoned = step(
        &dispatcher,
        &id,
        PhaseInput::Abandon {
            reason: "no sources".into(),
        },
    )
    .unwrap();
    assert_eq!(abandoned.phase, ResearchPhase::Failed);

    for input in every_input() {
        let is_status = matches!(input, PhaseInput::Status);
        let result = step(&dispatcher, &id, input);
        if is_status {
            assert_eq!(result.unwrap().phase, ResearchPhase::Failed);
        } else {
            assert!(
                matches!(result, Err(WorkflowError::InvalidPhase { current: ResearchPhase::Failed, .. })),
                "{result:?}"
            );
        }
    }
}

/// Drive sessions through every operation in every reachable phase and check
/// each observed phase change is an allowed transition.
#[rstest]
fn only_allowed_transitions_are_reachable(dispatcher: Dispatcher) {
    let setups: [fn(&Dispatcher) -> String; 3] = [start, to_decomposition, to_research];

    for setup in setups {
        for input in every_input() {
            let id = setup(&dispatcher);
            let before = dispatcher.store().get(&id).unwrap().phase;
            let result = step(&dispatcher, &id, input);
            let after = dispatcher.store().get(&id).unwrap().phase;

            if result.is_err() {
                assert_eq!(before, after, "failed call changed phase");
            } else if before != after {
                assert!(
                    before.can_transition_to(after),
                    "illegal transition {before} -> {after}"
                );
            }
        }
    }
}

#[rstest]
fn concurrent_sessions_progress_independently(dispatcher: Dispatcher) {
    let ids: Vec<String> = (0..6).map(|_| to_research(&dispatcher)).collect();

    thread::scope(|scope| {
        for id in &ids {
            let dispatcher = &dispatcher;
            scope.spawn(move || {
                for index in 0..3 {
                    step(
                        dispatcher,
                        id,
                        PhaseInput::RecordFindings {
                            subquestion_index: index,
                            findings: vec![finding("https://x.example")],
                        },
                    )
                    .unwrap();
                }
            });
        }
    });

    for id in &ids {
        let session = dispatcher.store().get(id).unwrap();
        assert_eq!(session.phase, ResearchPhase::Synthesis);
        assert_eq!(session.total_findings(), 3);
    }
}

#[rstest]
fn racing_records_for_one_index_accept_exactly_one(dispatcher: Dispatcher) {
    let id = to_research(&dispatcher);

    let outcomes: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let dispatcher = &dispatcher;
                let id = &id;
                scope.spawn(move || {
                    step(
                        dispatcher,
                        id,
                        PhaseInput::RecordFindings {
                            subquestion_index: 0,
                            findings: vec![finding(&format!("https://{n}.example"))],
                        },
                    )
                    .is_ok()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let session = dispatcher.store().get(&id).unwrap();
    assert_eq!(session.findings_for(0).len(), 1);
}
