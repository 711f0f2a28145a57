use super::*;

#[test]
fn new_projects_start_in_design() {
    let lifecycle = ProjectLifecycle::new();
    assert_eq!(lifecycle.stage(), Stage::Design);
    assert_eq!(lifecycle.panel(), StagePanel::Design);
    assert_eq!(lifecycle.enabled_transitions(), &[Stage::Production]);
}

#[test]
fn only_neighbouring_stages_are_reachable() {
    for from in Stage::ALL {
        for to in Stage::ALL {
            let mut lifecycle = ProjectLifecycle::at(from);
            let adjacent = from.index().abs_diff(to.index()) == 1;
            let result = lifecycle.transition(to);
            if adjacent {
                assert_eq!(result, Ok(from), "{from:?} -> {to:?}");
                assert_eq!(lifecycle.stage(), to);
            } else {
                assert_eq!(
                    result,
                    Err(TransitionError::NotAdjacent { from, to }),
                    "{from:?} -> {to:?}"
                );
                assert_eq!(lifecycle.stage(), from);
            }
        }
    }
}

#[test]
fn forward_walk_reports_quarter_progress_steps() {
    let mut lifecycle = ProjectLifecycle::new();
    let mut progress = vec![lifecycle.progress_percent()];
    for next in [Stage::Production, Stage::FinalReview, Stage::Complete] {
        lifecycle.transition(next).expect("adjacent step");
        progress.push(lifecycle.progress_percent());
    }
    assert_eq!(progress, vec![25, 50, 75, 100]);

    let err = lifecycle.transition(Stage::Design).expect_err("jump back");
    assert_eq!(
        err,
        TransitionError::NotAdjacent {
            from: Stage::Complete,
            to: Stage::Design
        }
    );
    assert_eq!(lifecycle.stage(), Stage::Complete);
    assert_eq!(lifecycle.panel(), StagePanel::Completion);
}

#[test]
fn complete_can_step_back_to_final_review() {
    let mut lifecycle = ProjectLifecycle::at(Stage::Complete);
    assert_eq!(lifecycle.enabled_transitions(), &[Stage::FinalReview]);
    lifecycle
        .transition(Stage::FinalReview)
        .expect("no terminal lock");
    assert_eq!(lifecycle.status_label(), "진행중 - 최종 검토");
}

#[test]
fn parses_labels_and_slugs() {
    assert_eq!(Stage::parse("최종 검토"), Some(Stage::FinalReview));
    assert_eq!(Stage::parse("production"), Some(Stage::Production));
    assert_eq!(Stage::parse("Complete"), Some(Stage::Complete));
    assert_eq!(Stage::parse("shipping"), None);
}

#[test]
fn serializes_only_the_stage() {
    let lifecycle = ProjectLifecycle::at(Stage::FinalReview);
    let json = serde_json::to_value(lifecycle).expect("json");
    assert_eq!(json, serde_json::json!({ "stage": "final_review" }));
}
