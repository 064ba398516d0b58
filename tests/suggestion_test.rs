mod common;

use attachment_editor::attacher::catalog::STANDARD_CATALOG;
use attachment_editor::attacher::mode::AttachmentModeId;
use attachment_editor::attacher::reference::{Reference, ReferenceKind};
use attachment_editor::attacher::suggest::{suggest, SuggestionStatus};
use common::build_test_document;

#[test]
fn test_empty_reference_list_reports_no_references() {
    let doc = build_test_document();
    let result = suggest(&STANDARD_CATALOG, &doc, &[]);
    assert_eq!(result.status, SuggestionStatus::NoReferences);
    assert_eq!(result.best_fit_mode, None);
    assert!(result.applicable_modes.is_empty());
    assert!(result.reference_kinds.is_empty());
}

#[test]
fn test_single_planar_face_suggests_flat_face() {
    let doc = build_test_document();
    let references = vec![Reference::new("Box", "Face1")];
    let result = suggest(&STANDARD_CATALOG, &doc, &references);

    assert_eq!(result.status, SuggestionStatus::Ok);
    assert_eq!(result.applicable_modes, vec![AttachmentModeId::FlatFace]);
    assert_eq!(result.best_fit_mode, Some(AttachmentModeId::FlatFace));
}

#[test]
fn test_best_fit_is_member_of_applicable_set() {
    let doc = build_test_document();
    let cases: Vec<Vec<Reference>> = vec![
        vec![Reference::new("Box", "Vertex1")],
        vec![Reference::new("Box", "Edge1")],
        vec![Reference::new("Cyl", "Edge1")],
        vec![Reference::new("Cyl", "Face1")],
        vec![Reference::whole_object("Box")],
        vec![
            Reference::new("Box", "Vertex1"),
            Reference::new("Box", "Vertex2"),
        ],
        vec![
            Reference::new("Box", "Vertex1"),
            Reference::new("Box", "Vertex2"),
            Reference::new("Box", "Vertex3"),
        ],
    ];
    for references in &cases {
        let result = suggest(&STANDARD_CATALOG, &doc, references);
        let best = result
            .best_fit_mode
            .expect("each case should have a best fit");
        assert!(
            result.applicable_modes.contains(&best),
            "best fit {:?} not in applicable set {:?}",
            best,
            result.applicable_modes
        );
    }
}

#[test]
fn test_suggestion_is_deterministic() {
    let doc = build_test_document();
    let references = vec![Reference::new("Cyl", "Edge1")];
    let first = suggest(&STANDARD_CATALOG, &doc, &references);
    for _ in 0..10 {
        let again = suggest(&STANDARD_CATALOG, &doc, &references);
        assert_eq!(again.best_fit_mode, first.best_fit_mode);
        assert_eq!(again.applicable_modes, first.applicable_modes);
    }
}

#[test]
fn test_unmatched_kinds_yield_ok_with_empty_applicable_set() {
    let doc = build_test_document();
    // Face then face matches no catalog signature.
    let references = vec![
        Reference::new("Box", "Face1"),
        Reference::new("Box", "Face2"),
    ];
    let result = suggest(&STANDARD_CATALOG, &doc, &references);
    assert_eq!(result.status, SuggestionStatus::Ok);
    assert!(result.applicable_modes.is_empty());
    assert_eq!(result.best_fit_mode, None);
}

#[test]
fn test_broken_link_degrades_to_link_broken() {
    let doc = build_test_document();
    let references = vec![
        Reference::new("Box", "Face1"),
        Reference::new("Ghost", "Face1"),
    ];
    let result = suggest(&STANDARD_CATALOG, &doc, &references);

    assert_eq!(result.status, SuggestionStatus::LinkBroken);
    assert!(result.applicable_modes.is_empty());
    assert_eq!(result.best_fit_mode, None);
    assert!(result.reachable_modes.is_empty());
    // Kinds are still reported best-effort so the UI can mark the slot.
    assert_eq!(result.reference_kinds[1], ReferenceKind::Unresolved);
    let detail = result.error_detail.expect("broken link carries a detail");
    assert!(detail.contains("Ghost"), "unexpected detail: {}", detail);
}

#[test]
fn test_reachable_modes_exclude_applicable_ones() {
    let doc = build_test_document();
    // One vertex: TranslateOrigin is applicable; AlongLine and
    // ThreePointsPlane are reachable by adding more references.
    let references = vec![Reference::new("Box", "Vertex1")];
    let result = suggest(&STANDARD_CATALOG, &doc, &references);

    assert_eq!(
        result.applicable_modes,
        vec![AttachmentModeId::TranslateOrigin]
    );
    assert!(result
        .reachable_modes
        .contains_key(&AttachmentModeId::AlongLine));
    assert!(result
        .reachable_modes
        .contains_key(&AttachmentModeId::ThreePointsPlane));
    for id in &result.applicable_modes {
        assert!(
            !result.reachable_modes.contains_key(id),
            "mode {:?} is both applicable and reachable",
            id
        );
    }
}
