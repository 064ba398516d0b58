mod common;

use glam::f64::DVec3;
use attachment_editor::attacher::engine::{AttachEngine, AttachError, AttachResult};
use attachment_editor::attacher::mode::AttachmentModeId;
use attachment_editor::attacher::reference::Reference;
use attachment_editor::util::transform::Transform;
use common::{assert_vec_close, build_test_document};

const EPS: f64 = 1e-9;

fn attached(engine: &AttachEngine, doc: &attachment_editor::document::document::Document) -> Transform {
    match engine
        .calculate_attached_placement(doc, &Transform::identity())
        .expect("resolution should succeed")
    {
        AttachResult::Attached(placement) => placement,
        AttachResult::NotAttached => panic!("expected an attached placement"),
    }
}

fn not_attached(engine: &AttachEngine, doc: &attachment_editor::document::document::Document) -> bool {
    matches!(
        engine
            .calculate_attached_placement(doc, &Transform::identity())
            .expect("resolution should succeed"),
        AttachResult::NotAttached
    )
}

#[test]
fn test_flat_face_places_origin_on_face_with_z_along_normal() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Box", "Face1")]).unwrap();

    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::new(0.0, 0.0, 10.0), EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::Z, EPS);
}

#[test]
fn test_no_mode_resolves_to_not_attached() {
    let doc = build_test_document();
    let engine = AttachEngine::new();
    assert!(not_attached(&engine, &doc));
}

#[test]
fn test_normal_to_edge_on_a_line_is_not_attached() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::NormalToEdge);
    engine.set_references(&[Reference::new("Box", "Edge1")]).unwrap();

    // A straight edge has no radial direction; this is a normal outcome,
    // not an error.
    assert!(not_attached(&engine, &doc));
}

#[test]
fn test_three_points_plane() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::ThreePointsPlane);
    engine
        .set_references(&[
            Reference::new("Box", "Vertex1"),
            Reference::new("Box", "Vertex2"),
            Reference::new("Box", "Vertex3"),
        ])
        .unwrap();

    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::ZERO, EPS);
    // Z normal to the plane of the points, X towards the second point.
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::Z, EPS);
    assert_vec_close(placement.transform_direction(DVec3::X), DVec3::X, EPS);
}

#[test]
fn test_three_points_plane_degenerates_on_coincident_points() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::ThreePointsPlane);
    engine
        .set_references(&[
            Reference::new("Box", "Vertex1"),
            Reference::new("Box", "Vertex2"),
            Reference::new("Box", "Vertex2"),
        ])
        .unwrap();

    assert!(not_attached(&engine, &doc));
}

#[test]
fn test_along_line_through_two_points() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::AlongLine);
    engine
        .set_references(&[
            Reference::new("Box", "Vertex1"),
            Reference::new("Box", "Vertex2"),
        ])
        .unwrap();

    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::ZERO, EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::X, EPS);
}

#[test]
fn test_concentric_on_circular_edge() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::Concentric);
    engine.set_references(&[Reference::new("Cyl", "Edge1")]).unwrap();

    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::new(20.0, 0.0, 8.0), EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::Z, EPS);
}

#[test]
fn test_tangent_plane_on_cylinder() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::TangentPlane);
    engine
        .set_references(&[
            Reference::new("Cyl", "Face1"),
            Reference::new("Box", "Vertex2"),
        ])
        .unwrap();

    // Vertex2 is at (10,0,0); the cylinder axis passes through (20,0,0).
    // The tangent point sits on the surface towards the vertex.
    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::new(16.0, 0.0, 0.0), EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::new(-1.0, 0.0, 0.0), EPS);
}

#[test]
fn test_object_plane_modes() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.set_references(&[Reference::whole_object("Box")]).unwrap();

    engine.mode = Some(AttachmentModeId::ObjectXY);
    let xy = attached(&engine, &doc);
    assert_vec_close(xy.transform_direction(DVec3::Z), DVec3::Z, EPS);

    engine.mode = Some(AttachmentModeId::ObjectXZ);
    let xz = attached(&engine, &doc);
    // The object's XZ plane becomes the local XY plane.
    assert_vec_close(xz.transform_direction(DVec3::X), DVec3::X, EPS);
    assert_vec_close(xz.transform_direction(DVec3::Y), DVec3::Z, EPS);

    engine.mode = Some(AttachmentModeId::ObjectYZ);
    let yz = attached(&engine, &doc);
    assert_vec_close(yz.transform_direction(DVec3::X), DVec3::Y, EPS);
    assert_vec_close(yz.transform_direction(DVec3::Y), DVec3::Z, EPS);
}

#[test]
fn test_reverse_flag_flips_z_and_double_flip_restores() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Box", "Face1")]).unwrap();

    let plain = attached(&engine, &doc);

    engine.super_placement.reverse = true;
    let flipped = attached(&engine, &doc);
    assert_vec_close(flipped.transform_direction(DVec3::Z), -DVec3::Z, EPS);
    assert_vec_close(flipped.translation, plain.translation, EPS);

    // Toggling the flag twice yields the original placement.
    engine.super_placement.reverse = false;
    let restored = attached(&engine, &doc);
    assert!(plain.approx_eq(&restored, EPS));

    // The flip itself is an involution.
    assert!(flipped.reversed().approx_eq(&plain, EPS));
}

#[test]
fn test_super_placement_composes_in_local_frame() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Box", "Face1")]).unwrap();

    engine.super_placement.translation = DVec3::new(1.0, 2.0, 3.0);
    engine.super_placement.yaw_deg = 90.0;

    // The flat-face base frame is axis-aligned at (0,0,10), so the offset
    // adds directly and the yaw spins around the face normal.
    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::new(1.0, 2.0, 13.0), EPS);
    assert_vec_close(placement.transform_direction(DVec3::X), DVec3::Y, EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::Z, EPS);
}

#[test]
fn test_super_placement_survives_euler_round_trip_within_tolerance() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Box", "Face1")]).unwrap();
    engine.super_placement.yaw_deg = 33.0;
    engine.super_placement.pitch_deg = -71.0;
    engine.super_placement.roll_deg = 154.0;

    let first = attached(&engine, &doc);

    // Push the angles through a decompose/recompose cycle, as the dialog
    // fields do, and resolve again.
    let offset = engine.super_placement.to_transform();
    let (yaw, pitch, roll) = offset.to_euler_deg();
    engine.super_placement.yaw_deg = yaw;
    engine.super_placement.pitch_deg = pitch;
    engine.super_placement.roll_deg = roll;

    let second = attached(&engine, &doc);
    assert!(
        first.approx_eq(&second, 1e-9),
        "representation drift exceeded tolerance"
    );
}

#[test]
fn test_folding_mode_uses_four_lines() {
    use attachment_editor::document::document::DocumentObject;
    use attachment_editor::document::shape::{EdgeGeometry, SubShape};

    let mut doc = build_test_document();
    let mut sheet = DocumentObject::new("Sheet");
    // Fold edge along Y, flanges leaving it along +X and +Z.
    sheet.shape.insert(
        "Fold",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::ZERO,
            direction: DVec3::Y,
        }),
    );
    sheet.shape.insert(
        "FlangeA",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::ZERO,
            direction: DVec3::X,
        }),
    );
    sheet.shape.insert(
        "FlangeB",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::ZERO,
            direction: DVec3::Z,
        }),
    );
    sheet.shape.insert(
        "Far",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::new(0.0, 5.0, 0.0),
            direction: DVec3::X,
        }),
    );
    doc.add_object(sheet);

    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::Folding);
    engine
        .set_references(&[
            Reference::new("Sheet", "Fold"),
            Reference::new("Sheet", "FlangeA"),
            Reference::new("Sheet", "FlangeB"),
            Reference::new("Sheet", "Far"),
        ])
        .unwrap();

    let placement = attached(&engine, &doc);
    assert_vec_close(placement.translation, DVec3::ZERO, EPS);
    assert_vec_close(placement.transform_direction(DVec3::Z), DVec3::Y, EPS);
    // X bisects the two flange directions.
    let expected_x = (DVec3::X + DVec3::Z).normalize();
    assert_vec_close(placement.transform_direction(DVec3::X), expected_x, EPS);
}

#[test]
fn test_broken_reference_is_a_link_error() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Ghost", "Face1")]).unwrap();

    let err = engine
        .calculate_attached_placement(&doc, &Transform::identity())
        .unwrap_err();
    assert!(matches!(err, AttachError::LinkBroken(_)));
}

#[test]
fn test_too_many_references_rejected() {
    let mut engine = AttachEngine::new();
    let too_many: Vec<Reference> = (0..5)
        .map(|i| Reference::new("Box", &format!("Vertex{}", i)))
        .collect();
    let err = engine.set_references(&too_many).unwrap_err();
    assert!(matches!(err, AttachError::TooManyReferences(5)));
}

#[test]
fn test_resolution_does_not_mutate_engine_or_document() {
    let doc = build_test_document();
    let mut engine = AttachEngine::new();
    engine.mode = Some(AttachmentModeId::FlatFace);
    engine.set_references(&[Reference::new("Box", "Face1")]).unwrap();

    let before = engine.references.clone();
    let _ = attached(&engine, &doc);
    assert_eq!(engine.references, before);
    // The target's stored placement is untouched by pure resolution.
    assert!(doc
        .get_object("Target")
        .unwrap()
        .placement
        .approx_eq(&Transform::identity(), EPS));
}
