//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use glam::f64::DVec3;
use attachment_editor::attacher::engine::SuperPlacement;
use attachment_editor::attacher::mode::AttachmentModeId;
use attachment_editor::document::document::{Document, DocumentObject};
use attachment_editor::document::shape::{EdgeGeometry, FaceGeometry, SubShape};
use attachment_editor::editor::ui::{DialogFields, MessageKind, ModeListItem};

/// Builds the standard test document:
///
/// - "Box": planar faces, linear edges and vertices
/// - "Cyl": a cylindrical side face and a circular rim edge
/// - "Pad": depends on "Target" (a downstream feature, for cycle tests)
/// - "Target": the object being attached
pub fn build_test_document() -> Document {
    let mut doc = Document::new("TestDoc");

    let mut boxy = DocumentObject::new("Box");
    boxy.shape.insert(
        "Face1",
        SubShape::Face(FaceGeometry::Plane {
            origin: DVec3::new(0.0, 0.0, 10.0),
            normal: DVec3::Z,
        }),
    );
    boxy.shape.insert(
        "Face2",
        SubShape::Face(FaceGeometry::Plane {
            origin: DVec3::new(5.0, 0.0, 5.0),
            normal: DVec3::X,
        }),
    );
    boxy.shape.insert(
        "Edge1",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::new(0.0, 0.0, 0.0),
            direction: DVec3::new(0.0, 10.0, 0.0),
        }),
    );
    boxy.shape.insert(
        "Edge2",
        SubShape::Edge(EdgeGeometry::Line {
            origin: DVec3::new(0.0, 0.0, 0.0),
            direction: DVec3::new(10.0, 0.0, 0.0),
        }),
    );
    boxy.shape.insert(
        "Vertex1",
        SubShape::Vertex {
            point: DVec3::new(0.0, 0.0, 0.0),
        },
    );
    boxy.shape.insert(
        "Vertex2",
        SubShape::Vertex {
            point: DVec3::new(10.0, 0.0, 0.0),
        },
    );
    boxy.shape.insert(
        "Vertex3",
        SubShape::Vertex {
            point: DVec3::new(0.0, 10.0, 0.0),
        },
    );
    doc.add_object(boxy);

    let mut cyl = DocumentObject::new("Cyl");
    cyl.shape.insert(
        "Face1",
        SubShape::Face(FaceGeometry::Cylinder {
            origin: DVec3::new(20.0, 0.0, 0.0),
            axis: DVec3::Z,
            radius: 4.0,
        }),
    );
    cyl.shape.insert(
        "Edge1",
        SubShape::Edge(EdgeGeometry::Circle {
            center: DVec3::new(20.0, 0.0, 8.0),
            normal: DVec3::Z,
            radius: 4.0,
        }),
    );
    doc.add_object(cyl);

    doc.add_object(DocumentObject::new("Target"));

    let mut pad = DocumentObject::new("Pad");
    pad.depends_on.push("Target".to_string());
    doc.add_object(pad);

    doc
}

/// A `DialogFields` double that records every call.
#[derive(Default)]
pub struct RecordingFields {
    pub reference_texts: Vec<(usize, String)>,
    pub super_placements: Vec<SuperPlacement>,
    pub mode_lists: Vec<(Vec<ModeListItem>, Option<AttachmentModeId>)>,
    pub messages: Vec<(MessageKind, String)>,
}

impl RecordingFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_message(&self) -> Option<&(MessageKind, String)> {
        self.messages.last()
    }

    pub fn last_mode_list(&self) -> Option<&(Vec<ModeListItem>, Option<AttachmentModeId>)> {
        self.mode_lists.last()
    }
}

impl DialogFields for RecordingFields {
    fn set_reference_text(&mut self, slot: usize, text: &str) {
        self.reference_texts.push((slot, text.to_string()));
    }

    fn set_super_placement_fields(&mut self, super_placement: &SuperPlacement) {
        self.super_placements.push(super_placement.clone());
    }

    fn set_mode_list(&mut self, items: &[ModeListItem], selected: Option<AttachmentModeId>) {
        self.mode_lists.push((items.to_vec(), selected));
    }

    fn set_message(&mut self, kind: MessageKind, text: &str) {
        self.messages.push((kind, text.to_string()));
    }
}

pub fn assert_vec_close(actual: DVec3, expected: DVec3, epsilon: f64) {
    assert!(
        actual.distance(expected) <= epsilon,
        "expected {:?} to be within {} of {:?}",
        actual,
        epsilon,
        expected
    );
}
