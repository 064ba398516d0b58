//! Typed, ordered geometric references and their classification.
//!
//! A reference points at a sub-element of a document object ("Box:Face1")
//! or at a whole object ("Box"). References are resolved against the live
//! document at evaluation time; a dangling name classifies as `Unresolved`
//! without aborting classification of the remaining slots.

use serde::{Serialize, Deserialize};
use smallvec::SmallVec;
use thiserror::Error;
use crate::document::document::Document;
use crate::document::shape::{EdgeGeometry, FaceGeometry, SubShape};
use crate::util::transform::Transform;

/// Maximum number of reference slots, the largest arity in the mode catalog.
pub const MAX_REFERENCES: usize = 4;

pub type ReferenceList = SmallVec<[Reference; MAX_REFERENCES]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub object: String,
    /// Empty for a whole-object reference.
    pub sub_element: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum LinkParseError {
    #[error("Too many ':' separators in link string '{0}'")]
    TooManySeparators(String),

    #[error("Link string '{0}' has no object name")]
    MissingObjectName(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ReferenceError {
    #[error("Object '{0}' does not exist in the document")]
    UnresolvedObject(String),

    #[error("Object '{object}' has no sub-element '{sub_element}'")]
    UnresolvedSubElement { object: String, sub_element: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ReferenceIntakeError {
    #[error("{0}")]
    Parse(#[from] LinkParseError),

    #[error("{0}")]
    Unresolved(#[from] ReferenceError),
}

impl Reference {
    pub fn new(object: &str, sub_element: &str) -> Self {
        Self {
            object: object.to_string(),
            sub_element: sub_element.to_string(),
        }
    }

    pub fn whole_object(object: &str) -> Self {
        Self::new(object, "")
    }

    pub fn is_whole_object(&self) -> bool {
        self.sub_element.is_empty()
    }

    /// Formats the compact "Object" / "Object:SubElement" link string.
    pub fn to_link_string(&self) -> String {
        if self.sub_element.is_empty() {
            self.object.clone()
        } else {
            format!("{}:{}", self.object, self.sub_element)
        }
    }
}

/// Parses a link string. An empty (or whitespace) string denotes "no
/// reference in this slot" and parses to `None`.
pub fn parse_link_string(text: &str) -> Result<Option<Reference>, LinkParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.len() {
        1 => Ok(Some(Reference::whole_object(parts[0]))),
        2 => {
            if parts[0].is_empty() {
                return Err(LinkParseError::MissingObjectName(trimmed.to_string()));
            }
            Ok(Some(Reference::new(parts[0], parts[1])))
        }
        _ => Err(LinkParseError::TooManySeparators(trimmed.to_string())),
    }
}

/// One display string per reference, in slot order.
pub fn to_link_strings(references: &[Reference]) -> Vec<String> {
    references.iter().map(|r| r.to_link_string()).collect()
}

/// Parses display strings back into a reference list. Empty strings are
/// skipped; every named object must exist in the document.
pub fn from_link_strings(
    strings: &[String],
    doc: &Document,
) -> Result<ReferenceList, ReferenceIntakeError> {
    let mut references = ReferenceList::new();
    for text in strings {
        let Some(reference) = parse_link_string(text)? else {
            continue;
        };
        if doc.get_object(&reference.object).is_none() {
            return Err(ReferenceError::UnresolvedObject(reference.object).into());
        }
        references.push(reference);
    }
    Ok(references)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Line,
    Circle,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceKind {
    Plane,
    Cylinder,
    Other,
}

/// Geometric classification of a resolved reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Vertex,
    Edge(EdgeKind),
    Face(FaceKind),
    Object,
    Unresolved,
}

impl ReferenceKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ReferenceKind::Vertex => "vertex",
            ReferenceKind::Edge(EdgeKind::Line) => "linear edge",
            ReferenceKind::Edge(EdgeKind::Circle) => "circular edge",
            ReferenceKind::Edge(EdgeKind::Other) => "edge",
            ReferenceKind::Face(FaceKind::Plane) => "planar face",
            ReferenceKind::Face(FaceKind::Cylinder) => "cylindrical face",
            ReferenceKind::Face(FaceKind::Other) => "face",
            ReferenceKind::Object => "whole object",
            ReferenceKind::Unresolved => "unresolved",
        }
    }
}

fn kind_of_sub_shape(sub_shape: &SubShape) -> ReferenceKind {
    match sub_shape {
        SubShape::Vertex { .. } => ReferenceKind::Vertex,
        SubShape::Edge(EdgeGeometry::Line { .. }) => ReferenceKind::Edge(EdgeKind::Line),
        SubShape::Edge(EdgeGeometry::Circle { .. }) => ReferenceKind::Edge(EdgeKind::Circle),
        SubShape::Edge(EdgeGeometry::Other { .. }) => ReferenceKind::Edge(EdgeKind::Other),
        SubShape::Face(FaceGeometry::Plane { .. }) => ReferenceKind::Face(FaceKind::Plane),
        SubShape::Face(FaceGeometry::Cylinder { .. }) => ReferenceKind::Face(FaceKind::Cylinder),
        SubShape::Face(FaceGeometry::Other { .. }) => ReferenceKind::Face(FaceKind::Other),
    }
}

/// A reference resolved against the document, carrying world-space geometry.
#[derive(Clone, Debug)]
pub struct ResolvedReference {
    pub reference: Reference,
    pub kind: ReferenceKind,
    pub geometry: ResolvedGeometry,
}

#[derive(Clone, Debug)]
pub enum ResolvedGeometry {
    /// Sub-element geometry, already moved into world space by the owner's
    /// placement.
    SubShape(SubShape),
    /// Whole-object reference: the owner's placement.
    WholeObject(Transform),
}

pub fn resolve_reference(
    doc: &Document,
    reference: &Reference,
) -> Result<ResolvedReference, ReferenceError> {
    let object = doc
        .get_object(&reference.object)
        .ok_or_else(|| ReferenceError::UnresolvedObject(reference.object.clone()))?;

    if reference.is_whole_object() {
        return Ok(ResolvedReference {
            reference: reference.clone(),
            kind: ReferenceKind::Object,
            geometry: ResolvedGeometry::WholeObject(object.placement.clone()),
        });
    }

    let sub_shape = object
        .shape
        .get(&reference.sub_element)
        .ok_or_else(|| ReferenceError::UnresolvedSubElement {
            object: reference.object.clone(),
            sub_element: reference.sub_element.clone(),
        })?;

    Ok(ResolvedReference {
        reference: reference.clone(),
        kind: kind_of_sub_shape(sub_shape),
        geometry: ResolvedGeometry::SubShape(sub_shape.transformed(&object.placement)),
    })
}

pub fn resolve_references(
    doc: &Document,
    references: &[Reference],
) -> Result<Vec<ResolvedReference>, ReferenceError> {
    references
        .iter()
        .map(|reference| resolve_reference(doc, reference))
        .collect()
}

/// Classifies one reference; dangling names yield `Unresolved`.
pub fn classify_reference(doc: &Document, reference: &Reference) -> ReferenceKind {
    match resolve_reference(doc, reference) {
        Ok(resolved) => resolved.kind,
        Err(_) => ReferenceKind::Unresolved,
    }
}

/// Classifies every slot in order. A broken entry never aborts
/// classification of the remaining entries.
pub fn classify_references(doc: &Document, references: &[Reference]) -> Vec<ReferenceKind> {
    references
        .iter()
        .map(|reference| classify_reference(doc, reference))
        .collect()
}
