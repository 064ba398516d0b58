//! Typed sub-element geometry carried by document objects.
//!
//! The editor never evaluates surfaces or curves; the document already holds
//! the classification-relevant data for every named sub-element (a point for
//! a vertex, an axis for a line, a plane for a planar face, and so on).

use glam::f64::DVec3;
use indexmap::IndexMap;
use crate::util::transform::Transform;

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeGeometry {
    /// An unbounded representation of a straight edge.
    Line { origin: DVec3, direction: DVec3 },
    Circle { center: DVec3, normal: DVec3, radius: f64 },
    /// Any other curve type, reduced to a point and tangent sample.
    Other { point: DVec3, tangent: DVec3 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum FaceGeometry {
    Plane { origin: DVec3, normal: DVec3 },
    Cylinder { origin: DVec3, axis: DVec3, radius: f64 },
    /// Any other surface type, reduced to a point and normal sample.
    Other { origin: DVec3, normal: DVec3 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubShape {
    Vertex { point: DVec3 },
    Edge(EdgeGeometry),
    Face(FaceGeometry),
}

impl SubShape {
    /// Returns this sub-shape moved from the owner's local frame into world
    /// space by the owner's placement.
    pub fn transformed(&self, placement: &Transform) -> SubShape {
        match self {
            SubShape::Vertex { point } => SubShape::Vertex {
                point: placement.transform_point(*point),
            },
            SubShape::Edge(EdgeGeometry::Line { origin, direction }) => {
                SubShape::Edge(EdgeGeometry::Line {
                    origin: placement.transform_point(*origin),
                    direction: placement.transform_direction(*direction),
                })
            }
            SubShape::Edge(EdgeGeometry::Circle { center, normal, radius }) => {
                SubShape::Edge(EdgeGeometry::Circle {
                    center: placement.transform_point(*center),
                    normal: placement.transform_direction(*normal),
                    radius: *radius,
                })
            }
            SubShape::Edge(EdgeGeometry::Other { point, tangent }) => {
                SubShape::Edge(EdgeGeometry::Other {
                    point: placement.transform_point(*point),
                    tangent: placement.transform_direction(*tangent),
                })
            }
            SubShape::Face(FaceGeometry::Plane { origin, normal }) => {
                SubShape::Face(FaceGeometry::Plane {
                    origin: placement.transform_point(*origin),
                    normal: placement.transform_direction(*normal),
                })
            }
            SubShape::Face(FaceGeometry::Cylinder { origin, axis, radius }) => {
                SubShape::Face(FaceGeometry::Cylinder {
                    origin: placement.transform_point(*origin),
                    axis: placement.transform_direction(*axis),
                    radius: *radius,
                })
            }
            SubShape::Face(FaceGeometry::Other { origin, normal }) => {
                SubShape::Face(FaceGeometry::Other {
                    origin: placement.transform_point(*origin),
                    normal: placement.transform_direction(*normal),
                })
            }
        }
    }
}

/// Named sub-element table of one object, in a stable insertion order so
/// that UI listings and tests are deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeData {
    pub sub_shapes: IndexMap<String, SubShape>,
}

impl ShapeData {
    pub fn new() -> Self {
        Self {
            sub_shapes: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, sub_shape: SubShape) {
        self.sub_shapes.insert(name.to_string(), sub_shape);
    }

    pub fn get(&self, name: &str) -> Option<&SubShape> {
        self.sub_shapes.get(name)
    }
}
