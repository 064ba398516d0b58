pub mod shape;
pub mod document;
pub mod dep_graph;
