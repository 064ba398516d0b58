pub mod reference;
pub mod mode;
pub mod catalog;
pub mod placement;
pub mod suggest;
pub mod engine;
