pub mod ui;
pub mod visibility;
pub mod preferences;
pub mod session;
