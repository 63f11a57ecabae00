pub mod analysis;
pub mod anki;
pub mod core;
pub mod persistence;
pub mod report;
