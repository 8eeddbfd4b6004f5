pub mod alignment;
pub mod config;
pub mod encoding;
pub mod error;
pub mod scorer;
// cmd and reports are binary modules (declared in main.rs).
