pub mod cli;
pub mod codec;
pub mod color;
pub mod commands;
pub mod composite;
pub mod config;
pub mod error;
pub mod flatten;
pub mod report;
pub mod strip;

pub use error::Error;
