pub mod config;
pub mod data;
pub mod error;
pub mod levels;
pub mod model;
