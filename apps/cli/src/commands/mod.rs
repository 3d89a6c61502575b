//! Command implementations for the sfops CLI.

pub mod clip;
pub mod cluster;
pub mod data;
pub mod doctor;
pub mod model;
pub mod quality;
pub mod show_config;
