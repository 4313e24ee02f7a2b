//! Core crate settings

pub mod config;
