//! Core types shared across the pipeline

pub mod config;
pub mod error;
