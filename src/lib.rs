// src/lib.rs

//! sitewatch: festival network sheet pipeline library

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
