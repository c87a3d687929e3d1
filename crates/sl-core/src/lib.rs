//! Core launch orchestration: configuration synthesis, supervisor connection
//! lifecycle, and two-phase startup sequencing.

pub mod error;
pub mod models;
pub mod services;
