//! # Workflows Module
//!
//! High-level entry points that run a complete procedure on top of the engine.
//!
//! ## Overview
//!
//! Workflows take validated inputs, drive the engine with a [`crate::engine::progress::ProgressReporter`],
//! and return results ready to be written out: a [`crate::core::models::spectrum::Spectrum`]
//! with its field axis rather than a bare curve.
//!
//! ## Architecture
//!
//! - **Simulation Workflow** ([`simulate`]) - A single spectrum from a simulator
//! - **Perturbation Workflow** ([`perturb`]) - A seeded ensemble of randomized simulators
//!   and their spectra, for Monte-Carlo studies of parameter sensitivity

pub mod perturb;
pub mod simulate;
