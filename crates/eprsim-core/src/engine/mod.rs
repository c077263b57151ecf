//! # Engine Module
//!
//! This module turns the parameter model of [`crate::core::models`] into numbers: it
//! synthesizes spectra, perturbs parameters for Monte-Carlo studies, and validates
//! simulators before either happens.
//!
//! ## Overview
//!
//! Synthesis proceeds radical by radical. Each radical's nuclei are expanded into a
//! stick spectrum (line positions and relative intensities), every stick is broadened
//! with a unit-area pseudo-Voigt kernel sampled over the sweep, the result is scaled by
//! the radical's abundance and optionally differentiated, and the per-radical curves
//! are summed in order. The entry point is [`Simulator::calc`](crate::core::models::simulator::Simulator::calc).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Numerical tolerances and limits of the synthesis
//! - **Validation** ([`validation`]) - Checks on sweep, sampling and every parameter
//! - **Multiplets** ([`multiplet`]) - Hyperfine stick-spectrum enumeration
//! - **Synthesis** ([`synthesis`]) - Kernel convolution and accumulation across radicals
//! - **Derivatives** ([`derivative`]) - Discrete derivatives for derivative presentation
//! - **Perturbation** ([`perturbation`]) - Seeded or thread-local parameter randomization
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine error types
//!
//! ## Key Capabilities
//!
//! - **Deterministic output**: synthesis contains no randomness, and parallel runs sum
//!   radicals in the same order as sequential runs
//! - **Parallel computation** of independent radicals with the `parallel` feature
//! - **Injected randomness** so perturbation is reproducible under a seeded generator
//! - **Recoverable clamping** of degenerate linewidths and derivative orders, logged
//!   through `tracing` instead of failing

pub mod config;
pub mod derivative;
pub mod error;
pub mod multiplet;
pub mod perturbation;
pub mod progress;
pub mod synthesis;
pub mod validation;
