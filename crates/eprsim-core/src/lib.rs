//! # eprsim Core Library
//!
//! A library for simulating continuous-wave electron paramagnetic resonance (EPR)
//! spectra from a set of paramagnetic species and the nuclei they couple to.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that the numerical engine can be
//! tested in isolation from file formats and user-facing entry points.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Param`, `Nucleus`, `Radical`,
//!   `Simulator`, `Spectrum`), pure lineshape functions and the file formats that produce
//!   and consume them (ASCII spectra, `.sim` parameter files, JSON, CSV).
//!
//! - **[`engine`]: The Logic Core.** Stick-spectrum enumeration, pseudo-Voigt
//!   convolution, discrete derivatives, Monte-Carlo parameter perturbation and the
//!   validation that guards them. `Simulator::calc` lives here.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on top of the engine:
//!   simulating a spectrum with its field axis and drawing a perturbed ensemble.

pub mod core;
pub mod engine;
pub mod workflows;
