//! # Core Module
//!
//! The fundamental building blocks of eprsim: the parameter model, the lineshape
//! functions used to broaden stick spectra, and the file formats used to exchange
//! parameters and spectra with the outside world.
//!
//! ## Architecture
//!
//! - **Parameter Model** ([`models`]) - `Param`, `Nucleus`, `Radical`, `Simulator` and
//!   `Spectrum`, plus builders for named construction and a table of nuclear spins
//! - **Lineshapes** ([`lineshape`]) - Unit-area Gaussian, Lorentzian and pseudo-Voigt
//!   profiles parameterized by their full width at half maximum
//! - **File I/O** ([`io`]) - ASCII spectra, `.sim` parameter files, JSON and CSV
//!
//! Nothing in this module performs synthesis; it only describes what to synthesize and
//! how to read and write it. The [`crate::engine`] module attaches behaviour to these
//! types.

pub mod io;
pub mod lineshape;
pub mod models;
