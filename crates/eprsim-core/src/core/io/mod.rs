//! Reading and writing of parameter files and spectra.
//!
//! Every format implements the [`traits::DataFile`] trait, so they share the same
//! stream, path and string entry points. Parameter formats produce
//! [`simpar::SimulationParameters`]; spectrum formats produce
//! [`crate::core::models::spectrum::Spectrum`].

pub mod ascii;
pub mod delimited;
pub mod json;
pub mod simpar;
pub mod traits;
