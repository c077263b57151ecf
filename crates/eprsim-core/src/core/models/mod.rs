//! # Core Models Module
//!
//! Data structures describing a simulation: which paramagnetic species are present,
//! which nuclei each one couples to, and how the field sweep is sampled.
//!
//! ## Overview
//!
//! Ownership is strictly hierarchical. A [`simulator::Simulator`] owns its radicals, a
//! [`radical::Radical`] owns its nuclei, and every scalar is a [`param::Param`] held by
//! value. There is no sharing and no interior mutability.
//!
//! ## Key Components
//!
//! - [`param`] - A value with the half-width of the window it may be perturbed in
//! - [`nucleus`] - A coupled nuclear spin site
//! - [`radical`] - A paramagnetic species with lineshape parameters and nuclei
//! - [`simulator`] - Sweep, sampling and the radicals to combine
//! - [`spectrum`] - A sampled curve with its field axis
//! - [`builder`] - Named-field construction for nuclei, radicals and simulators
//! - [`isotope`] - Nuclear spins of isotopes commonly seen in EPR
//!
//! ## Usage
//!
//! ```ignore
//! use eprsim::core::models::{nucleus::Nucleus, param::Param, radical::Radical, simulator::Simulator};
//!
//! let mut radical = Radical::new(
//!     Param::fixed(1.0),
//!     Param::fixed(0.5),
//!     Param::fixed(1.0),
//!     Param::fixed(0.0),
//!     Vec::new(),
//! );
//! radical.push_nuc(Nucleus::fixed(0.5, 15.0, 1.0));
//!
//! let simulator = Simulator::new(100.0, 1024, vec![radical]);
//! let curve = simulator.calc()?;
//! ```

pub mod builder;
pub mod isotope;
pub mod nucleus;
pub mod param;
pub mod radical;
pub mod simulator;
pub mod spectrum;
