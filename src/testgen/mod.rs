//! Test Data Generation
//!
//! # Components
//!
//! - [`rng`] - Seedable uniform integer source
//! - [`generator`] - INSERT/QUERY case generator and `.in` writer

pub mod generator;
pub mod rng;
