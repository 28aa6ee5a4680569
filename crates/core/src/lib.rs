//! Atmospheric Kinematics Core Library
//!
//! Derives kinematic diagnostic fields from gridded and profile wind data:
//! vorticity, divergence, deformation, scalar advection, geostrophic wind,
//! and storm-relative helicity.
//!
//! ## Building blocks
//!
//! - Dimension-checked [`Quantity`] arrays with explicit unit conversion
//! - A unit-propagating finite-difference engine ([`gradient`])
//! - Orientation normalization so "x-first" and "y-first" grids give
//!   consistent results
//! - Log-pressure layer interpolation for sounding work
//!
//! All operations are pure, synchronous functions of their inputs; caller
//! data is never mutated and nothing persists between calls.

// Core types and utilities
pub mod core_types;

// Error taxonomy
pub mod error;

// Numerical primitives
pub mod numerics;

// Kinematic diagnostics
pub mod kinematics;

// Re-export core types
pub use core_types::{Dimension, Orientation, Quantity, Unit};
pub use error::{CalcError, CalcResult};

// Re-export the numerical engine
pub use numerics::{first_derivative, gradient, Spacing};

// Re-export the diagnostics
pub use kinematics::{
    advection, convergence_vorticity, coriolis_parameter, geostrophic_wind, h_convergence,
    shearing_deformation, shearing_stretching_deformation, storm_relative_helicity,
    stretching_deformation, total_deformation, v_vorticity, wind_components,
};
pub use kinematics::{Helicity, HelicityOptions, LayerBounds, StormMotion, WindProfile};
