//! Kinematic diagnostics of the wind field
//!
//! Grid diagnostics (vorticity, divergence, deformation, advection,
//! geostrophic wind) combine unit-propagating finite differences on
//! canonical (y, x) ordered fields; profile diagnostics (storm-relative
//! helicity) integrate signed hodograph area over a height layer. Every
//! public entry point validates argument dimensions before computing and
//! accepts caller array orientation where 2-D grids are involved.

pub mod advection;
pub mod derived;
pub mod geostrophic;
pub mod helicity;
pub mod wind;

pub use advection::advection;
pub use derived::{
    convergence_vorticity, h_convergence, shearing_deformation,
    shearing_stretching_deformation, stretching_deformation, total_deformation, v_vorticity,
};
pub use geostrophic::{coriolis_parameter, geostrophic_wind};
pub use helicity::{
    storm_relative_helicity, Helicity, HelicityOptions, LayerBounds, StormMotion, WindProfile,
};
pub use wind::wind_components;
