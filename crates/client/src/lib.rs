//! Client core of the SG-SST administration console
//!
//! Everything here is UI-agnostic: a view layer drives the stores and boards
//! and renders their state.

pub mod assignments;
pub mod domain;
pub mod gestion;
pub mod shared;
pub mod system;
