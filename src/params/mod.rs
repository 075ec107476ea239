// src/params/mod.rs

//! Typed parameter values and the layered parameter set.
//!
//! - [`value`] converts raw configuration text into typed values.
//! - [`set`] groups values by section, tracks where each came from and
//!   produces the flattened `section_key` view.
//! - [`interpolate`] renders `%(name)s` templates against that view.

pub mod interpolate;
pub mod set;
pub mod value;

pub use interpolate::{placeholders, render_statement, substitute};
pub use set::{Entry, FlatCollision, GENERAL_SECTION, Origin, ParameterSet, flat_name};
pub use value::ParamValue;
