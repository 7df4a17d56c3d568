//! Entity definitions for the partner service catalog.
//! - `service` holds the `Service` record, its closed enums, and the typed
//!   creation/update inputs.
//! - `seed` is the built-in catalog returned when nothing has been persisted.

pub mod errors;
pub mod seed;
pub mod service;
