//! Shipping service HTTP surface.

pub mod routes;
pub mod state;
