//! Orders
//!
//! Order records, the status state machine, persistence ports, and the checkout service that
//! turns a cart into an order and moves orders through their lifecycle.

pub mod errors;
pub mod models;
pub mod number;
pub mod repository;
pub mod service;
pub mod status;
