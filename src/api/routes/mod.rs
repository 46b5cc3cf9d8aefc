//! API Route Handlers
//!
//! Each module contains handlers for a group of related endpoints.

pub mod chart;
pub mod health;
pub mod history;
pub mod ingest;
