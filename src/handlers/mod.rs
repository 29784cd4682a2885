//! HTTP handlers for the programmer resource and service endpoints.

pub mod common;
pub mod programmer;
