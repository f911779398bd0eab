//! HTTP surface: upload form, conversion endpoint, health probes

pub mod constants;
pub mod middleware;
pub mod services;
