//! HTTP API layer: route handlers, middleware, and DTOs.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
