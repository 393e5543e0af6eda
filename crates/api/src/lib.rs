//! HTTP API: invoice mutation handlers, the page gate, and routing.

pub mod actions;
pub mod app;
pub mod context;
pub mod middleware;
pub mod views;
