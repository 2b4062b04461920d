//! Web layer: page handlers, askama templates, and the router

pub mod handlers;
pub mod routes;
pub mod templates;

pub use routes::create_router;
