//! HTTP surface: routes, handlers and extractors

pub mod extract;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
