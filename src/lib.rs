pub mod api;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod utils;
