pub mod app;
mod deserializers;
pub mod error;
pub mod routes;
