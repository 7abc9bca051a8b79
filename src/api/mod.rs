pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
