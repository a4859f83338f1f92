pub mod auth;
pub mod config;
pub mod error;
pub mod keygen;
pub mod middleware;
pub mod models;
pub mod routes;
