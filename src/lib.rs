pub mod configuration;
pub mod dal;
pub mod domain;
pub mod questions;
pub mod routes;
pub mod services;
pub mod startup;
