//! Destination recommendations and photo geography for a personal travel library.
//!
//! The [`services`] module holds the algorithmic core (scoring, travel history,
//! clustering, great-circle distance); [`api`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
