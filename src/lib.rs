//! Core library exports for the Reelbase admin panel.
//!
//! This crate exposes the domain layer (categories, video references, tags,
//! the URL resolver and the category tree) together with the forms, models,
//! repositories, routes and service layers used by the web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Role required to work with the catalog.
pub const SERVICE_ACCESS_ROLE: &str = "editor";
