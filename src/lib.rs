//! MarketAI Suite API Library
//!
//! Backend for a small business dashboard: marketing copy generation through
//! the Groq chat-completion API, and a sales lead list persisted to flat JSON
//! files.
//!
//! # Modules
//!
//! - `api`: API-layer namespace (handlers, routes).
//! - `core`: Domain-layer namespace (leads, auth, scoring, models, errors).
//! - `data`: Data access layer.
//! - `integrations`: External service integrations.
//! - `auth`: Signup and login over the user store.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `groq_client`: Groq chat-completion client.
//! - `handlers`: HTTP request handlers and shared state.
//! - `leads`: Lead listing, creation and label reconciliation.
//! - `models`: Records and request/response models.
//! - `routes`: Router and middleware.
//! - `scoring`: Score to label/color rule.
//! - `store`: JSON-file and in-memory record stores.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;

pub mod auth;
pub mod config;
pub mod errors;
pub mod groq_client;
pub mod handlers;
pub mod leads;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod store;
