//! litrelay-web — HTTP surface for the PubMed relay.
//!
//! Endpoints:
//!   GET  /health  — readiness probe
//!   POST /search  — PubMed search returning normalized records
//!   POST /save    — persist records into the articles table
//!   POST /qa      — natural-language question over saved articles
//!   GET  /models  — Gemini models usable for SQL drafting

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
