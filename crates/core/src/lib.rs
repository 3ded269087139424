//! Core library for tmtools
//!
//! This crate implements the **Functional Core** of the tmtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`tmtools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`tmtools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions here are deterministic and side-effect free: the Discovery
//! API record types, the query-string builder, and the pagination-envelope
//! logic can all be tested with fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`discovery`]: Ticketmaster Discovery v2 domain models and transformations

pub mod discovery;
