//! Ticketmaster Discovery v2 domain models and pure transformations.

pub mod models;
pub mod paging;
pub mod query;
