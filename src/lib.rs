//! Partner Lift - Partnership lift analysis engine
//!
//! Decides whether two companies bidding together on an opportunity beat
//! the better of them bidding alone, attributes the combined score between
//! them, and proposes a partnership structure with governance, revenue
//! split and an implementation plan.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
