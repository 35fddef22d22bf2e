//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `partnership` - Pure domain services for partnership lift analysis
//!   (entity combination, lift, Shapley attribution, strategy)

pub mod foundation;
pub mod partnership;
