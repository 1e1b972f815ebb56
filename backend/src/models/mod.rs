//! Data models shared across the engines, persistence and API handlers.

pub mod holiday;
pub mod search;
pub mod vacation;
pub mod weekly;
