//! API Routes
//!
//! Route handlers organized by dashboard view.

pub mod dashboard;
pub mod health;
pub mod history;
pub mod trending;
pub mod verify;
pub mod watchlist;
