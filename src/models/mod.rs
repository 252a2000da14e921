//! Vendor-neutral data models.
//!
//! This module contains the domain types shared by every adapter: tickets,
//! users, comments and custom fields. Vendor-specific wire shapes live next
//! to their adapters and are mapped to and from these types.

mod comment;
mod ticket;
mod user;

pub use comment::*;
pub use ticket::*;
pub use user::*;
