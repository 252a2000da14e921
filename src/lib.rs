//! # helpdesk-bridge
//!
//! A vendor-abstraction layer for help-desk ticketing systems.
//!
//! The crate translates between a vendor-neutral ticket/user/comment
//! model and vendor-specific wire representations, and exposes a small
//! ticket-lifecycle surface: create, update, comment, close.
//!
//! ## Features
//!
//! - **Neutral model**: [`models::Ticket`], [`models::User`],
//!   [`models::Comment`] and [`models::CustomField`] insulate callers
//!   from vendor field names
//! - **Vendor adapters**: Zendesk and Halo implementations of the same
//!   six-operation contract
//! - **Stub adapter**: an in-memory backend with identical behavior for
//!   tests or when no vendor is configured
//! - **OAuth**: Zendesk authorization-code token exchange
//! - **Security**: tokens and secrets are never logged and are stripped
//!   from error messages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Credentials and vendor selection, loadable from
//!   environment variables
//! - [`error`] - The unified error type with security-conscious message
//!   sanitization
//! - [`helpdesk`] - The [`helpdesk::HelpDesk`] trait and the vendor
//!   registry
//! - [`models`] - The vendor-neutral data model
//! - [`stub`] - The in-memory backend
//! - [`zendesk`] / [`halo`] - Vendor adapters, each with its own wire
//!   types and HTTP client
//!
//! ## Example
//!
//! ```ignore
//! use helpdesk_bridge::config::BridgeConfig;
//! use helpdesk_bridge::models::{Comment, Ticket, User};
//! use helpdesk_bridge::helpdesk;
//!
//! async fn example() -> Result<(), helpdesk_bridge::error::BridgeError> {
//!     let config = BridgeConfig::from_env()?;
//!     let desk = helpdesk::from_config(&config).await?;
//!
//!     let ticket = desk
//!         .create_ticket(
//!             Ticket::new("Printer not working")
//!                 .with_body("It displays a sad face.")
//!                 .with_user(User::from_name_and_email("Jim Example", "jim@example.com")),
//!         )
//!         .await?;
//!
//!     desk.add_comment(ticket.id.unwrap(), Comment::new("Have you tried turning it off?"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Set `HELPDESK_VENDOR` to `zendesk`, `halo` or `stub` (default:
//! `stub`), plus the selected vendor's credentials - see [`config`].
//! Lifecycle diagnostics are emitted through `tracing`; install a
//! `tracing-subscriber` in the host application to see them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod halo;
pub mod helpdesk;
pub mod models;
pub mod stub;
pub mod zendesk;
