//! # keyroster-api
//!
//! HTTP client for the `/accounts` REST resource.
//!
//! ## Features
//!
//! - **Wire model**: [`Account`], [`AccountId`], [`AccountType`] and [`Label`]
//!   matching the backend's JSON representation
//! - **Resource client**: list, create, update and delete over `reqwest`
//! - **[`AccountApi`] seam**: the operations as a trait, so callers can run
//!   against any backend implementation
//!
//! ## Quick Start
//!
//! ```ignore
//! use keyroster_api::{AccountApi, AccountsClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:3001")?;
//!     let client = AccountsClient::new(&config)?;
//!
//!     for account in client.list().await? {
//!         println!("{} ({})", account.login, account.kind);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod model;

pub use client::{AccountApi, AccountsClient, ClientConfig};
pub use error::{Error, Result};
pub use model::{Account, AccountId, AccountType, Label, ParseAccountTypeError};
pub use reqwest::StatusCode;
