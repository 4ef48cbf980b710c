//! Core account derivation for OpenLogin-style wallet sessions.
//!
//! A single authenticated user holds a master secret established by the
//! external login flow. This crate turns that secret into a deterministic
//! family of Ed25519 accounts: one main wallet account plus one account per
//! registered project (dApp), each scoped to the project's opaque identifier
//! via a one-way subkey derivation. The [`reconcile`] entry point merges the
//! derived keys with the remotely-fetched project list and reports which
//! account, if any, matches the caller's active application host.
//!
//! The reconciliation itself is a pure function over already-fetched data.
//! Fetching the project list from the developer dashboard is a separate,
//! thin step provided by [`dashboard::DashboardClient`].
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod account;
pub use account::*;

pub mod dashboard;

mod error;
pub use error::*;

mod keypair;
pub use keypair::*;

mod project;
pub use project::*;

mod reconcile;
pub use reconcile::*;

mod secret;
pub use secret::*;

mod subkey;
pub use subkey::*;
