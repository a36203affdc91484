#![deny(missing_docs)]
//! An HTTP entity adapter over a key-value store, that maps (kind, key) pairs to [`Entity`]
//! records.
//!
//! This crate provides the [`RecordAdapter`] itself, the [`StoreEngine`]s it can delegate to,
//! as well as a `squares-client` and `squares-server` executable that can be used to
//! interact with it.
//!
//! ## Supported Operations
//! The adapter supports three operations, each exposed as an HTTP `POST` handler taking a
//! JSON body:
//!
//! - `UPSERT` an entity at a (kind, key), fully replacing anything stored there
//! - `GET` the entity stored at a (kind, key)
//! - `DELETE` the entity stored at a (kind, key)
//!
//! See the [`RecordAdapter`] and the [`KeyRequest`] and [`UpsertRequest`] types for more
//! information on the structure of these operations.
//!
//! ## Entities
//! An [`Entity`] carries a `squareid`, a `squaretype`, an optional `description` and a
//! `createdDate` that the adapter stamps with the current time on every upsert. Upserts are
//! never merged with the previous entity at the same key.
//!
//! ## Storage Engines
//! Persistence is entirely delegated to a [`StoreEngine`]. The engine decides how entities
//! are laid out, how concurrent writes to the same key are ordered (last write wins for both
//! engines in this crate) and how durable a write is.
//! - [`SledStore`] keeps each kind in its own [`sled`] tree, in a working directory given
//! when the store is opened.
//! - [`MemoryStore`] keeps everything in a concurrent HashMap.
//!
//! ## Errors
//! Every failure (a missing field, an entity that was not found, a failing store) is caught
//! at the handler boundary and answered with a 500 and a JSON body of the form
//! `{"error": "<message>", "code": 500}`. Nothing is retried.
//!
//! ### Client / Server executables
//! The `squares-server` executable serves the three handlers over one of the engines,
//! and `squares-client` sends requests to it from the command line.
//!
//! [`sled`]: https://docs.rs/sled/latest/sled/
//! [`RecordAdapter`]: ./struct.RecordAdapter.html
//! [`StoreEngine`]: ./engine/trait.StoreEngine.html
//! [`SledStore`]: ./engine/struct.SledStore.html
//! [`MemoryStore`]: ./engine/struct.MemoryStore.html
//! [`KeyRequest`]: ./struct.KeyRequest.html
//! [`UpsertRequest`]: ./struct.UpsertRequest.html

pub use adapter::RecordAdapter;
pub use client::SquaresClient;
pub use command::{KeyRequest, UpsertRequest};
pub use engine::{MemoryStore, SledStore, StoreEngine};
pub use entity::Entity;
pub use error::{ErrorResponse, Result, SquaresError};
pub use key::StoreKey;
pub use server::SquaresServer;

mod adapter;
mod client;
mod command;
pub mod engine;
mod entity;
mod error;
mod key;
pub mod server;
