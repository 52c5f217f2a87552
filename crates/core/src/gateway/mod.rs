//! Blob storage gateway using Apache OpenDAL.
//!
//! A single abstraction giving uniform CRUD-style access to one container on
//! one storage account. The HTTP layer only ever sees [`GatewayError`] and
//! base64 text; no vendor type crosses this boundary.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     BlobGateway                            │
//! │  put / get / delete / copy_and_delete_source               │
//! ├────────────────────────────────────────────────────────────┤
//! │                  Apache OpenDAL Operator                   │
//! │  op.write("name", data)   │ op.reader("name")              │
//! │  op.delete("name")        │ op.copy("src", "dst")          │
//! │  op.stat("name")          │ op.check()                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::GatewayError;
pub use service::{BlobGateway, RenameOutcome};
