//! Transaction routes - list, add, delete, export
//!
//! Every endpoint answers with the full ledger, newest first.
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{
    api_transactions,
    api_add_transaction,
    api_delete_transaction,
    api_export_transactions,
};
