//! Ledger side of the weekly sync.
//!
//! Renders a [`SyncPayload`](metareport_engine::SyncPayload) into per-sheet
//! row batches, writes them section by section with per-section fault
//! isolation, and pushes payloads to the hosted spreadsheet script.

pub mod client;
pub mod error;
pub mod layout;
pub mod ledger;
pub(crate) mod retry;
pub mod writer;

pub use client::{ScriptClient, ScriptResponse};
pub use error::LedgerError;
pub use layout::{Cell, Row, RowStyle, Section};
pub use ledger::{Ledger, MemoryLedger};
pub use writer::{write_sync, SectionStatus, SyncReport};
