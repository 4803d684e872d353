//! # teinote_core
//!
//! Endnote inlining engine for TEI P5 documents.
//!
//! This crate provides:
//! - The per-document rewrite: note collection, reference inlining and
//!   cleanup of the emptied back matter
//! - Configuration loading
//! - Document discovery
//! - Parallel batch processing with per-document failure isolation
//!
//! ## Example
//!
//! ```rust,ignore
//! use teinote_core::{InlineConfig, NoteProcessor};
//!
//! let processor = NoteProcessor::new(InlineConfig::default())?;
//! let report = processor.process_dir("corpus/".as_ref(), "out/".as_ref())?;
//! for doc in &report.documents {
//!     println!("{}: {} references inlined", doc.path.display(), doc.stats.references_inlined);
//! }
//! ```

mod cleanup;
mod collector;
mod config;
mod error;
pub mod file_finder;
mod file_processor;
mod inliner;
mod processor;
mod result;
mod tei;
mod transform;

pub use cleanup::{CleanupOutcome, remove_notes_divisions};
pub use collector::{NoteTable, collect_notes};
pub use config::{CONFIG_FILE_NAME, DuplicateIdPolicy, InlineConfig, TEI_NAMESPACE};
pub use error::TransformError;
pub use inliner::{InlineOutcome, inline_references};
pub use processor::{NoteProcessor, ProcessFilesResult};
pub use result::{BatchReport, DocumentFailure, DocumentReport};
pub use transform::{TransformStats, transform_document};
