//! # pdfwrap – validated configuration and safe output around a PDF engine
//!
//! The crate wraps a rendering engine with the pieces around it:
//!
//! 1. **Validate** – normalise orientation, unit, page format, encoding and
//!    conformance mode into a frozen [`DocumentConfig`] ([`config`])
//! 2. **Describe** – default author/creator/title ([`metadata`])
//! 3. **Render** – delegate to a [`RenderEngine`] ([`engine`]); a printpdf
//!    backed engine is bundled ([`render`], [`content`])
//! 4. **Emit** – save atomically to disk, stream for download or inline
//!    view, or return raw bytes ([`emitter`], [`atomic`])
//!
//! ```no_run
//! use pdfwrap::{DocumentEmitter, DocumentOptions, EmitterDefaults, TextRun};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = DocumentOptions {
//!     orientation: "L".into(),
//!     ..DocumentOptions::default()
//! };
//! let mut emitter: DocumentEmitter =
//!     DocumentEmitter::from_options(&options, EmitterDefaults::default())?;
//! emitter.set_document_information(Some("Jane"), None, Some("Report"));
//! emitter.engine_mut().add_text(TextRun::new(20.0, 20.0, "Hello"));
//! emitter.save_to_disk("report.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod config;
pub mod content;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod page_formats;
pub mod render;

// Re-exports for convenience
pub use config::{ConformanceMode, DocumentConfig, DocumentOptions, Orientation, Unit};
pub use content::{flow_text, DocumentContent, PageContent, TextRun};
pub use emitter::{download_name, Disposition, DocumentEmitter, DocumentStream};
pub use engine::{OutputMode, RenderEngine};
pub use error::{RenderError, SaveError, ValidationError};
pub use metadata::{DocumentMetadata, EmitterDefaults};
pub use render::PrintPdfEngine;
