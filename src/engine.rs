//! The narrow interface the emitter uses to drive a rendering engine.

use crate::config::DocumentConfig;
use crate::error::RenderError;

/// What the rendered bytes are about to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Save,
    Download,
    Inline,
    Bytes,
}

/// A document renderer.
///
/// Engines are built from a validated [`DocumentConfig`], receive metadata
/// through the setters, and produce the complete document on demand.
pub trait RenderEngine {
    fn from_config(config: &DocumentConfig) -> Self
    where
        Self: Sized;

    fn set_author(&mut self, author: &str);
    fn set_creator(&mut self, creator: &str);
    fn set_title(&mut self, title: &str);

    fn produce_output(&mut self, mode: OutputMode) -> Result<Vec<u8>, RenderError>;
}
