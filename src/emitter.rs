//! Document emitter – owns metadata defaulting and the output paths
//! (disk, forced download, inline view, raw bytes).
//!
//! The emitter composes a [`RenderEngine`] instead of extending it. The first
//! rendered result is cached, so every output operation on an unchanged
//! emitter yields the same bytes; changing metadata or touching the engine
//! through [`DocumentEmitter::engine_mut`] discards the cache.

use std::io::{self, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::atomic::{make_writable, write_atomic};
use crate::config::{DocumentConfig, DocumentOptions};
use crate::engine::{OutputMode, RenderEngine};
use crate::error::{RenderError, SaveError, ValidationError};
use crate::metadata::{DocumentMetadata, EmitterDefaults};
use crate::render::PrintPdfEngine;

/// Extension appended to download names.
pub const DOCUMENT_EXTENSION: &str = ".pdf";

/// Length of generated download names, before the extension.
pub const RANDOM_NAME_LEN: usize = 8;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Resolve a download file name.
///
/// An empty candidate becomes [`RANDOM_NAME_LEN`] random lowercase hex digits;
/// otherwise [`DOCUMENT_EXTENSION`] is appended unless already present.
pub fn download_name<R: Rng + ?Sized>(candidate: &str, rng: &mut R) -> String {
    if candidate.is_empty() {
        let mut name: String = (0..RANDOM_NAME_LEN)
            .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
            .collect();
        name.push_str(DOCUMENT_EXTENSION);
        name
    } else if candidate.ends_with(DOCUMENT_EXTENSION) {
        candidate.to_string()
    } else {
        format!("{candidate}{DOCUMENT_EXTENSION}")
    }
}

/// How the consumer should present a [`DocumentStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Force a save dialog.
    Attachment,
    /// Display in place; consumers without a viewer fall back to a download.
    Inline,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }
}

/// Rendered bytes tagged for delivery to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStream {
    /// Suggested file name, always ending in [`DOCUMENT_EXTENSION`].
    pub file_name: String,
    pub disposition: Disposition,
    pub bytes: Vec<u8>,
}

impl DocumentStream {
    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    /// `Content-Disposition` header value.
    ///
    /// Only the last path component of the name is used. Non-ASCII names get
    /// an additional RFC 5987 `filename*` parameter.
    pub fn content_disposition(&self) -> String {
        let base = self
            .file_name
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.file_name);

        let ascii: String = base
            .chars()
            .map(|c| {
                if c.is_ascii() && !c.is_ascii_control() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let quoted = ascii.replace('\\', "\\\\").replace('"', "\\\"");

        let mut value = format!("{}; filename=\"{quoted}\"", self.disposition.as_str());
        if !base.is_ascii() {
            value.push_str("; filename*=UTF-8''");
            value.push_str(&urlencoding::encode(base));
        }
        value
    }

    /// Response headers for delivering the document over HTTP.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(8);
        if self.disposition == Disposition::Attachment {
            headers.push(("Content-Description", "File Transfer".to_string()));
        }
        headers.push((
            "Cache-Control",
            "private, must-revalidate, post-check=0, pre-check=0, max-age=1".to_string(),
        ));
        headers.push(("Pragma", "public".to_string()));
        headers.push(("Expires", "Sat, 26 Jul 1997 05:00:00 GMT".to_string()));
        headers.push(("Content-Type", self.content_type().to_string()));
        headers.push(("Content-Disposition", self.content_disposition()));
        if self.disposition == Disposition::Attachment {
            headers.push(("Content-Transfer-Encoding", "binary".to_string()));
        }
        headers.push(("Content-Length", self.bytes.len().to_string()));
        headers
    }

    pub fn write_body<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Wraps a rendering engine with validated configuration, metadata defaults
/// and output operations.
///
/// Not internally synchronised: metadata updates and outputs take `&mut self`.
pub struct DocumentEmitter<E: RenderEngine = PrintPdfEngine> {
    config: DocumentConfig,
    defaults: EmitterDefaults,
    metadata: DocumentMetadata,
    engine: E,
    rng: Box<dyn RngCore + Send>,
    rendered: Option<Vec<u8>>,
}

impl<E: RenderEngine> DocumentEmitter<E> {
    /// Build the engine from `config` and apply default metadata.
    pub fn new(config: DocumentConfig, defaults: EmitterDefaults) -> Self {
        let engine = E::from_config(&config);
        Self::with_engine(config, defaults, engine)
    }

    /// Validate `options`, then build as [`DocumentEmitter::new`]. No engine
    /// is constructed if validation fails.
    pub fn from_options(
        options: &DocumentOptions,
        defaults: EmitterDefaults,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(options.validate()?, defaults))
    }

    /// Use an already constructed engine.
    pub fn with_engine(config: DocumentConfig, defaults: EmitterDefaults, engine: E) -> Self {
        let mut emitter = Self {
            config,
            defaults,
            metadata: DocumentMetadata::default(),
            engine,
            rng: Box::new(StdRng::from_entropy()),
            rendered: None,
        };
        emitter.set_document_information(None, None, None);
        emitter
    }

    /// Replace the random source used for generated download names.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access, e.g. to add content. Discards any cached render.
    pub fn engine_mut(&mut self) -> &mut E {
        self.rendered = None;
        &mut self.engine
    }

    /// Update author, creator and title, then push all three to the engine.
    ///
    /// `None` leaves a populated field alone and fills an empty one with its
    /// default; `Some` always overrides.
    pub fn set_document_information(
        &mut self,
        author: Option<&str>,
        creator: Option<&str>,
        title: Option<&str>,
    ) {
        self.metadata.apply(author, creator, title, &self.defaults);
        self.engine.set_author(&self.metadata.author);
        self.engine.set_creator(&self.metadata.creator);
        self.engine.set_title(&self.metadata.title);
        self.rendered = None;
    }

    pub fn compute_download_name(&mut self, candidate: &str) -> String {
        download_name(candidate, &mut self.rng)
    }

    /// Write the document to `path`, replacing any existing file atomically.
    ///
    /// [`SaveError::PermissionFixupFailed`] is returned after a complete write;
    /// the file stays in place.
    pub fn save_to_disk(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let bytes = self.render(OutputMode::Save)?;
        write_atomic(path, |w| w.write_all(&bytes))?;
        log::info!("Saved '{}' ({} bytes)", path.display(), bytes.len());

        make_writable(path).map_err(|source| {
            log::warn!("Could not adjust permissions of '{}': {source}", path.display());
            SaveError::PermissionFixupFailed {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Bytes tagged to force a save dialog.
    pub fn stream_for_download(
        &mut self,
        name: Option<&str>,
    ) -> Result<DocumentStream, RenderError> {
        self.stream(name, Disposition::Attachment, OutputMode::Download)
    }

    /// Bytes tagged for inline display; the resolved name is the suggested
    /// file name should the viewer offer to save.
    pub fn stream_for_inline_view(
        &mut self,
        name: Option<&str>,
    ) -> Result<DocumentStream, RenderError> {
        self.stream(name, Disposition::Inline, OutputMode::Inline)
    }

    /// Raw rendered bytes.
    pub fn get_bytes(&mut self) -> Result<Vec<u8>, RenderError> {
        self.render(OutputMode::Bytes)
    }

    fn stream(
        &mut self,
        name: Option<&str>,
        disposition: Disposition,
        mode: OutputMode,
    ) -> Result<DocumentStream, RenderError> {
        let file_name = self.compute_download_name(name.unwrap_or_default());
        let bytes = self.render(mode)?;
        Ok(DocumentStream {
            file_name,
            disposition,
            bytes,
        })
    }

    fn render(&mut self, mode: OutputMode) -> Result<Vec<u8>, RenderError> {
        if let Some(bytes) = &self.rendered {
            return Ok(bytes.clone());
        }
        let bytes = self.engine.produce_output(mode)?;
        self.rendered = Some(bytes.clone());
        Ok(bytes)
    }
}
