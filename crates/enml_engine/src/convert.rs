use std::path::Path;
use std::sync::Arc;

use enml_core::{is_prohibited_attribute, to_enml, Document, NOTE_ROOT};
use enml_logging::{enml_debug, enml_error, enml_info};

use crate::decode::decode_input;
use crate::error::ConvertError;
use crate::resource::ResourceRecord;
use crate::sanitize::{convert_media, Sanitizer};
use crate::session::{ConversionSession, Diagnostics};
use crate::{ConvertOptions, Fetcher, ReqwestFetcher};

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// ENML document, header included.
    pub enml: String,
    /// One entry per distinct image URL, in order of first appearance.
    pub resources: Vec<ResourceRecord>,
    pub diagnostics: Diagnostics,
}

/// Converts HTML documents into ENML notes.
///
/// Every call to a `convert*` method runs in its own session: resources and
/// diagnostics never carry over between calls, so one converter can serve
/// concurrent conversions.
#[derive(Clone)]
pub struct EnmlConverter {
    options: ConvertOptions,
    fetcher: Arc<dyn Fetcher>,
}

impl EnmlConverter {
    pub fn new(options: ConvertOptions) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(options.fetch.clone()));
        Self { options, fetcher }
    }

    pub fn with_fetcher(options: ConvertOptions, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { options, fetcher }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an HTML string.
    ///
    /// Returns either the complete note and its resources, or the first fatal
    /// error. Nothing partial is ever returned: a fatal error is logged and
    /// reported only through the returned [`ConvertError`].
    pub async fn convert(&self, html: &str) -> Result<Conversion, ConvertError> {
        let mut session = ConversionSession::new();
        match self.run(html, &mut session).await {
            Ok(enml) => {
                enml_info!(
                    "Converted note: {} resource(s), {} warning(s)",
                    session.resources.len(),
                    session.diagnostics.warnings.len()
                );
                Ok(Conversion {
                    enml,
                    resources: session.resources.into_records(),
                    diagnostics: session.diagnostics,
                })
            }
            Err(err) => {
                enml_error!("Conversion failed: {}", err);
                Err(err)
            }
        }
    }

    /// Decode raw bytes (BOM, `content_type` charset, meta charset, detection) and convert.
    pub async fn convert_bytes(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<Conversion, ConvertError> {
        let decoded = decode_input(bytes, content_type)
            .map_err(|err| ConvertError::ParseFailure(err.to_string()))?;
        enml_debug!("Decoded input as {}", decoded.encoding_label);
        self.convert(&decoded.html).await
    }

    pub async fn convert_file(&self, path: &Path) -> Result<Conversion, ConvertError> {
        let bytes = tokio::fs::read(path).await?;
        self.convert_bytes(&bytes, None).await
    }

    /// Run [`convert`](Self::convert) on a private runtime.
    ///
    /// Must not be called from within an async context.
    pub fn convert_blocking(&self, html: &str) -> Result<Conversion, ConvertError> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.convert(html))
    }

    async fn run(&self, html: &str, session: &mut ConversionSession) -> Result<String, ConvertError> {
        if html.len() > self.options.max_input_bytes {
            return Err(ConvertError::ParseFailure(format!(
                "input of {} bytes exceeds the limit of {} bytes",
                html.len(),
                self.options.max_input_bytes
            )));
        }

        let parsed = Document::parse(html).map_err(|err| ConvertError::ParseFailure(err.to_string()))?;
        for message in parsed.errors {
            session.error(message);
        }
        let mut doc = parsed.document;

        let body = doc.find_element("body").ok_or(ConvertError::MissingBody)?;
        doc.update_element(body, |e| {
            e.rename(NOTE_ROOT);
            e.remove_attrs_where(|a| {
                is_prohibited_attribute(&a.name) || a.name.eq_ignore_ascii_case("xmlns")
            });
        });

        let media = {
            let mut sanitizer = Sanitizer::new(&self.options, session);
            sanitizer.sanitize_children(&mut doc, body)?;
            sanitizer.into_media()
        };
        convert_media(&mut doc, media, session, self.fetcher.as_ref(), &self.options).await?;

        Ok(to_enml(&doc, body))
    }
}

impl Default for EnmlConverter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Convert `html` with a fresh converter.
pub async fn from_string(html: &str, options: ConvertOptions) -> Result<Conversion, ConvertError> {
    EnmlConverter::new(options).convert(html).await
}

/// Read and convert the HTML file at `path` with a fresh converter.
pub async fn from_file(path: &Path, options: ConvertOptions) -> Result<Conversion, ConvertError> {
    EnmlConverter::new(options).convert_file(path).await
}
