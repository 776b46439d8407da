#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use enml_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher};

pub const PNG_BYTES: &[u8] =
    b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0\x1f\x15\xc4\x89";
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\0\x01\0\x80\0\0\0\0\0\xff\xff\xff!\xf9\x04\x01\0\0\0\0,";

pub const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">";

/// In-memory fetcher that records every URL it is asked for.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, bytes: &[u8]) -> Self {
        self.responses.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let bytes = self
            .responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::FileNotFound, url.to_string()))?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: None,
                byte_len: bytes.len() as u64,
            },
            bytes: Bytes::from(bytes),
        })
    }
}

pub fn init_logging() {
    enml_logging::initialize_for_tests();
}

/// Wraps `inner` in the expected ENML prologue and root.
pub fn note(inner: &str) -> String {
    format!("{HEADER}<en-note>{inner}</en-note>")
}
