use std::fmt::Write;

use bytes::Bytes;
use enml_core::detect_mime_type;
use md5::{Digest, Md5};

use crate::{FetchError, Fetcher};

/// One binary attachment of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Resolved URL the bytes were fetched from.
    pub url: String,
    pub mime: String,
    /// Lowercase hex MD5 of `bytes`, the digest ENML uses in `en-media`.
    pub hash: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("resource {url} could not be fetched: {source}")]
    Fetch { url: String, source: FetchError },
    #[error("mime type of resource {url} could not be identified")]
    MimeUnknown { url: String },
}

impl ResourceError {
    pub fn url(&self) -> &str {
        match self {
            ResourceError::Fetch { url, .. } | ResourceError::MimeUnknown { url } => url,
        }
    }
}

/// Fetch `url`, classify its bytes and hash them.
pub async fn fetch_resource(fetcher: &dyn Fetcher, url: &str) -> Result<ResourceRecord, ResourceError> {
    let output = fetcher
        .fetch(url)
        .await
        .map_err(|source| ResourceError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let mime = detect_mime_type(url, &output.bytes).ok_or_else(|| ResourceError::MimeUnknown {
        url: url.to_string(),
    })?;

    Ok(ResourceRecord {
        url: url.to_string(),
        mime: mime.to_string(),
        hash: content_hash(&output.bytes),
        bytes: output.bytes,
    })
}

/// Lowercase hex MD5 digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Md5::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::content_hash;

    #[test]
    fn hash_matches_reference_digests() {
        assert_eq!(content_hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(content_hash(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }
}
