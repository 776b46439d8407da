//! html2enml engine: resource fetching, sanitization and the conversion pipeline.
mod convert;
mod decode;
mod error;
mod fetch;
mod options;
mod resource;
mod sanitize;
mod session;
mod table;
mod types;

pub use convert::{from_file, from_string, Conversion, EnmlConverter};
pub use decode::{decode_input, DecodeError, DecodedInput};
pub use error::ConvertError;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use options::{ConvertOptions, OptionsError};
pub use resource::{content_hash, fetch_resource, ResourceError, ResourceRecord};
pub use session::Diagnostics;
pub use table::ResourceTable;
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
