use std::collections::HashMap;

use enml_logging::enml_debug;
use futures_util::stream::{self, StreamExt};

use crate::resource::{fetch_resource, ResourceError, ResourceRecord};
use crate::Fetcher;

/// Per-conversion map from resolved URL to its fetch outcome.
///
/// Records are kept in insertion order, which is the order their URLs were
/// first met in the document. Failed fetches are remembered too, so a URL is
/// fetched at most once per conversion whichever way it went.
#[derive(Debug, Default)]
pub struct ResourceTable {
    records: Vec<ResourceRecord>,
    index: HashMap<String, usize>,
    failures: HashMap<String, ResourceError>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&ResourceRecord> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    /// Outcome already recorded for `url`, if it was fetched.
    pub fn outcome(&self, url: &str) -> Option<Result<&ResourceRecord, &ResourceError>> {
        if let Some(record) = self.get(url) {
            return Some(Ok(record));
        }
        self.failures.get(url).map(Err)
    }

    /// Cached record for `url`, fetching it first if this is the first request.
    pub async fn get_or_fetch(
        &mut self,
        url: &str,
        fetcher: &dyn Fetcher,
    ) -> Result<ResourceRecord, ResourceError> {
        if let Some(outcome) = self.outcome(url) {
            return outcome.cloned().map_err(Clone::clone);
        }
        let result = fetch_resource(fetcher, url).await;
        self.insert(url, result.clone());
        result
    }

    /// Fetch every URL not yet in the table, at most `concurrency` at a time.
    ///
    /// `urls` are deduplicated before any request is issued, so each distinct
    /// URL costs exactly one fetch. Results are inserted in the order of
    /// `urls`, independent of completion order.
    pub async fn fetch_all(&mut self, urls: &[String], fetcher: &dyn Fetcher, concurrency: usize) {
        let mut pending: Vec<&str> = Vec::new();
        for url in urls {
            if self.outcome(url).is_none() && !pending.contains(&url.as_str()) {
                pending.push(url);
            }
        }
        if pending.is_empty() {
            return;
        }
        enml_debug!("Fetching {} resource(s)", pending.len());

        let results: Vec<_> = stream::iter(pending.iter().copied())
            .map(|url| async move { (url, fetch_resource(fetcher, url).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        for (url, result) in results {
            self.insert(url, result);
        }
    }

    fn insert(&mut self, url: &str, result: Result<ResourceRecord, ResourceError>) {
        match result {
            Ok(record) => {
                if !self.index.contains_key(url) {
                    self.index.insert(url.to_string(), self.records.len());
                    self.records.push(record);
                }
            }
            Err(err) => {
                self.failures.entry(url.to_string()).or_insert(err);
            }
        }
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }
}
