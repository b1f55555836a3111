use log_indexer_shared::IndexName;
use serde_json::json;

/// Action line sending the following document to `index`.
pub fn action_line(index: &IndexName) -> String {
    json!({ "index": { "_index": index.as_str() } }).to_string()
}

/// Accumulates action/document pairs for a single object.
///
/// Pairs are written in arrival order, each line terminated by `\n`. Build
/// one per object and consume it with [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct BulkPayloadBuilder {
    body: String,
    documents: usize,
}

impl BulkPayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `document` as an index operation into `index`.
    pub fn push(&mut self, index: &IndexName, document: &str) {
        self.body.push_str(&action_line(index));
        self.body.push('\n');
        self.body.push_str(document);
        self.body.push('\n');
        self.documents += 1;
    }

    /// Number of documents appended so far.
    pub fn len(&self) -> usize {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }

    pub fn finish(self) -> BulkPayload {
        BulkPayload {
            body: self.body,
            documents: self.documents,
        }
    }
}

/// A finished `_bulk` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPayload {
    body: String,
    documents: usize,
}

impl BulkPayload {
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
