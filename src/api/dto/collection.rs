//! Collection and resource envelopes shared by the `/v2` endpoints.

use serde::Serialize;

/// A list response with page links.
///
/// The provider never paginates, so `next_url` is always `null`; the field is
/// still present so clients can run their normal page loop against it.
#[derive(Debug, Serialize)]
pub struct Collection<T> {
    pub object: &'static str,
    pub pages: Pages,
    pub total_count: usize,
    pub data: Vec<T>,
}

/// Page cursor block of a [`Collection`].
#[derive(Debug, Serialize)]
pub struct Pages {
    pub per_page: usize,
    pub next_url: Option<String>,
    pub previous_url: Option<String>,
}

impl<T> Collection<T> {
    /// Wraps `data` as the first and only page.
    pub fn single_page(data: Vec<T>) -> Self {
        let total_count = data.len();
        Self {
            object: "collection",
            pages: Pages {
                per_page: total_count,
                next_url: None,
                previous_url: None,
            },
            total_count,
            data,
        }
    }
}

/// A single typed record: `{ id, object, data }`.
#[derive(Debug, Serialize)]
pub struct Resource<T> {
    pub id: u64,
    pub object: &'static str,
    pub data: T,
}
