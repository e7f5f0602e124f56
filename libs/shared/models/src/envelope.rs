use serde::{Deserialize, Serialize};

/// Backend response contract: every endpoint wraps its payload in
/// `{ success, data, message }`. A missing `data` on success is a
/// decode failure, not an empty payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}
