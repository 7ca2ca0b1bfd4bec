use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top level of the indicator taxonomy. Ordered by `urutan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Domain {
    pub id: String,
    pub nama_domain: String,
    pub deskripsi: Option<String>,
    pub urutan: i64,
}
