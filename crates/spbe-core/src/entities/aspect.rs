use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Domain;

/// Second level of the indicator taxonomy, owned by one domain.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Aspect {
    pub id: String,
    pub domain_id: String,
    pub nama_aspek: String,
    pub urutan: i64,
}

/// An aspect with its domain embedded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AspectDetail {
    #[serde(flatten)]
    pub aspect: Aspect,
    pub domain: Option<Domain>,
}
