use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An organizational unit (unit kerja). Static reference data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub nama_unit: String,
    pub kode_unit: String,
}
