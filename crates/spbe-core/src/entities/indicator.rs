use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AspectDetail, Unit};

/// A compliance requirement. Belongs to one aspect, optionally scoped to one unit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Indicator {
    pub id: String,
    pub aspek_id: String,
    pub unit_kerja_id: Option<String>,
    pub kode_indikator: String,
    pub nama_indikator: String,
    pub deskripsi: Option<String>,
    pub urutan: i64,
}

/// An indicator with its aspect (and domain) and owning unit embedded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IndicatorDetail {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub aspek: Option<AspectDetail>,
    pub unit_kerja: Option<Unit>,
}
