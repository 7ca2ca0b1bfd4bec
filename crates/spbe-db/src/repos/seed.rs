//! Bulk loading of reference data (units and the indicator taxonomy).

use serde::{Deserialize, Serialize};
use spbe_core::entities::{Aspect, Domain, Indicator, Unit};

use crate::error::DatabaseError;
use crate::service::SpbeService;

/// Reference data as read from a seed file. Table names match the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub unit_kerja: Vec<Unit>,
    pub domain_spbe: Vec<Domain>,
    pub aspek_spbe: Vec<Aspect>,
    pub indikator_spbe: Vec<Indicator>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub units: usize,
    pub domains: usize,
    pub aspects: usize,
    pub indicators: usize,
}

impl SpbeService {
    /// Upsert all reference rows, parents before children.
    ///
    /// Re-running with the same data is a no-op.
    pub async fn seed_reference(&self, data: &ReferenceData) -> Result<SeedReport, DatabaseError> {
        for unit in &data.unit_kerja {
            self.upsert_unit(unit).await?;
        }
        for domain in &data.domain_spbe {
            self.upsert_domain(domain).await?;
        }
        for aspect in &data.aspek_spbe {
            self.upsert_aspect(aspect).await?;
        }
        for indicator in &data.indikator_spbe {
            self.upsert_indicator(indicator).await?;
        }

        let report = SeedReport {
            units: data.unit_kerja.len(),
            domains: data.domain_spbe.len(),
            aspects: data.aspek_spbe.len(),
            indicators: data.indikator_spbe.len(),
        };
        tracing::info!(?report, "reference data seeded");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;

    const SEED: &str = r#"
[[unit_kerja]]
id = "5"
nama_unit = "Dinas Kominfo"
kode_unit = "DISKOMINFO"

[[domain_spbe]]
id = "dom-1"
nama_domain = "Kebijakan SPBE"
urutan = 1

[[aspek_spbe]]
id = "asp-1"
domain_id = "dom-1"
nama_aspek = "Kebijakan Internal"
urutan = 1

[[indikator_spbe]]
id = "ind-1"
aspek_id = "asp-1"
kode_indikator = "I.1"
nama_indikator = "Tingkat kematangan kebijakan internal arsitektur SPBE"
urutan = 1
"#;

    #[tokio::test]
    async fn seeds_from_toml_and_is_repeatable() {
        let data: ReferenceData = toml::from_str(SEED).unwrap();
        let svc = test_service().await;

        let report = svc.seed_reference(&data).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                units: 1,
                domains: 1,
                aspects: 1,
                indicators: 1
            }
        );
        svc.seed_reference(&data).await.unwrap();

        assert_eq!(svc.count_units().await.unwrap(), 1);
        let indicators = svc.list_indicators(None).await.unwrap();
        assert_eq!(indicators.len(), 1);
        assert!(indicators[0].indicator.unit_kerja_id.is_none());
    }

    #[test]
    fn empty_seed_file_parses() {
        let data: ReferenceData = toml::from_str("").unwrap();
        assert_eq!(data, ReferenceData::default());
    }
}
