//! Indicator repository.

use spbe_core::entities::{Indicator, IndicatorDetail};

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::repos::taxonomy::row_to_opt_aspect_detail;
use crate::repos::unit::row_to_opt_unit;
use crate::service::SpbeService;

/// Indicator columns, then aspect + domain, then owning unit.
const DETAIL_SELECT: &str = "SELECT i.id, i.aspek_id, i.unit_kerja_id, i.kode_indikator, i.nama_indikator, i.deskripsi, i.urutan,
        a.id, a.domain_id, a.nama_aspek, a.urutan,
        d.id, d.nama_domain, d.deskripsi, d.urutan,
        u.id, u.nama_unit, u.kode_unit
 FROM indikator_spbe i
 LEFT JOIN aspek_spbe a ON a.id = i.aspek_id
 LEFT JOIN domain_spbe d ON d.id = a.domain_id
 LEFT JOIN unit_kerja u ON u.id = i.unit_kerja_id";

pub(crate) fn row_to_indicator(row: &libsql::Row, offset: i32) -> Result<Indicator, DatabaseError> {
    Ok(Indicator {
        id: row.get::<String>(offset)?,
        aspek_id: row.get::<String>(offset + 1)?,
        unit_kerja_id: get_opt_string(row, offset + 2)?,
        kode_indikator: row.get::<String>(offset + 3)?,
        nama_indikator: row.get::<String>(offset + 4)?,
        deskripsi: get_opt_string(row, offset + 5)?,
        urutan: row.get::<i64>(offset + 6)?,
    })
}

fn row_to_indicator_detail(row: &libsql::Row) -> Result<IndicatorDetail, DatabaseError> {
    Ok(IndicatorDetail {
        indicator: row_to_indicator(row, 0)?,
        aspek: row_to_opt_aspect_detail(row, 7)?,
        unit_kerja: row_to_opt_unit(row, 15)?,
    })
}

impl SpbeService {
    /// Indicators with aspect, domain and unit, ordered by rank.
    ///
    /// `unit_id` restricts the list to indicators scoped to that unit.
    pub async fn list_indicators(
        &self,
        unit_id: Option<&str>,
    ) -> Result<Vec<IndicatorDetail>, DatabaseError> {
        let mut rows = match unit_id {
            Some(unit_id) => {
                let sql = format!("{DETAIL_SELECT} WHERE i.unit_kerja_id = ?1 ORDER BY i.urutan, i.id");
                self.db().query(&sql, [unit_id]).await?
            }
            None => {
                let sql = format!("{DETAIL_SELECT} ORDER BY i.urutan, i.id");
                self.db().query(&sql, ()).await?
            }
        };

        let mut indicators = Vec::new();
        while let Some(row) = rows.next().await? {
            indicators.push(row_to_indicator_detail(&row)?);
        }
        Ok(indicators)
    }

    pub async fn indicator_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let count = self
            .db()
            .count("SELECT COUNT(*) FROM indikator_spbe WHERE id = ?1", [id])
            .await?;
        Ok(count > 0)
    }

    pub async fn upsert_indicator(&self, indicator: &Indicator) -> Result<(), DatabaseError> {
        self.db()
            .execute(
                "INSERT INTO indikator_spbe (id, aspek_id, unit_kerja_id, kode_indikator, nama_indikator, deskripsi, urutan)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET aspek_id = excluded.aspek_id,
                     unit_kerja_id = excluded.unit_kerja_id, kode_indikator = excluded.kode_indikator,
                     nama_indikator = excluded.nama_indikator, deskripsi = excluded.deskripsi,
                     urutan = excluded.urutan",
                libsql::params![
                    indicator.id.as_str(),
                    indicator.aspek_id.as_str(),
                    indicator.unit_kerja_id.as_deref(),
                    indicator.kode_indikator.as_str(),
                    indicator.nama_indikator.as_str(),
                    indicator.deskripsi.as_deref(),
                    indicator.urutan
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{UNIT_A, seed_reference, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn indicators_embed_taxonomy_and_unit() {
        let svc = test_service().await;
        seed_reference(&svc).await;

        let all = svc.list_indicators(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].indicator.kode_indikator, "I.1");

        let aspek = all[0].aspek.as_ref().unwrap();
        assert_eq!(aspek.aspect.id, "asp-1");
        assert_eq!(aspek.domain.as_ref().unwrap().id, "dom-1");

        let scoped = all.iter().find(|i| i.indicator.id == "ind-2").unwrap();
        assert_eq!(scoped.unit_kerja.as_ref().unwrap().id, UNIT_A);
    }

    #[tokio::test]
    async fn unit_filter_keeps_only_scoped_indicators() {
        let svc = test_service().await;
        seed_reference(&svc).await;

        let ids: Vec<String> = svc
            .list_indicators(Some(UNIT_A))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.indicator.id)
            .collect();
        assert_eq!(ids, vec!["ind-2"]);
        assert!(svc.list_indicators(Some("404")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn indicator_exists_checks_id() {
        let svc = test_service().await;
        seed_reference(&svc).await;
        assert!(svc.indicator_exists("ind-1").await.unwrap());
        assert!(!svc.indicator_exists("ind-404").await.unwrap());
    }
}
