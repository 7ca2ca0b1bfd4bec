//! Domain and aspect repository: the two-level indicator taxonomy.

use spbe_core::entities::{Aspect, AspectDetail, Domain};

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::SpbeService;

pub(crate) fn row_to_domain(row: &libsql::Row, offset: i32) -> Result<Domain, DatabaseError> {
    Ok(Domain {
        id: row.get::<String>(offset)?,
        nama_domain: row.get::<String>(offset + 1)?,
        deskripsi: get_opt_string(row, offset + 2)?,
        urutan: row.get::<i64>(offset + 3)?,
    })
}

pub(crate) fn row_to_aspect(row: &libsql::Row, offset: i32) -> Result<Aspect, DatabaseError> {
    Ok(Aspect {
        id: row.get::<String>(offset)?,
        domain_id: row.get::<String>(offset + 1)?,
        nama_aspek: row.get::<String>(offset + 2)?,
        urutan: row.get::<i64>(offset + 3)?,
    })
}

/// Read a LEFT JOINed aspect + domain block (8 columns) starting at `offset`.
pub(crate) fn row_to_opt_aspect_detail(
    row: &libsql::Row,
    offset: i32,
) -> Result<Option<AspectDetail>, DatabaseError> {
    if row.get::<Option<String>>(offset)?.is_none() {
        return Ok(None);
    }
    let domain = if row.get::<Option<String>>(offset + 4)?.is_some() {
        Some(row_to_domain(row, offset + 4)?)
    } else {
        None
    };
    Ok(Some(AspectDetail {
        aspect: row_to_aspect(row, offset)?,
        domain,
    }))
}

impl SpbeService {
    /// All domains, ordered by rank.
    pub async fn list_domains(&self) -> Result<Vec<Domain>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, nama_domain, deskripsi, urutan FROM domain_spbe ORDER BY urutan, id",
                (),
            )
            .await?;

        let mut domains = Vec::new();
        while let Some(row) = rows.next().await? {
            domains.push(row_to_domain(&row, 0)?);
        }
        Ok(domains)
    }

    /// All aspects with their domain, ordered by rank.
    pub async fn list_aspects(&self) -> Result<Vec<AspectDetail>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT a.id, a.domain_id, a.nama_aspek, a.urutan,
                        d.id, d.nama_domain, d.deskripsi, d.urutan
                 FROM aspek_spbe a
                 LEFT JOIN domain_spbe d ON d.id = a.domain_id
                 ORDER BY a.urutan, a.id",
                (),
            )
            .await?;

        let mut aspects = Vec::new();
        while let Some(row) = rows.next().await? {
            if let Some(aspect) = row_to_opt_aspect_detail(&row, 0)? {
                aspects.push(aspect);
            }
        }
        Ok(aspects)
    }

    pub async fn upsert_domain(&self, domain: &Domain) -> Result<(), DatabaseError> {
        self.db()
            .execute(
                "INSERT INTO domain_spbe (id, nama_domain, deskripsi, urutan) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET nama_domain = excluded.nama_domain,
                     deskripsi = excluded.deskripsi, urutan = excluded.urutan",
                libsql::params![
                    domain.id.as_str(),
                    domain.nama_domain.as_str(),
                    domain.deskripsi.as_deref(),
                    domain.urutan
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn upsert_aspect(&self, aspect: &Aspect) -> Result<(), DatabaseError> {
        self.db()
            .execute(
                "INSERT INTO aspek_spbe (id, domain_id, nama_aspek, urutan) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET domain_id = excluded.domain_id,
                     nama_aspek = excluded.nama_aspek, urutan = excluded.urutan",
                libsql::params![
                    aspect.id.as_str(),
                    aspect.domain_id.as_str(),
                    aspect.nama_aspek.as_str(),
                    aspect.urutan
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seed_reference, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn domains_ordered_by_rank() {
        let svc = test_service().await;
        seed_reference(&svc).await;

        let ranks: Vec<i64> = svc
            .list_domains()
            .await
            .unwrap()
            .iter()
            .map(|d| d.urutan)
            .collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[tokio::test]
    async fn aspects_embed_domain() {
        let svc = test_service().await;
        seed_reference(&svc).await;

        let aspects = svc.list_aspects().await.unwrap();
        assert_eq!(aspects.len(), 2);
        assert_eq!(aspects[0].aspect.nama_aspek, "Kebijakan Internal");
        assert_eq!(
            aspects[0].domain.as_ref().map(|d| d.nama_domain.as_str()),
            Some("Kebijakan SPBE")
        );
        assert_eq!(
            aspects[1].domain.as_ref().map(|d| d.id.as_str()),
            Some("dom-2")
        );
    }
}
