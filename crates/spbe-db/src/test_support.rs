//! Shared test utilities for spbe-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use spbe_core::entities::{Aspect, Domain, Indicator, Profile, Unit};
    use spbe_core::enums::Role;

    use crate::SpbeDb;
    use crate::repos::evidence::NewEvidence;
    use crate::repos::profile::NewProfile;
    use crate::repos::seed::ReferenceData;
    use crate::service::SpbeService;

    pub const UNIT_A: &str = "5";
    pub const UNIT_B: &str = "7";

    /// Create an in-memory SpbeService.
    pub async fn test_service() -> SpbeService {
        let db = SpbeDb::open_local(":memory:").await.unwrap();
        SpbeService::from_db(db)
    }

    fn unit(id: &str, nama_unit: &str, kode_unit: &str) -> Unit {
        Unit {
            id: id.into(),
            nama_unit: nama_unit.into(),
            kode_unit: kode_unit.into(),
        }
    }

    fn indicator(id: &str, aspek_id: &str, unit: Option<&str>, kode: &str, urutan: i64) -> Indicator {
        Indicator {
            id: id.into(),
            aspek_id: aspek_id.into(),
            unit_kerja_id: unit.map(String::from),
            kode_indikator: kode.into(),
            nama_indikator: format!("Indikator {kode}"),
            deskripsi: None,
            urutan,
        }
    }

    /// Two units, two domains, two aspects, three indicators (`ind-2` scoped to unit A).
    pub fn reference_data() -> ReferenceData {
        ReferenceData {
            unit_kerja: vec![
                unit(UNIT_A, "Dinas Kominfo", "DISKOMINFO"),
                unit(UNIT_B, "Badan Perencanaan", "BAPPEDA"),
            ],
            domain_spbe: vec![
                Domain {
                    id: "dom-2".into(),
                    nama_domain: "Tata Kelola SPBE".into(),
                    deskripsi: None,
                    urutan: 2,
                },
                Domain {
                    id: "dom-1".into(),
                    nama_domain: "Kebijakan SPBE".into(),
                    deskripsi: Some("Kebijakan internal terkait tata kelola SPBE".into()),
                    urutan: 1,
                },
            ],
            aspek_spbe: vec![
                Aspect {
                    id: "asp-1".into(),
                    domain_id: "dom-1".into(),
                    nama_aspek: "Kebijakan Internal".into(),
                    urutan: 1,
                },
                Aspect {
                    id: "asp-2".into(),
                    domain_id: "dom-2".into(),
                    nama_aspek: "Perencanaan Strategis".into(),
                    urutan: 2,
                },
            ],
            indikator_spbe: vec![
                indicator("ind-1", "asp-1", None, "I.1", 1),
                indicator("ind-2", "asp-1", Some(UNIT_A), "I.2", 2),
                indicator("ind-3", "asp-2", None, "I.3", 3),
            ],
        }
    }

    pub async fn seed_reference(svc: &SpbeService) {
        svc.seed_reference(&reference_data()).await.unwrap();
    }

    /// Mirror a user with a predictable email (`{id}@example.go.id`).
    pub async fn create_user(svc: &SpbeService, id: &str, role: Role, unit: Option<&str>) -> Profile {
        svc.create_profile(&NewProfile {
            id: id.into(),
            email: format!("{id}@example.go.id"),
            nama_lengkap: format!("Pengguna {id}"),
            role,
            unit_kerja_id: unit.map(String::from),
        })
        .await
        .unwrap()
    }

    pub fn new_evidence(indikator_id: &str) -> NewEvidence {
        NewEvidence {
            indikator_id: Some(indikator_id.into()),
            nama_file: Some("kebijakan.pdf".into()),
            file_path: Some("5/1700000000000_kebijakan.pdf".into()),
            file_size: Some(2048),
            file_type: Some("application/pdf".into()),
            deskripsi: Some("Peraturan kepala daerah".into()),
            tahun_data: Some(2024),
        }
    }

    /// Like [`new_evidence`] with the blob stored under `unit`.
    pub fn new_evidence_in(indikator_id: &str, unit: &str) -> NewEvidence {
        NewEvidence {
            file_path: Some(format!("{unit}/1700000000000_kebijakan.pdf")),
            ..new_evidence(indikator_id)
        }
    }
}
