//! Shared fixtures for handler and workflow tests.

use std::sync::Arc;

use async_trait::async_trait;
use spbe_auth::{IdentityProvider, LocalIdentityProvider};
use spbe_config::SpbeConfig;
use spbe_core::entities::{Aspect, Domain, Indicator, Profile, Unit};
use spbe_core::enums::Role;
use spbe_db::repos::evidence::NewEvidence;
use spbe_db::repos::profile::NewProfile;
use spbe_db::repos::seed::ReferenceData;
use spbe_db::service::SpbeService;
use spbe_storage::{BlobStore, ObjectBlobStore, StorageError, StorageResult};

use crate::http::AppState;

pub const UNIT_A: &str = "5";
pub const UNIT_B: &str = "7";
pub const PASSWORD: &str = "rahasia";

/// Blob store whose deletes always fail.
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    fn bucket(&self) -> &str {
        "bukti_dukung_spbe"
    }

    async fn put(&self, _path: &str, _data: Vec<u8>, _content_type: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn get(&self, path: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(path.to_string()))
    }

    async fn exists(&self, _path: &str) -> StorageResult<bool> {
        Ok(false)
    }

    async fn delete(&self, _path: &str) -> StorageResult<()> {
        Err(StorageError::Configuration("blob store offline".into()))
    }
}

fn reference_data() -> ReferenceData {
    let unit = |id: &str, nama_unit: &str, kode_unit: &str| Unit {
        id: id.into(),
        nama_unit: nama_unit.into(),
        kode_unit: kode_unit.into(),
    };
    let indicator = |id: &str, unit: Option<&str>, kode: &str, urutan| Indicator {
        id: id.into(),
        aspek_id: "asp-1".into(),
        unit_kerja_id: unit.map(String::from),
        kode_indikator: kode.into(),
        nama_indikator: format!("Indikator {kode}"),
        deskripsi: None,
        urutan,
    };
    ReferenceData {
        unit_kerja: vec![
            unit(UNIT_A, "Dinas Kominfo", "DISKOMINFO"),
            unit(UNIT_B, "Badan Perencanaan", "BAPPEDA"),
        ],
        domain_spbe: vec![Domain {
            id: "dom-1".into(),
            nama_domain: "Kebijakan SPBE".into(),
            deskripsi: None,
            urutan: 1,
        }],
        aspek_spbe: vec![Aspect {
            id: "asp-1".into(),
            domain_id: "dom-1".into(),
            nama_aspek: "Kebijakan Internal".into(),
            urutan: 1,
        }],
        indikator_spbe: vec![
            indicator("ind-1", None, "I.1", 1),
            indicator("ind-2", Some(UNIT_A), "I.2", 2),
        ],
    }
}

/// In-memory database with reference data, in-memory blobs, local identities.
pub async fn seeded_state() -> AppState {
    seeded_state_with(Arc::new(ObjectBlobStore::in_memory("bukti_dukung_spbe"))).await
}

pub async fn seeded_state_with(blobs: Arc<dyn BlobStore>) -> AppState {
    let db = Arc::new(SpbeService::new_local(":memory:").await.unwrap());
    db.seed_reference(&reference_data()).await.unwrap();
    let idp: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::new(
        Arc::clone(&db),
        chrono::Duration::hours(1),
    ));
    AppState::new(db, blobs, idp, SpbeConfig::default())
}

/// Profile row only, without credentials.
pub async fn create_user(state: &AppState, id: &str, role: Role, unit: Option<&str>) -> Profile {
    state
        .db
        .create_profile(&NewProfile {
            id: id.into(),
            email: format!("{id}@example.go.id"),
            nama_lengkap: format!("Pengguna {id}"),
            role,
            unit_kerja_id: unit.map(String::from),
        })
        .await
        .unwrap()
}

/// Register, mirror and log in a user. Returns the bearer token.
pub async fn login_as(state: &AppState, name: &str, role: Role, unit: Option<&str>) -> String {
    let email = format!("{name}@example.go.id");
    let identity = state.idp.register(&email, PASSWORD).await.unwrap();
    state
        .db
        .create_profile(&NewProfile {
            id: identity.id,
            email: identity.email,
            nama_lengkap: format!("Pengguna {name}"),
            role,
            unit_kerja_id: unit.map(String::from),
        })
        .await
        .unwrap();
    let (_, session) = state.idp.authenticate(&email, PASSWORD).await.unwrap();
    session.access_token
}

pub fn evidence_payload(indikator_id: &str, file_path: &str) -> NewEvidence {
    NewEvidence {
        indikator_id: Some(indikator_id.into()),
        nama_file: Some("kebijakan.pdf".into()),
        file_path: Some(file_path.into()),
        file_size: Some(4),
        file_type: Some("application/pdf".into()),
        deskripsi: Some("Perbup SPBE".into()),
        tahun_data: Some(2024),
    }
}
