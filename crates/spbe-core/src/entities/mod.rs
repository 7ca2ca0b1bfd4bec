//! Entity structs for all SPBE domain objects.
//!
//! Each entity maps to a table in the libSQL database. Field names follow the
//! relational columns (`nama_unit`, `status_verifikasi`, ...) so the JSON wire
//! format matches the stored shape. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod aspect;
mod domain;
mod evidence;
mod indicator;
mod profile;
mod unit;
mod verification_log;

pub use aspect::{Aspect, AspectDetail};
pub use domain::Domain;
pub use evidence::{Evidence, EvidenceDetail, PersonRef};
pub use indicator::{Indicator, IndicatorDetail};
pub use profile::Profile;
pub use unit::Unit;
pub use verification_log::{VerificationLogEntry, VerificationLogDetail};
