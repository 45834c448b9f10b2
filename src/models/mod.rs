pub mod demanda;
pub mod profile;
pub mod auth;
pub mod filters;
pub mod timestamp;

pub use demanda::{Demanda, DemandaStatus, DemandaPatch, DemandaEdit, NewDemanda, DEFAULT_HORAS_ESTIMADAS};
pub use profile::{Profile, ProfileUpsert, Cargo};
pub use auth::{AuthSession, AuthUser};
pub use filters::*;
