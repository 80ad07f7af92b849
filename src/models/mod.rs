//! Cloud Foundry V3 resource types.

mod app;
mod common;
mod job;
mod organization;
mod role;
mod route;
mod service_credential_binding;
mod space;

pub use app::*;
pub use common::*;
pub use job::*;
pub use organization::*;
pub use role::*;
pub use route::*;
pub use service_credential_binding::*;
pub use space::*;
