//! Trait definitions describing Cloud Foundry resources.
//!
//! Each resource type declares where it lives in the API and which
//! mutating operations its endpoint supports. The generic
//! [`ResourceClient`](crate::ResourceClient) turns these declarations into
//! concrete CRUD calls.

mod create;
mod delete;
mod resource;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use resource::Resource;
pub use update::Update;
