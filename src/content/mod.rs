//! Site content: data model, id generation and the in-memory store.

mod id;
pub mod model;
mod store;

pub use id::IdGenerator;
pub use model::{Project, SiteContent};
pub use store::ContentStore;
