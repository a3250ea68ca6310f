pub mod content;
pub mod deck;
pub mod health;
pub mod loader;
pub mod resolver;
pub mod substitution;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    ConfigDocument, ContentBody, FileEntry, FolderListing, HealthStatus, Properties,
};
pub use crate::domain::ports::ContentStore;
pub use crate::utils::error::Result;
