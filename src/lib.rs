pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{
    build_store, github::GithubStore, local::LocalStore, toml_config::ResolverConfig,
};
pub use crate::core::{
    deck::DeckSetup,
    resolver::{PresentationResolver, Resolution, ResolvedPresentation},
    substitution::substitute,
};
pub use crate::utils::error::{ResolveError, Result};
