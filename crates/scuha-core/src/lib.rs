//! Scuha Core - catalog, filtering, pagination and saved state for the arcade frontend
//!
//! Nothing in here touches the DOM; the frontend crate drives a
//! [`CatalogManager`] and executes the [`RenderCommand`]s it returns.

pub mod card;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod manager;
pub mod pagination;
pub mod persist;

pub use card::{CardModel, StarRating};
pub use catalog::{Catalog, Category, GameRecord};
pub use config::CatalogConfig;
pub use error::{CardError, CatalogError, ConfigError, StorageError};
pub use filter::{filter_records, Filter, SearchTerm};
pub use manager::{CatalogManager, LoadMoreControl, PendingCard, RenderCommand};
pub use pagination::Paginator;
pub use persist::{KeyValueStore, MemoryStore, Persistence};
