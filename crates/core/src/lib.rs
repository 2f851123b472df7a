pub mod cache;
pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod registry;
pub mod resolver;

pub use cache::ScopeDataCache;
pub use config::ResolverConfig;
pub use error::{Result, ScopeDataError};
pub use registry::{ClassRegistry, ClassRegistryBuilder};
pub use resolver::ScopeDataResolver;
