//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → QCD_API_BASE / --api-base override (read once)
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//!     → SourceConfig handed to the data layer
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - All fields have defaults so an absent file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::DashboardConfig;
pub use schema::ObservabilityConfig;
pub use schema::SourceConfig;
