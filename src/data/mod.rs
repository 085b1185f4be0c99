//! Data acquisition subsystem.
//!
//! # Data Flow
//! ```text
//! DataSession::ready()
//!     → acquisition.rs (one shared attempt)
//!         → source.rs (primary request set: nine API resources)
//!         → loader.rs (all loads concurrently, wait for every one)
//!         → any failure? discard everything
//!             → source.rs (fallback request set: ten static files)
//!             → loader.rs (all loads concurrently)
//!             → any failure? AcquisitionError, nothing published
//!     → model.rs (RawDatasets assembled from the winning phase)
//!     → index.rs (derived joins, built once)
//!     → snapshot.rs (DashboardData, immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - All-or-nothing per phase: a snapshot never mixes primary and fallback data
//! - The session has a single writer and is never cleared
//! - Lookups across datasets return `Option`; "not found" is a normal outcome

pub mod acquisition;
pub mod index;
pub mod loader;
pub mod model;
pub mod snapshot;
pub mod source;

pub use acquisition::{AcquisitionError, DataSession};
pub use index::{DerivedIndex, RegionRole, ResolvedClusterRegion};
pub use loader::{HttpLoader, LoadError, Loader};
pub use model::{Cluster, ClusterRegion, DatasetKey, RawDatasets, RegionRoles, Service};
pub use snapshot::DashboardData;
pub use source::{LoadRequest, Resource, Source, SourceKind};
