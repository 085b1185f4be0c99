//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     (pattern, handler) pairs
//!     → matcher.rs (compile anchored pattern)
//!     → router.rs (append to ordered table)
//!     → handed to navigation.rs, frozen from then on
//!
//! Location change ("#/clusters/abc"):
//!     → navigation.rs (state check)
//!     → router.rs (first match in registration order)
//!     → handler(params) or no-op
//! ```
//!
//! # Design Decisions
//! - Registration order is precedence: first match wins
//! - Patterns are anchored so a short route cannot claim a longer one's prefix
//! - No match is not an error; the current view is left untouched
//! - Dispatch is synchronous, one location at a time

pub mod matcher;
pub mod navigation;
pub mod router;

pub use matcher::{RouteParams, RoutePattern};
pub use navigation::{Dispatch, NavigationController, NavigationState};
pub use router::{Handler, RouteError, RouteMatch, RouteTable};
