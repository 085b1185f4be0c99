//! Client core of the QCD operational dashboard.
//!
//! Turns location fragments into views and assembles the data those views
//! read from an API gateway, falling back to a static JSON tree.

pub mod config;
pub mod data;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::DashboardConfig;
pub use data::{DashboardData, DataSession, HttpLoader};
pub use routing::{NavigationController, RouteTable};
pub use views::{dashboard_routes, open_dashboard, DashboardError, View, ViewRenderer};
