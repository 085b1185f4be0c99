//! Route table and lookup.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching a location
//! - Return the match or an explicit no-match
//!
//! # Design Decisions
//! - First registered match wins, even when later patterns overlap
//! - O(n) scan (route counts are tiny)
//! - Exact duplicate patterns are legal but warned about, they can never fire

use std::fmt;

use thiserror::Error;

use crate::routing::matcher::{RouteParams, RoutePattern};

/// A view handler invoked with the groups of its matched location.
pub type Handler = Box<dyn Fn(&RouteParams) + Send + Sync>;

/// Errors raised while building a route table.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Result of a successful lookup.
pub struct RouteMatch<'a> {
    /// Registration index of the matched route.
    pub index: usize,
    /// Pattern of the matched route, as registered.
    pub pattern: &'a str,
    /// Captured groups.
    pub params: RouteParams,
    handler: &'a Handler,
}

impl RouteMatch<'_> {
    /// Invoke the matched route's handler.
    pub fn invoke(&self) {
        (self.handler)(&self.params);
    }
}

/// Ordered list of (pattern, handler) pairs.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Earlier routes take precedence over this one.
    pub fn add_route<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&RouteParams) + Send + Sync + 'static,
    {
        let compiled = RoutePattern::new(pattern).map_err(|source| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        if let Some(earlier) = self.routes.iter().position(|r| r.pattern.as_str() == pattern) {
            tracing::warn!(
                pattern = %pattern,
                shadowed_by = earlier,
                "Duplicate route pattern registered, it will never match"
            );
        }

        self.routes.push(Route {
            pattern: compiled,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    /// Find the first route whose pattern matches all of `location`.
    pub fn match_location(&self, location: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().enumerate().find_map(|(index, route)| {
            route.pattern.captures(location).map(|params| RouteMatch {
                index,
                pattern: route.pattern.as_str(),
                params,
                handler: &route.handler,
            })
        })
    }

    /// Registered patterns in precedence order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
