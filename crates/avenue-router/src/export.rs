//! Static export.
//!
//! Builds the map of concrete paths to pages that a static site export
//! writes out. Routes without required parameters export once; routes with
//! them export once per parameter set a [`ParamEnumerator`] yields.

use async_trait::async_trait;
use avenue_pattern::ParamValues;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RouteResult;
use crate::route::Route;
use crate::router::Router;
use crate::store::RouteStore;

/// One exported page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    /// Page to render.
    pub page: String,
    /// Parameters the path was built from.
    pub params: ParamValues,
}

/// Exported paths in export order.
pub type ExportMap = IndexMap<String, ExportEntry>;

/// Lists the parameter sets a route should be exported with.
///
/// Typically backed by a CMS or database query.
#[async_trait]
pub trait ParamEnumerator: Send + Sync {
    /// Parameter sets for `route`. An empty list exports the route only if
    /// it has no required parameters.
    async fn enumerate(&self, route: &Route) -> RouteResult<Vec<ParamValues>>;
}

impl RouteStore {
    /// Builds the export map.
    ///
    /// Routes are visited in registration order and the first route to
    /// produce a path keeps it. Routes with required parameters and no
    /// enumerated sets are skipped.
    pub async fn export_path_map(
        &self,
        enumerator: Option<&dyn ParamEnumerator>,
    ) -> RouteResult<ExportMap> {
        let mut map = ExportMap::new();

        for route in self.iter() {
            let mut sets = match enumerator {
                Some(enumerator) => enumerator.enumerate(route).await?,
                None => Vec::new(),
            };

            if sets.is_empty() {
                if route.path_keys().iter().any(|key| !key.is_optional()) {
                    tracing::debug!(route = %route.name(), "Skipping parameterized route in export");
                    continue;
                }
                sets.push(ParamValues::new());
            }

            for params in sets {
                let path = route.path_for(&params)?;
                map.entry(path).or_insert_with(|| ExportEntry {
                    page: route.page().to_string(),
                    params,
                });
            }
        }

        tracing::debug!(paths = map.len(), "Built export path map");
        Ok(map)
    }
}

impl Router {
    /// Builds the export map of this router's routes. See
    /// [`RouteStore::export_path_map`].
    pub async fn export_path_map(
        &self,
        enumerator: Option<&dyn ParamEnumerator>,
    ) -> RouteResult<ExportMap> {
        self.store().export_path_map(enumerator).await
    }
}
