//! # Route Table
//!
//! Resolves a request method and path to a declared operation.

use indexmap::IndexMap;

use crate::descriptor::{ApiDocument, DescriptorResult, HttpMethod, RoutedOperation};

/// Declared operations behind a base path
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_path: String,
    routes: Vec<RoutedOperation>,
}

impl RouteTable {
    pub fn from_document(document: &ApiDocument) -> DescriptorResult<Self> {
        Ok(Self {
            base_path: document.base_path().to_string(),
            routes: document.operations()?,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn routes(&self) -> &[RoutedOperation] {
        &self.routes
    }

    /// Path relative to the base path, if the request is under it
    pub fn strip_base<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.base_path.is_empty() {
            return Some(path);
        }
        let head = path.get(..self.base_path.len())?;
        if !head.eq_ignore_ascii_case(&self.base_path) {
            return None;
        }
        let rest = &path[self.base_path.len()..];
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Find the operation for `method` at `path`.
    ///
    /// The most specific template (fewest parameters) wins; HEAD falls
    /// back to the GET operation.
    pub fn resolve(
        &self,
        method: HttpMethod,
        path: &str,
    ) -> Option<(&RoutedOperation, IndexMap<String, String>)> {
        let relative = self.strip_base(path)?;

        let mut candidates: Vec<(&RoutedOperation, IndexMap<String, String>)> = self
            .routes
            .iter()
            .filter_map(|route| route.template.matches(relative).map(|params| (route, params)))
            .collect();
        candidates.sort_by_key(|(route, _)| route.template.param_count());

        let pick = |wanted: HttpMethod| {
            candidates
                .iter()
                .position(|(route, _)| route.method == wanted)
        };

        let index = match (pick(method), method) {
            (Some(index), _) => Some(index),
            (None, HttpMethod::Head) => pick(HttpMethod::Get),
            (None, _) => None,
        }?;
        Some(candidates.swap_remove(index))
    }

    /// The request path spelled the way the document declares it.
    ///
    /// Matching ignores case, so this is the key the collection is stored
    /// under whatever casing the request used.
    pub fn canonical_path(&self, route: &RoutedOperation, params: &IndexMap<String, String>) -> String {
        let path = format!("{}{}", self.base_path, route.template.render(params));
        if path.is_empty() {
            "/".to_string()
        } else {
            path
        }
    }
}
