//! # API Document
//!
//! Loads a Swagger 2.0 shaped JSON document (inline schemas only) and
//! flattens it into routed operations.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::{DescriptorError, DescriptorResult};
use super::operation::{HttpMethod, OperationDescriptor};
use super::parameter::ParameterDescriptor;
use super::template::PathTemplate;

/// Operations declared for one path
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<OperationDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<OperationDescriptor>,
}

impl PathItem {
    /// Declared operations in method order
    pub fn operations(&self) -> Vec<(HttpMethod, &OperationDescriptor)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

/// The API descriptor document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(rename = "basePath", default)]
    pub base_path: Option<String>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// An operation bound to its method and path template
#[derive(Debug, Clone)]
pub struct RoutedOperation {
    pub method: HttpMethod,
    pub template: PathTemplate,
    pub operation: OperationDescriptor,
}

impl RoutedOperation {
    pub fn operation_id(&self) -> Option<&str> {
        self.operation.operation_id.as_deref()
    }
}

impl ApiDocument {
    /// Load a document from disk
    pub fn load(path: impl AsRef<Path>) -> DescriptorResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a document from JSON text
    pub fn from_json(content: &str) -> DescriptorResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Base path without a trailing slash (empty for the root)
    pub fn base_path(&self) -> &str {
        self.base_path
            .as_deref()
            .map(|p| p.trim_end_matches('/'))
            .unwrap_or("")
    }

    /// Flatten every declared operation, merging path-level parameters.
    ///
    /// Fails on malformed templates and on operation ids declared twice.
    pub fn operations(&self) -> DescriptorResult<Vec<RoutedOperation>> {
        let mut seen = HashSet::new();
        let mut routed = Vec::new();

        for (path, item) in &self.paths {
            let template = PathTemplate::parse(path)?;

            for (method, op) in item.operations() {
                let mut operation = op.clone();
                operation.merge_path_parameters(&item.parameters);

                if let Some(id) = &operation.operation_id {
                    if !seen.insert(id.clone()) {
                        return Err(DescriptorError::DuplicateOperationId(id.clone()));
                    }
                }

                routed.push(RoutedOperation {
                    method,
                    template: template.clone(),
                    operation,
                });
            }
        }

        Ok(routed)
    }
}
