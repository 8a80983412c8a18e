//! # Operation Declarations

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterDescriptor;
use super::schema::Schema;

/// HTTP methods an operation can be declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// HEAD and OPTIONS responses never carry a body
    pub fn suppresses_body(&self) -> bool {
        matches!(self, HttpMethod::Head | HttpMethod::Options)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "PUT" => Ok(HttpMethod::Put),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(format!("Unsupported HTTP method: {}", other)),
        }
    }
}

/// Declared response header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    #[serde(rename = "type", default)]
    pub header_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Declared response for one status code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub schema: Option<Schema>,

    #[serde(default)]
    pub headers: IndexMap<String, HeaderDescriptor>,
}

impl ResponseDescriptor {
    /// A response with the given schema and no headers
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            ..Default::default()
        }
    }

    /// Declare a response header
    pub fn with_header(mut self, name: impl Into<String>) -> Self {
        self.headers.insert(
            name.into(),
            HeaderDescriptor {
                header_type: Some("string".to_string()),
                description: None,
            },
        );
        self
    }

    /// Whether a header is declared (case-insensitive)
    pub fn declares_header(&self, name: &str) -> bool {
        self.headers.keys().any(|h| h.eq_ignore_ascii_case(name))
    }
}

/// A declared API operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationDescriptor {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    #[serde(default)]
    pub responses: IndexMap<String, ResponseDescriptor>,
}

impl OperationDescriptor {
    /// An operation with the given id
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: Some(operation_id.into()),
            ..Default::default()
        }
    }

    /// Add a parameter
    pub fn with_parameter(mut self, param: ParameterDescriptor) -> Self {
        self.parameters.push(param);
        self
    }

    /// Add a response
    pub fn with_response(mut self, status: u16, response: ResponseDescriptor) -> Self {
        self.responses.insert(status.to_string(), response);
        self
    }

    /// Parameters declared `in: query`
    pub fn query_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.is_query())
    }

    /// The success response: the lowest declared 2xx code, then
    /// `default`, else a plain 200 without schema.
    pub fn success_response(&self) -> (u16, Option<&ResponseDescriptor>) {
        let lowest_2xx = self
            .responses
            .iter()
            .filter_map(|(code, response)| code.parse::<u16>().ok().map(|c| (c, response)))
            .filter(|(code, _)| (200..300).contains(code))
            .min_by_key(|(code, _)| *code);

        if let Some((code, response)) = lowest_2xx {
            return (code, Some(response));
        }

        match self.responses.get("default") {
            Some(response) => (200, Some(response)),
            None => (200, None),
        }
    }

    /// Merge path-level parameters; operation-level declarations win
    pub fn merge_path_parameters(&mut self, path_params: &[ParameterDescriptor]) {
        for param in path_params {
            let declared = self
                .parameters
                .iter()
                .any(|p| p.name == param.name && p.location == param.location);
            if !declared {
                self.parameters.push(param.clone());
            }
        }
    }

    /// Whether the operation accepts multipart uploads
    pub fn consumes_multipart(&self) -> bool {
        self.consumes
            .iter()
            .any(|c| c.starts_with("multipart/form-data"))
    }
}
