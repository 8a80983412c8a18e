//! # Path Templates
//!
//! Matches request paths against templates such as
//! `/pets/{PetName}/photos`.

use indexmap::IndexMap;

use super::errors::{DescriptorError, DescriptorResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template
    pub fn parse(template: &str) -> DescriptorResult<Self> {
        let mut segments = Vec::new();

        for part in split_segments(template) {
            if let Some(inner) = part.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .filter(|name| !name.is_empty() && !name.contains(['{', '}']))
                    .ok_or_else(|| DescriptorError::InvalidTemplate(template.to_string()))?;
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains(['{', '}']) {
                return Err(DescriptorError::InvalidTemplate(template.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of templated segments; fewer means more specific
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Match a request path, returning the captured parameters.
    ///
    /// Literal segments compare case-insensitively; a trailing slash on
    /// the path is ignored.
    pub fn matches(&self, path: &str) -> Option<IndexMap<String, String>> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = IndexMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit.eq_ignore_ascii_case(part) => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// The path this template describes for `params`, in the template's
    /// own casing. Empty for the root template.
    pub fn render(&self, params: &IndexMap<String, String>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(lit) => format!("/{}", lit),
                Segment::Param(name) => match params.get(name) {
                    Some(value) => format!("/{}", value),
                    None => format!("/{{{}}}", name),
                },
            })
            .collect()
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let template = PathTemplate::parse("/pets").unwrap();
        assert!(template.matches("/pets").is_some());
        assert!(template.matches("/pets/").is_some());
        assert!(template.matches("/Pets").is_some());
        assert!(template.matches("/pets/Fido").is_none());
    }

    #[test]
    fn test_param_capture() {
        let template = PathTemplate::parse("/pets/{PetName}/photos").unwrap();
        let params = template.matches("/pets/Fido/photos").unwrap();
        assert_eq!(params.get("PetName").map(String::as_str), Some("Fido"));
        assert_eq!(template.param_count(), 1);
        assert!(template.matches("/pets/Fido").is_none());
    }

    #[test]
    fn test_root_template() {
        let template = PathTemplate::parse("/").unwrap();
        assert!(template.matches("/").is_some());
        assert!(template.matches("").is_some());
    }

    #[test]
    fn test_render_uses_declared_casing() {
        let template = PathTemplate::parse("/pets/{PetName}/photos").unwrap();
        let params = template.matches("/PETS/Fido/Photos/").unwrap();
        assert_eq!(template.render(&params), "/pets/Fido/photos");

        let root = PathTemplate::parse("/").unwrap();
        assert_eq!(root.render(&IndexMap::new()), "");
    }

    #[test]
    fn test_invalid_templates() {
        assert!(PathTemplate::parse("/pets/{PetName").is_err());
        assert!(PathTemplate::parse("/pets/{}").is_err());
        assert!(PathTemplate::parse("/pets/a}b").is_err());
    }
}
