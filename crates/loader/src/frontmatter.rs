use crate::error::{LoaderError, Result};
use crate::types::{Priority, SkillMetadata};
use std::collections::HashMap;
use std::path::Path;

const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Scalar(String),
    List(Vec<String>),
}

/// Read a skill document from disk and split it into metadata and body
pub fn read_document(path: &Path) -> Result<(SkillMetadata, String)> {
    let text = std::fs::read_to_string(path).map_err(|e| LoaderError::read(path, e))?;
    Ok(parse_document(&text))
}

/// Split document text into front-matter metadata and trimmed body.
///
/// A document without an opening `---` line, or whose block is never closed,
/// is treated as body only and gets default metadata.
pub fn parse_document(text: &str) -> (SkillMetadata, String) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();

    let opens = lines
        .first()
        .is_some_and(|line| line.trim() == DELIMITER);
    if opens {
        let close = lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == DELIMITER)
            .map(|offset| offset + 1);
        if let Some(end) = close {
            let fields = parse_fields(&lines[1..end]);
            let metadata = metadata_from_fields(fields);
            let body = lines[end + 1..].join("\n").trim().to_string();
            return (metadata, body);
        }
        log::debug!("Unterminated front-matter block; treating document as body");
    }

    (SkillMetadata::default(), text.trim().to_string())
}

fn parse_fields(lines: &[&str]) -> HashMap<String, Value> {
    let mut fields: HashMap<String, Value> = HashMap::new();
    let mut list_key: Option<String> = None;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(item) = line.strip_prefix("- ") {
            let open_list = list_key.as_ref().and_then(|key| fields.get_mut(key));
            if let Some(Value::List(items)) = open_list {
                items.push(item.trim().to_string());
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if value.is_empty() {
            fields.insert(key.clone(), Value::List(Vec::new()));
            list_key = Some(key);
            continue;
        }

        list_key = None;
        let parsed = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            Some(inner) => Value::List(
                inner
                    .split(',')
                    .map(|item| strip_quotes(item.trim()).to_string())
                    .filter(|item| !item.is_empty())
                    .collect(),
            ),
            None => Value::Scalar(strip_quotes(value).to_string()),
        };
        fields.insert(key, parsed);
    }

    fields
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

fn metadata_from_fields(mut fields: HashMap<String, Value>) -> SkillMetadata {
    let mut metadata = SkillMetadata::default();

    if let Some(name) = fields.remove("name").and_then(scalar) {
        metadata.name = name;
    }
    if let Some(description) = fields.remove("description").and_then(scalar) {
        metadata.description = description;
    }
    if let Some(version) = fields.remove("version").and_then(scalar) {
        if !version.is_empty() {
            metadata.version = Some(version);
        }
    }
    if let Some(priority) = fields.remove("priority").and_then(scalar) {
        match priority.parse::<Priority>() {
            Ok(parsed) => metadata.priority = parsed,
            Err(err) => log::debug!("{err}; defaulting to medium"),
        }
    }
    if let Some(tags) = fields.remove("tags") {
        let items = match tags {
            Value::List(items) => items,
            Value::Scalar(value) => value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        };
        let mut seen = Vec::with_capacity(items.len());
        for tag in items {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        metadata.tags = seen;
    }

    metadata
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Scalar(s) => Some(s),
        Value::List(items) if items.is_empty() => None,
        Value::List(items) => Some(items.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_inline_lists_and_scalars() {
        let text = r#"---
name: alpha-skill
description: Alpha description
tags: [alpha, "test"]
priority: high
version: "1.2"
---

Hello world
"#;
        let (metadata, body) = parse_document(text);
        assert_eq!(
            metadata,
            SkillMetadata {
                name: "alpha-skill".to_string(),
                description: "Alpha description".to_string(),
                tags: vec!["alpha".to_string(), "test".to_string()],
                priority: Priority::High,
                version: Some("1.2".to_string()),
            }
        );
        assert_eq!(body, "Hello world");
    }

    #[test]
    fn parses_dash_list_items() {
        let text = "---\nname: beta\ntags:\n  - fastapi\n  - api\npriority: low\n---\nBody";
        let (metadata, body) = parse_document(text);
        assert_eq!(metadata.tags, vec!["fastapi", "api"]);
        assert_eq!(metadata.priority, Priority::Low);
        assert_eq!(body, "Body");
    }

    #[test]
    fn dash_items_after_scalar_are_ignored() {
        let text = "---\nname: beta\n- stray\n---\nBody";
        let (metadata, _) = parse_document(text);
        assert_eq!(metadata.name, "beta");
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn missing_frontmatter_yields_defaults() {
        let (metadata, body) = parse_document("  Just a body\n\n");
        assert_eq!(metadata, SkillMetadata::default());
        assert_eq!(body, "Just a body");
    }

    #[test]
    fn unterminated_frontmatter_is_body() {
        let text = "---\nname: broken\nstill body";
        let (metadata, body) = parse_document(text);
        assert_eq!(metadata, SkillMetadata::default());
        assert_eq!(body, text);
    }

    #[test]
    fn unknown_priority_defaults_to_medium() {
        let (metadata, _) = parse_document("---\npriority: urgent\n---\nx");
        assert_eq!(metadata.priority, Priority::Medium);
    }

    #[test]
    fn scalar_tags_split_on_commas() {
        let (metadata, _) = parse_document("---\ntags: rust, async\n---\nx");
        assert_eq!(metadata.tags, vec!["rust", "async"]);
    }

    #[test]
    fn handles_crlf_and_bom() {
        let text = "\u{feff}---\r\nname: win\r\n---\r\nBody line\r\n";
        let (metadata, body) = parse_document(text);
        assert_eq!(metadata.name, "win");
        assert_eq!(body, "Body line");
    }
}
