//! Minimal JSON Path resolution for token links.
//!
//! Supported syntax: `$` root, `.name` / `['name']` children, `[n]` array
//! indices (negative counts from the end), `.*` / `[*]` wildcards and `..name`
//! recursive descent. Filters and slices are not supported.

use serde_json::Value;
use thiserror::Error;

/// A path expression that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid JSON path '{path}': {reason}")]
pub struct JsonPathError {
    pub path: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Child(String),
    Index(i64),
    Wildcard,
    Descendant(String),
}

/// Resolve `path` against `root`, returning every matched value in document order.
///
/// A well-formed path that matches nothing yields an empty vector.
pub fn query<'a>(root: &'a Value, path: &str) -> Result<Vec<&'a Value>, JsonPathError> {
    let segments = parse(path)?;
    let mut current = vec![root];

    for segment in &segments {
        let mut next = Vec::new();
        for value in current {
            match segment {
                Segment::Child(name) => {
                    if let Some(child) = value.as_object().and_then(|m| m.get(name)) {
                        next.push(child);
                    }
                }
                Segment::Index(i) => {
                    if let Some(items) = value.as_array() {
                        let idx = if *i < 0 { items.len() as i64 + i } else { *i };
                        if idx >= 0
                            && let Some(item) = items.get(idx as usize)
                        {
                            next.push(item);
                        }
                    }
                }
                Segment::Wildcard => match value {
                    Value::Object(map) => next.extend(map.values()),
                    Value::Array(items) => next.extend(items.iter()),
                    _ => {}
                },
                Segment::Descendant(name) => collect_descendants(value, name, &mut next),
            }
        }
        current = next;
    }

    Ok(current)
}

/// Resolve `path` and return the first match, if any.
pub fn query_first<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, JsonPathError> {
    Ok(query(root, path)?.into_iter().next())
}

fn collect_descendants<'a>(value: &'a Value, name: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if name == "*" || key == name {
                    out.push(child);
                }
                collect_descendants(child, name, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                if name == "*" {
                    out.push(item);
                }
                collect_descendants(item, name, out);
            }
        }
        _ => {}
    }
}

fn parse(path: &str) -> Result<Vec<Segment>, JsonPathError> {
    let err = |reason| JsonPathError {
        path: path.to_string(),
        reason,
    };

    let rest = path.strip_prefix('$').ok_or_else(|| err("must start with '$'"))?;
    let chars: Vec<char> = rest.chars().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '.' => {
                let descendant = chars.get(i + 1) == Some(&'.');
                i += if descendant { 2 } else { 1 };
                let start = i;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                if name.is_empty() {
                    return Err(err("empty member name"));
                }
                segments.push(match (descendant, name.as_str()) {
                    (true, _) => Segment::Descendant(name),
                    (false, "*") => Segment::Wildcard,
                    (false, _) => Segment::Child(name),
                });
            }
            '[' => {
                let mut j = i + 1;
                while chars.get(j).is_some_and(|c| c.is_whitespace()) {
                    j += 1;
                }
                // A quoted name may itself contain ']', so find its closing quote first.
                let (segment, after) = match chars.get(j) {
                    Some(&quote) if quote == '\'' || quote == '"' => {
                        let end = chars[j + 1..]
                            .iter()
                            .position(|c| *c == quote)
                            .map(|p| p + j + 1)
                            .ok_or_else(|| err("unterminated quoted name"))?;
                        let name: String = chars[j + 1..end].iter().collect();
                        (Segment::Child(name), end + 1)
                    }
                    _ => {
                        let end = chars[j..]
                            .iter()
                            .position(|c| *c == ']')
                            .map(|p| p + j)
                            .ok_or_else(|| err("unclosed '['"))?;
                        let inner: String = chars[j..end].iter().collect();
                        let inner = inner.trim();
                        let segment = if inner == "*" {
                            Segment::Wildcard
                        } else {
                            Segment::Index(inner.parse().map_err(|_| err("malformed index"))?)
                        };
                        (segment, end)
                    }
                };
                let mut close = after;
                while chars.get(close).is_some_and(|c| c.is_whitespace()) {
                    close += 1;
                }
                if chars.get(close) != Some(&']') {
                    return Err(err("unclosed '['"));
                }
                segments.push(segment);
                i = close + 1;
            }
            _ => return Err(err("unexpected character")),
        }
    }

    Ok(segments)
}
