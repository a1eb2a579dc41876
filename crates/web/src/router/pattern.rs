//! Route pattern representation and structural matching.
//!
//! A pattern is a sequence of tagged segments: literals match themselves,
//! wildcards match any single path segment and record it under their name.
//! Comparing segments structurally keeps matching free of index arithmetic
//! on raw strings and would generalize to a prefix tree without changing the
//! contract.

use minnow_http::protocol::PathParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Wildcard(String),
}

/// Splits a pattern into tagged segments. A `{name}` part becomes a wildcard
/// carrying its name; everything else is literal. The index pattern `/`
/// yields a single empty literal, so it matches exactly the path `/`.
pub(crate) fn parse_pattern(pattern: &str) -> Vec<Segment> {
    pattern
        .strip_prefix('/')
        .unwrap_or(pattern)
        .split('/')
        .map(|part| match part.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            Some(name) => Segment::Wildcard(name.to_string()),
            None => Segment::Literal(part.to_string()),
        })
        .collect()
}

/// Two patterns share a route when their segment counts match and every
/// position agrees on literal text or wildcard-ness. Wildcard names don't
/// participate, `/echo/{a}` and `/echo/{b}` are the same shape.
pub(crate) fn shape_eq(left: &[Segment], right: &[Segment]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|(a, b)| match (a, b) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Wildcard(_), Segment::Wildcard(_)) => true,
            _ => false,
        })
}

/// Matches a concrete path against a pattern, binding wildcards in
/// left-to-right order. Returns `None` unless every segment matches
/// positionally and the counts are equal.
pub(crate) fn match_path(segments: &[Segment], path: &str) -> Option<PathParams> {
    let parts: Vec<&str> = path.strip_prefix('/').unwrap_or(path).split('/').collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut bindings = Vec::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Literal(literal) => {
                if literal != part {
                    return None;
                }
            }
            Segment::Wildcard(name) => bindings.push((name.clone(), part.to_string())),
        }
    }

    Some(PathParams::new(bindings))
}
