//! Entity id helpers
//!
//! Entity ids have the form `<domain>.<object_id>`, both parts made of
//! lower-case ASCII letters, digits and underscores.

/// Split an entity id into `(domain, object_id)`.
///
/// Splits on the first `.`. An id without a dot yields an empty object id.
pub fn split_entity_id(entity_id: &str) -> (&str, &str) {
    entity_id.split_once('.').unwrap_or((entity_id, ""))
}

/// Domain part of an entity id, if the id has one.
pub fn domain_of(entity_id: &str) -> Option<&str> {
    entity_id.split_once('.').map(|(domain, _)| domain)
}

fn valid_slug(part: &str) -> bool {
    !part.is_empty()
        && part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        && !part.starts_with('_')
        && !part.ends_with('_')
}

/// Test whether an entity id is well formed.
///
/// No double underscores anywhere; neither part may start or end with an
/// underscore.
pub fn valid_entity_id(entity_id: &str) -> bool {
    if entity_id.contains("__") {
        return false;
    }
    match entity_id.split_once('.') {
        Some((domain, object_id)) => valid_slug(domain) && valid_slug(object_id),
        None => false,
    }
}
