//! Include/exclude entity filter
//!
//! An [`EntityFilter`] decides whether an entity id should appear in the
//! logbook. It is built from include/exclude sets of domains, entity ids and
//! entity globs, and evaluated case by case:
//!
//! 1. nothing configured: everything passes
//! 2. includes only: pass if included
//! 3. excludes only: pass unless excluded
//! 4. both:
//!    - (a) include domains or globs present: an included domain passes
//!      unless the entity is excluded by id or glob; an entity included by id
//!      or glob passes unless excluded by id, domain or glob; otherwise only
//!      entities included by id pass
//!    - (b) exclude domains or globs present (but no include domains/globs):
//!      an excluded domain/glob passes only entities included by id; anything
//!      else passes unless excluded by id
//!    - (c) otherwise only entities included by id pass
//!
//! Events without an entity are filtered through pseudo ids such as
//! `homeassistant._` or `<domain>._`.

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::config::FilterSpec;
use crate::entity_id::split_entity_id;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
struct Selector {
    domains: FxHashSet<String>,
    entities: FxHashSet<String>,
    globs: Vec<Regex>,
}

impl Selector {
    fn from_spec(spec: &FilterSpec) -> Result<Self> {
        Ok(Self {
            domains: spec.domains.iter().cloned().collect(),
            entities: spec.entities.iter().cloned().collect(),
            globs: spec
                .entity_globs
                .iter()
                .map(|glob| glob_to_regex(glob))
                .collect::<Result<_>>()?,
        })
    }

    fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.entities.is_empty() && self.globs.is_empty()
    }

    fn glob_match(&self, entity_id: &str) -> bool {
        self.globs.iter().any(|re| re.is_match(entity_id))
    }
}

fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push('^');
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|e| Error::Config {
        message: format!("invalid entity glob {:?}: {}", glob, e),
    })
}

/// Predicate over entity ids built from include/exclude rules.
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    include: Selector,
    exclude: Selector,
}

impl EntityFilter {
    /// Build a filter from include and exclude specs.
    pub fn new(include: &FilterSpec, exclude: &FilterSpec) -> Result<Self> {
        Ok(Self {
            include: Selector::from_spec(include)?,
            exclude: Selector::from_spec(exclude)?,
        })
    }

    /// Filter that only passes the given entity ids.
    pub fn from_entity_ids<I, S>(entity_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Selector {
                entities: entity_ids.into_iter().map(Into::into).collect(),
                ..Selector::default()
            },
            exclude: Selector::default(),
        }
    }

    /// Whether the filter has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Decide whether `entity_id` passes.
    pub fn accepts(&self, entity_id: &str) -> bool {
        let inc = &self.include;
        let exc = &self.exclude;
        let domain = split_entity_id(entity_id).0;

        match (inc.is_empty(), exc.is_empty()) {
            (true, true) => true,
            (false, true) => {
                inc.entities.contains(entity_id)
                    || inc.domains.contains(domain)
                    || inc.glob_match(entity_id)
            }
            (true, false) => {
                !(exc.entities.contains(entity_id)
                    || exc.domains.contains(domain)
                    || exc.glob_match(entity_id))
            }
            (false, false) if !inc.domains.is_empty() || !inc.globs.is_empty() => {
                if inc.domains.contains(domain) {
                    !(exc.entities.contains(entity_id) || exc.glob_match(entity_id))
                } else if inc.entities.contains(entity_id) || inc.glob_match(entity_id) {
                    !(exc.entities.contains(entity_id)
                        || exc.domains.contains(domain)
                        || exc.glob_match(entity_id))
                } else {
                    false
                }
            }
            (false, false) if !exc.domains.is_empty() || !exc.globs.is_empty() => {
                if exc.domains.contains(domain) || exc.glob_match(entity_id) {
                    inc.entities.contains(entity_id)
                } else {
                    !exc.entities.contains(entity_id)
                }
            }
            (false, false) => inc.entities.contains(entity_id),
        }
    }
}
