//! Name filters deciding which interrupts are exported.
//!
//! Collectors only depend on the [`NameFilter`] predicate. [`DeviceFilter`]
//! is the regex based implementation wired up from configuration.

use regex::Regex;

/// Predicate consulted once per interrupt identity
/// (`name;info;devices`) before any of its points are emitted.
pub trait NameFilter: Send + Sync {
    /// Returns `true` when the identity must not be exported.
    fn ignored(&self, identity: &str) -> bool;
}

impl<F> NameFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn ignored(&self, identity: &str) -> bool {
        self(identity)
    }
}

/// Include/exclude regex filter.
///
/// A name is ignored if it matches the exclude pattern, or if an include
/// pattern is set and the name does not match it.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    exclude: Option<Regex>,
    include: Option<Regex>,
}

impl DeviceFilter {
    /// Builds a filter from optional patterns. Empty patterns count as unset.
    pub fn new(exclude: Option<&str>, include: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            exclude: compile(exclude)?,
            include: compile(include)?,
        })
    }

    /// Returns true if neither pattern is set.
    pub fn is_empty(&self) -> bool {
        self.exclude.is_none() && self.include.is_none()
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>, regex::Error> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p).map(Some),
        _ => Ok(None),
    }
}

impl NameFilter for DeviceFilter {
    fn ignored(&self, identity: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(identity) {
                return true;
            }
        }
        match &self.include {
            Some(include) => !include.is_match(identity),
            None => false,
        }
    }
}
