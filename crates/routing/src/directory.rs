//! Set of valid location names for operator input.

use std::collections::HashMap;

use crate::error::RouteError;

/// Known location names, in the order they were declared.
///
/// Lookups go through [`normalize`], so operator input in any case finds a
/// name however it was spelled when registered (`"dc1"` finds `"DC1"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDirectory {
    names: Vec<String>,
    by_key: HashMap<String, usize>,
}

impl LocationDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dir = Self::default();
        for name in names {
            dir.insert(name.into());
        }
        dir
    }

    /// Register a name. Returns `false` if it, or a name differing only in
    /// case and surrounding whitespace, was already known.
    pub fn insert(&mut self, name: String) -> bool {
        let key = normalize(&name);
        if self.by_key.contains_key(&key) {
            return false;
        }
        self.by_key.insert(key, self.names.len());
        self.names.push(name);
        true
    }

    /// Exact match against a registered name.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|stored| stored == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn lookup(&self, input: &str) -> Option<&str> {
        self.by_key
            .get(&normalize(input))
            .map(|&i| self.names[i].as_str())
    }

    /// Registered spelling of `input` if known, otherwise its normalized form.
    pub fn canonical(&self, input: &str) -> String {
        match self.lookup(input) {
            Some(stored) => stored.to_string(),
            None => normalize(input),
        }
    }

    /// Check raw input against the directory and return the registered name.
    pub fn resolve(&self, input: &str) -> Result<String, RouteError> {
        let key = normalize(input);
        if key.is_empty() {
            return Err(RouteError::EmptyLocation);
        }
        match self.lookup(&key) {
            Some(stored) => Ok(stored.to_string()),
            None => Err(RouteError::UnknownLocation(key)),
        }
    }
}

/// Trim surrounding whitespace, upper-case the first character and
/// lower-case the rest: `"  sURAT\n"` becomes `"Surat"`.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
