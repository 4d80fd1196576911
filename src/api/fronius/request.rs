use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// Solar API call relative to the `/solar_api/v1/` base.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub path: &'static str,

    /// Query parameters in order, keys may repeat.
    pub query: Vec<(&'static str, String)>,
}

impl Request {
    pub const fn new(path: &'static str) -> Self {
        Self { path, query: Vec::new() }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// First value of the query parameter.
    #[cfg(test)]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(name, _)| *name == key).map(|(_, value)| value.as_str())
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query.iter().map(|(key, value)| format!("{key}={value}")).join("&"))?;
        }
        Ok(())
    }
}
