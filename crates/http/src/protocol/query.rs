//! Query string access for handlers.
//!
//! Routing never looks at the query component; this type exists so handlers
//! can. Pairs keep their order of appearance and repeated keys are preserved.

use tracing::warn;

/// A parsed query string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Parses a raw query component. `None` and unparsable input both yield
    /// an empty query, a request target never fails because of its query.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Default::default();
        };

        match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
            Ok(pairs) => Self { pairs },
            Err(e) => {
                warn!(query = raw, cause = %e, "ignoring unparsable query string");
                Default::default()
            }
        }
    }

    /// The first value registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// All values registered under `name`, in order of appearance.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs.iter().filter(|(key, _)| key == name).map(|(_, value)| value.as_str()).collect()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
