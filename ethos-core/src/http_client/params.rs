use serde_json::Value;

/// Insertion-ordered query parameters.
///
/// Values are JSON scalars. `null` entries are kept in the map but skipped
/// when the request URL is built, so optional filters can be inserted
/// unconditionally.
///
/// ```rust
/// use ethos_core::http_client::QueryParams;
///
/// let archived: Option<bool> = None;
/// let params = QueryParams::new()
///     .with("subjectProfileId", 42)
///     .with("archived", archived)
///     .with("score", "positive");
///
/// let pairs: Vec<_> = params.to_pairs();
/// assert_eq!(
///     pairs,
///     vec![
///         ("subjectProfileId".to_string(), "42".to_string()),
///         ("score".to_string(), "positive".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, Value)>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder form of [`QueryParams::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copies every entry of `other` over this set.
    pub fn merge(&mut self, other: &QueryParams) {
        for (key, value) in &other.0 {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries, `null` ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no entry is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries that end up in the URL, rendered as strings.
    ///
    /// Strings are used verbatim; numbers and booleans use their JSON text.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| render(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
