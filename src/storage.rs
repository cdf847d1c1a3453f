use super::*;
use crate::number::format_number;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fixed keys under which page state is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Simulator,
    Contact,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulator => "presenceplus_simulator",
            Self::Contact => "presenceplus_contact",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage is unavailable"),
            Self::QuotaExceeded { key, needed, quota } => write!(
                f,
                "storage quota exceeded writing {key}: needed {needed}, quota {quota}"
            ),
        }
    }
}

impl StdError for StorageError {}

/// String-keyed store seen by one page.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> std::result::Result<(), StorageError>;
}

/// In-memory browser profile: one key/value area per origin.
///
/// Quotas are counted the way browsers do, in UTF-16 code units of keys plus
/// values, per origin.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    areas: BTreeMap<String, BTreeMap<String, String>>,
    unavailable: bool,
    quota_units: Option<usize>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// An unavailable store fails every read and write, like a browser with
    /// storage disabled.
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    pub fn is_available(&self) -> bool {
        !self.unavailable
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota_units = quota;
    }

    pub fn get(&self, origin: &str, key: &str) -> Option<&str> {
        self.areas
            .get(origin)
            .and_then(|area| area.get(key))
            .map(String::as_str)
    }

    /// Seeds an entry directly, bypassing availability and quota checks.
    pub fn insert(&mut self, origin: &str, key: &str, value: &str) {
        self.areas
            .entry(origin.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn keys(&self, origin: &str) -> Vec<String> {
        self.areas
            .get(origin)
            .map(|area| area.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn scoped<'a>(&'a mut self, origin: &str) -> OriginStorage<'a> {
        OriginStorage {
            storage: self,
            origin: origin.to_string(),
        }
    }
}

fn utf16_units(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The area of a single origin inside a [`LocalStorage`].
#[derive(Debug)]
pub struct OriginStorage<'a> {
    storage: &'a mut LocalStorage,
    origin: String,
}

impl OriginStorage<'_> {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn used_units_without(&self, skip_key: &str) -> usize {
        self.storage
            .areas
            .get(&self.origin)
            .map(|area| {
                area.iter()
                    .filter(|(key, _)| key.as_str() != skip_key)
                    .map(|(key, value)| utf16_units(key) + utf16_units(value))
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl StorageBackend for OriginStorage<'_> {
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        if self.storage.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.storage.get(&self.origin, key).map(ToOwned::to_owned))
    }

    fn set_item(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        if self.storage.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = self.storage.quota_units {
            let needed = self.used_units_without(key) + utf16_units(key) + utf16_units(value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.storage.insert(&self.origin, key, value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> std::result::Result<(), StorageError> {
        if self.storage.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(area) = self.storage.areas.get_mut(&self.origin) {
            area.remove(key);
        }
        Ok(())
    }
}

/// Result of reading a persisted blob.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Found(T),
    /// Nothing stored, empty text, or the store could not be read.
    Absent,
    /// Stored text that is not JSON, or JSON `T` refuses (such as `null`).
    /// Callers drop the key.
    Corrupt { reason: String },
}

/// JSON persistence over a [`StorageBackend`]. Write failures never reach the
/// caller; they are recorded in the trace log when one is attached.
pub struct Persistence<'a> {
    backend: &'a mut dyn StorageBackend,
    trace: Option<&'a mut TraceState>,
}

impl<'a> Persistence<'a> {
    pub fn new(backend: &'a mut dyn StorageBackend) -> Self {
        Self {
            backend,
            trace: None,
        }
    }

    pub(crate) fn traced(backend: &'a mut dyn StorageBackend, trace: &'a mut TraceState) -> Self {
        Self {
            backend,
            trace: Some(trace),
        }
    }

    fn trace_line(&mut self, line: String) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.storage_line(line);
        }
    }

    pub fn save<T: Serialize>(&mut self, key: StorageKey, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(err) => {
                self.trace_line(format!("[storage] save key={key} serialize_error={err}"));
                return;
            }
        };
        match self.backend.set_item(key.as_str(), &text) {
            Ok(()) => self.trace_line(format!("[storage] save key={key} bytes={}", text.len())),
            Err(err) => self.trace_line(format!("[storage] save key={key} failed: {err}")),
        }
    }

    pub fn load<T: DeserializeOwned>(&mut self, key: StorageKey) -> LoadOutcome<T> {
        let text = match self.backend.get_item(key.as_str()) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                self.trace_line(format!("[storage] load key={key} absent"));
                return LoadOutcome::Absent;
            }
            Err(err) => {
                self.trace_line(format!("[storage] load key={key} failed: {err}"));
                return LoadOutcome::Absent;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => {
                self.trace_line(format!("[storage] load key={key} found"));
                LoadOutcome::Found(value)
            }
            Err(err) => {
                let reason = err.to_string();
                self.trace_line(format!("[storage] load key={key} corrupt: {reason}"));
                LoadOutcome::Corrupt { reason }
            }
        }
    }

    pub fn clear(&mut self, key: StorageKey) {
        match self.backend.remove_item(key.as_str()) {
            Ok(()) => self.trace_line(format!("[storage] clear key={key}")),
            Err(err) => self.trace_line(format!("[storage] clear key={key} failed: {err}")),
        }
    }
}

/// Whether a parsed member would pass an `if (data.member)` check.
pub(crate) fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text a browser assigns to `control.value` for a parsed JSON member.
pub(crate) fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| number.to_string()),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(json_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `scheme://host[:port]` of `url`, lowercased. URLs without an authority
/// map to the opaque origin `"null"`.
pub fn origin_of(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return "null".to_string();
    };
    if scheme.is_empty() || rest.is_empty() {
        return "null".to_string();
    }
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);
    if host.is_empty() {
        return "null".to_string();
    }
    format!("{}://{}", scheme.to_ascii_lowercase(), host.to_ascii_lowercase())
}
