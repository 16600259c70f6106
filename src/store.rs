use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word store is not a JSON array")]
    NotAnArray,
}

/// Durable storage for the word list. The list is always read and written
/// in full.
pub trait Store: Send + Sync {
    /// Read the persisted word list. Returns `None` if nothing has been
    /// persisted yet.
    fn load(&self) -> Result<Option<Vec<String>>, StoreError>;

    /// Overwrite the persisted word list.
    fn save(&self, words: &[String]) -> Result<(), StoreError>;
}

/// Word list stored as a pretty-printed JSON array of strings.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Option<Vec<String>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let items = match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => items,
            _ => return Err(StoreError::NotAnArray),
        };

        let words = items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => display_value(&other),
            })
            .collect();

        Ok(Some(words))
    }

    fn save(&self, words: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(words)?;

        // Write to a sibling file and rename so that readers never see a
        // half-written store.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Render a non-string element the way the word list has always been
/// written for it: `None`, `True`/`False`, and `['a', 'b']`-style
/// containers with quoted strings.
fn display_value(v: &Value) -> String {
    match v {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), display_value(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

/// Quote a string nested inside a container. Single quotes are preferred
/// unless the string contains one and no double quote.
fn quote(s: &str) -> String {
    let q = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}
