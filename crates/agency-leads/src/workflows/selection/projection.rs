use std::sync::{Mutex, PoisonError};

use url::Url;

/// A single string slot that lives outside the core, typically a query parameter.
///
/// Read once when a view is built and written after each settled transition.
pub trait LocationSlot: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, value: Option<&str>);
}

/// Mirrors a value into one query parameter of a navigable URL.
#[derive(Debug)]
pub struct UrlQuerySlot {
    location: Mutex<Url>,
    param: String,
}

impl UrlQuerySlot {
    pub fn new(location: Url, param: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location),
            param: param.into(),
        }
    }

    /// Current location, e.g. for a share link or history entry.
    pub fn location(&self) -> Url {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocationSlot for UrlQuerySlot {
    fn read(&self) -> Option<String> {
        let location = self.location.lock().unwrap_or_else(PoisonError::into_inner);
        let value = location
            .query_pairs()
            .find(|(key, _)| key == self.param.as_str())
            .map(|(_, value)| value.into_owned());
        value
    }

    fn write(&self, value: Option<&str>) {
        let mut location = self.location.lock().unwrap_or_else(PoisonError::into_inner);
        let retained: Vec<(String, String)> = location
            .query_pairs()
            .filter(|(key, _)| key != self.param.as_str())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if retained.is_empty() && value.is_none() {
            location.set_query(None);
            return;
        }

        let mut pairs = location.query_pairs_mut();
        pairs.clear();
        for (key, existing) in &retained {
            pairs.append_pair(key, existing);
        }
        if let Some(value) = value {
            pairs.append_pair(&self.param, value);
        }
    }
}
