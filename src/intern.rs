use std::{
    collections::HashMap,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    sync::{Arc, RwLock},
};

use lazy_static::lazy_static;

lazy_static! {
    static ref INTERNED_SYMBOLS: RwLock<HashMap<String, Name>> = RwLock::new(HashMap::new());
}

/// An interned element symbol, used for elements the engine does not know.
/// Equal symbols share one allocation, so comparison is usually a pointer check.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Clone, Hash, Eq)]
pub struct Name(Arc<String>);

impl Name {
    pub fn new(symbol: &str) -> Self {
        if let Some(name) = INTERNED_SYMBOLS
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(symbol)
        {
            return name.clone();
        }

        let mut symbols = INTERNED_SYMBOLS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        symbols
            .entry(symbol.to_string())
            .or_insert_with(|| Name(Arc::new(symbol.to_string())))
            .clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Debug for Name {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_shares_storage() {
        let a = Name::new("Xe");
        let b = Name::from("Xe");
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, b);
        assert_ne!(a, Name::new("Ar"));
        assert_eq!(a.as_str(), "Xe");
    }
}
