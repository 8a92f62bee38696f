//! Lookup sources
//!
//! A [`Source`] is the read-only name → string mapping a binding reads
//! from. It is consulted on every `get()`, so a source that changes between
//! reads (the process environment, or a map behind an `RwLock`) is always
//! seen in its current state.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::env::{self, VarError};
use std::hash::BuildHasher;
use std::sync::Arc;
use tracing::warn;

/// Read-only mapping from variable name to raw string value.
pub trait Source {
    fn lookup(&self, name: &str) -> Option<String>;

    /// Every entry, unvalidated.
    fn entries(&self) -> HashMap<String, String>;
}

/// The variables of the running process.
///
/// Values that are not valid UTF-8 are converted lossily and a warning is
/// logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(raw)) => {
                warn!(variable = name, "Environment variable is not valid UTF-8, converting lossily");
                Some(raw.to_string_lossy().into_owned())
            }
        }
    }

    fn entries(&self) -> HashMap<String, String> {
        env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn entries(&self) -> HashMap<String, String> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn entries(&self) -> HashMap<String, String> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }

    fn entries(&self) -> HashMap<String, String> {
        (**self).entries()
    }
}

impl<S: Source + ?Sized> Source for Arc<S> {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }

    fn entries(&self) -> HashMap<String, String> {
        (**self).entries()
    }
}

impl<S: Source + ?Sized> Source for RwLock<S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.read().lookup(name)
    }

    fn entries(&self) -> HashMap<String, String> {
        self.read().entries()
    }
}
