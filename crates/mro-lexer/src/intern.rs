// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! String interning for identifiers.
//!
//! A stage name usually shows up at least three times in a file: where it is
//! declared, where it is called, and where its outputs are referenced. The
//! interner hands out one shared allocation for all of them.

use std::collections::HashSet;
use std::sync::Arc;

/// Deduplicating string table. Lives for one parse session; nothing is ever
/// evicted.
#[derive(Debug, Default)]
pub struct StringIntern {
    table: HashSet<Arc<str>>,
}

impl StringIntern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical instance for `value`, creating it on first use.
    pub fn intern(&mut self, value: &str) -> Arc<str> {
        if let Some(existing) = self.table.get(value) {
            return Arc::clone(existing);
        }
        let s: Arc<str> = Arc::from(value);
        self.table.insert(Arc::clone(&s));
        s
    }

    /// Like [`intern`](Self::intern) for raw bytes, which must be UTF-8.
    pub fn intern_bytes(&mut self, value: &[u8]) -> Result<Arc<str>, std::str::Utf8Error> {
        std::str::from_utf8(value).map(|s| self.intern(s))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
