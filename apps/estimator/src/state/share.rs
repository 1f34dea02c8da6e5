//! # Share Link State
//!
//! Issued share links, keyed by token.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fieldfix_core::ShareLink;

/// Shared share-link store.
#[derive(Debug, Clone, Default)]
pub struct ShareLinkState {
    links: Arc<Mutex<HashMap<String, ShareLink>>>,
}

impl ShareLinkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the links.
    pub fn with_links<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashMap<String, ShareLink>) -> R,
    {
        let links = self.links.lock().unwrap_or_else(|e| e.into_inner());
        f(&links)
    }

    /// Executes a function with write access to the links.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// links.with_links_mut(|links| links.insert(link.token.clone(), link));
    /// ```
    pub fn with_links_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, ShareLink>) -> R,
    {
        let mut links = self.links.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut links)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.with_links(|links| links.contains_key(token))
    }

    pub fn get(&self, token: &str) -> Option<ShareLink> {
        self.with_links(|links| links.get(token).cloned())
    }

    /// Links issued for one estimate.
    pub fn for_estimate(&self, estimate_id: &str) -> Vec<ShareLink> {
        self.with_links(|links| {
            links
                .values()
                .filter(|l| l.estimate_id == estimate_id)
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldfix_core::share::default_lifetime;

    #[test]
    fn test_insert_and_lookup() {
        let state = ShareLinkState::new();
        let link = ShareLink::new("s1", "tok123", "e1", Utc::now(), default_lifetime()).unwrap();

        state.with_links_mut(|links| links.insert(link.token.clone(), link));

        assert!(state.contains("tok123"));
        assert_eq!(state.get("tok123").unwrap().estimate_id, "e1");
        assert_eq!(state.for_estimate("e1").len(), 1);
        assert!(state.for_estimate("e2").is_empty());
    }
}
