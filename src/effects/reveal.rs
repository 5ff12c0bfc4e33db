//! Reveal-on-scroll and lazy image loading.

use std::collections::HashSet;
use std::hash::Hash;

/// Intersection observer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport.
    pub root_margin: &'static str,
}

/// Options for `.reveal-on-scroll` elements: trigger a little before the
/// bottom edge.
pub const REVEAL_OPTIONS: ObserverOptions = ObserverOptions {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
};

/// Class added to revealed elements.
pub const VISIBLE_CLASS: &str = "is-visible";

/// One-shot visibility tracking.
///
/// An element fires at most once: the first time it intersects it is
/// reported and stops being observed.
#[derive(Debug, Clone)]
pub struct RevealObserver<K> {
    observed: HashSet<K>,
}

impl<K> Default for RevealObserver<K> {
    fn default() -> Self {
        Self {
            observed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealObserver<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: K) {
        self.observed.insert(key);
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Handle a batch of `(element, is_intersecting)` entries. Returns the
    /// elements to reveal now, in entry order.
    pub fn on_entries(&mut self, entries: impl IntoIterator<Item = (K, bool)>) -> Vec<K> {
        entries
            .into_iter()
            .filter(|(key, intersecting)| *intersecting && self.observed.remove(key))
            .map(|(key, _)| key)
            .collect()
    }
}

/// An `img` waiting for its real source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LazyImage {
    pub src: Option<String>,
    pub data_src: Option<String>,
    pub classes: Vec<String>,
}

impl LazyImage {
    pub fn new(data_src: impl Into<String>) -> Self {
        Self {
            src: None,
            data_src: Some(data_src.into()),
            classes: vec!["lazy".to_string()],
        }
    }

    /// Swap in `data-src` and drop the `lazy` class.
    pub fn load(&mut self) {
        self.src = self.data_src.clone();
        self.classes.retain(|c| c != "lazy");
    }

    pub fn is_loaded(&self) -> bool {
        !self.classes.iter().any(|c| c == "lazy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_once() {
        let mut observer = RevealObserver::new();
        observer.observe("intro");
        observer.observe("stats");

        assert!(observer.on_entries([("intro", false)]).is_empty());
        assert_eq!(observer.on_entries([("intro", true), ("stats", false)]), vec!["intro"]);
        assert!(!observer.is_observing(&"intro"));

        assert!(observer.on_entries([("intro", true)]).is_empty());
        assert_eq!(observer.observed_count(), 1);
    }

    #[test]
    fn test_unobserved_elements_are_ignored() {
        let mut observer: RevealObserver<u32> = RevealObserver::new();
        assert!(observer.on_entries([(7, true)]).is_empty());
    }

    #[test]
    fn test_lazy_image_load() {
        let mut observer = RevealObserver::new();
        let mut images = vec![LazyImage::new("a.jpg"), LazyImage::new("b.jpg")];
        observer.observe(0usize);
        observer.observe(1usize);

        for index in observer.on_entries([(1, true)]) {
            images[index].load();
        }

        assert_eq!(images[1].src.as_deref(), Some("b.jpg"));
        assert!(images[1].is_loaded());
        assert_eq!(images[0].src, None);
        assert!(!images[0].is_loaded());
    }

    #[test]
    fn test_reveal_options() {
        assert_eq!(REVEAL_OPTIONS.threshold, 0.1);
        assert_eq!(REVEAL_OPTIONS.root_margin, "0px 0px -50px 0px");
    }
}
