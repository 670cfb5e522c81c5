use super::store::PersistedStore;
use gloo_timers::future::TimeoutFuture;

/// Vertical scroll access of whatever hosts the list.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    /// Largest reachable offset with the content currently rendered.
    fn max_scroll_y(&self) -> f64;
    fn scroll_to(&self, y: f64);
}

/// The browser window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowViewport;

impl Viewport for WindowViewport {
    fn scroll_y(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0)
    }

    fn max_scroll_y(&self) -> f64 {
        let Some(window) = web_sys::window() else {
            return 0.0;
        };
        let content = window
            .document()
            .and_then(|d| d.document_element())
            .map(|e| e.scroll_height() as f64)
            .unwrap_or(0.0);
        let visible = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (content - visible).max(0.0)
    }

    fn scroll_to(&self, y: f64) {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, y);
        }
    }
}

/// Remembers where the user was on a page and brings them back there.
#[derive(Debug, Clone)]
pub struct ScrollTracker<S> {
    store: S,
    key: String,
}

impl<S: PersistedStore> ScrollTracker<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Call when leaving the page.
    pub fn record(&self, viewport: &impl Viewport) {
        let y = viewport.scroll_y().max(0.0);
        self.store.set(&self.key, &format!("{}", y.round() as i64));
    }

    /// Records the offset, then leaves through `leave`. For exits that
    /// skip component teardown, such as a full page load.
    pub fn record_then<R>(&self, viewport: &impl Viewport, leave: impl FnOnce() -> R) -> R {
        self.record(viewport);
        leave()
    }

    pub fn saved(&self) -> Option<f64> {
        let raw = self.store.get(&self.key)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && *y >= 0.0)
    }

    /// Offset to restore on (re)entry; only meaningful once the result list
    /// has something in it.
    pub fn pending_restore(&self, has_results: bool) -> Option<f64> {
        if !has_results {
            return None;
        }
        self.saved()
    }

    /// Scrolls to `y`, clamped to what the rendered content allows.
    pub fn apply(&self, viewport: &impl Viewport, y: f64) -> f64 {
        let target = y.min(viewport.max_scroll_y()).max(0.0);
        viewport.scroll_to(target);
        target
    }
}

impl<S: PersistedStore + 'static> ScrollTracker<S> {
    /// Restores the saved offset after `delay_ms`, giving the list time to
    /// render at full height first.
    pub fn restore_later(self, viewport: impl Viewport + 'static, has_results: bool, delay_ms: u32) {
        let Some(y) = self.pending_restore(has_results) else {
            return;
        };
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let applied = self.apply(&viewport, y);
            log::debug!("scroll[{}]: restored to {} (saved {})", self.key, applied, y);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter_sync::store::MemoryStore;
    use std::cell::Cell;

    struct FakeViewport {
        y: Cell<f64>,
        max: f64,
    }

    impl FakeViewport {
        fn new(y: f64, max: f64) -> Self {
            Self { y: Cell::new(y), max }
        }
    }

    impl Viewport for FakeViewport {
        fn scroll_y(&self) -> f64 {
            self.y.get()
        }
        fn max_scroll_y(&self) -> f64 {
            self.max
        }
        fn scroll_to(&self, y: f64) {
            self.y.set(y);
        }
    }

    #[test]
    fn test_record_then_restore() {
        let store = MemoryStore::new();
        let tracker = ScrollTracker::new(store.clone(), "bestDeals_scrollPosition");
        tracker.record(&FakeViewport::new(1234.4, 5000.0));
        assert_eq!(store.get("bestDeals_scrollPosition").as_deref(), Some("1234"));

        let back = FakeViewport::new(0.0, 5000.0);
        let y = tracker.pending_restore(true).unwrap();
        assert_eq!(tracker.apply(&back, y), 1234.0);
        assert_eq!(back.scroll_y(), 1234.0);
    }

    #[test]
    fn test_no_restore_without_results_or_mark() {
        let store = MemoryStore::new();
        let tracker = ScrollTracker::new(store.clone(), "k");
        assert_eq!(tracker.pending_restore(true), None);
        store.set("k", "800");
        assert_eq!(tracker.pending_restore(false), None);
        assert_eq!(tracker.pending_restore(true), Some(800.0));
    }

    #[test]
    fn test_restore_clamps_to_content() {
        let tracker = ScrollTracker::new(MemoryStore::new(), "k");
        let short = FakeViewport::new(0.0, 300.0);
        assert_eq!(tracker.apply(&short, 2400.0), 300.0);
        assert_eq!(short.scroll_y(), 300.0);
    }

    #[test]
    fn test_garbage_mark_ignored() {
        let store = MemoryStore::new();
        store.set("k", "NaN");
        let tracker = ScrollTracker::new(store.clone(), "k");
        assert_eq!(tracker.saved(), None);
        store.set("k", "-5");
        assert_eq!(tracker.saved(), None);
    }

    #[test]
    fn test_offset_saved_before_leaving() {
        let store = MemoryStore::new();
        let tracker = ScrollTracker::new(store.clone(), "compare_scrollPosition");
        let seen = tracker.record_then(&FakeViewport::new(640.0, 3000.0), || {
            store.get("compare_scrollPosition")
        });
        assert_eq!(seen.as_deref(), Some("640"));
    }
}
