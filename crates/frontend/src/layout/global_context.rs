use crate::shared::filter_sync::url::{current_path, push_path};
use leptos::prelude::*;

/// Top-level pages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPage {
    BestDeals,
    Compare,
}

impl AppPage {
    pub const ALL: [AppPage; 2] = [AppPage::BestDeals, AppPage::Compare];

    pub fn path(self) -> &'static str {
        match self {
            AppPage::BestDeals => "/best-deals",
            AppPage::Compare => "/compare",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppPage::BestDeals => "Best Deals",
            AppPage::Compare => "Compare",
        }
    }

    /// Unknown paths land on the deals page.
    pub fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/').starts_with("/compare") {
            AppPage::Compare
        } else {
            AppPage::BestDeals
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AppPage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self::starting_at(AppPage::from_path(&current_path()))
    }

    fn starting_at(page: AppPage) -> Self {
        Self {
            active: RwSignal::new(page),
        }
    }

    /// Keeps `active` in step with back/forward navigation.
    pub fn init_history_integration(&self) {
        let this = *self;
        let handle = window_event_listener(leptos::ev::popstate, move |_| {
            let page = AppPage::from_path(&current_path());
            log::debug!("history: back/forward to {:?}", page);
            this.active.try_set(page);
        });
        on_cleanup(move || handle.remove());
    }

    /// Switches page and adds a history entry; the query string of the old
    /// page is dropped, the new page restores its own state.
    pub fn open(&self, page: AppPage) {
        if self.select(page) {
            push_path(page.path());
        }
    }

    /// Makes `page` the active one; `false` when it already was.
    fn select(&self, page: AppPage) -> bool {
        if self.active.get_untracked() == page {
            return false;
        }
        self.active.set(page);
        true
    }

    /// Builds the view of the active page. Call it from a reactive
    /// closure: it tracks `active`.
    pub fn render_active<F, V>(&self, render: F) -> V
    where
        F: Fn(AppPage) -> V,
    {
        render(self.active.get())
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(AppPage::from_path("/"), AppPage::BestDeals);
        assert_eq!(AppPage::from_path("/best-deals"), AppPage::BestDeals);
        assert_eq!(AppPage::from_path("/compare"), AppPage::Compare);
        assert_eq!(AppPage::from_path("/compare/"), AppPage::Compare);
        assert_eq!(AppPage::from_path("/nowhere"), AppPage::BestDeals);
    }

    #[test]
    fn test_paths_round_trip() {
        for page in AppPage::ALL {
            assert_eq!(AppPage::from_path(page.path()), page);
        }
    }

    #[test]
    fn test_select_switches_the_rendered_page() {
        let owner = Owner::new();
        owner.set();

        let ctx = AppGlobalContext::starting_at(AppPage::BestDeals);
        let rendered = Memo::new(move |_| ctx.render_active(|page| page.title()));
        assert_eq!(rendered.get_untracked(), "Best Deals");

        assert!(ctx.select(AppPage::Compare));
        assert_eq!(rendered.get_untracked(), "Compare");

        assert!(!ctx.select(AppPage::Compare));
        assert!(ctx.select(AppPage::BestDeals));
        assert_eq!(rendered.get_untracked(), "Best Deals");
    }
}
