use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::layout::Shell;
use crate::projections::p910_best_deals::ui::list::BestDealsList;
use crate::projections::p911_compare::ui::list::CompareList;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    ctx.init_history_integration();
    provide_context(ctx);

    // Pages are rebuilt on every switch, so each one restores its own
    // filters and scroll position from the session.
    view! {
        <Shell
            ctx=ctx
            center=move || {
                ctx.render_active(|page| match page {
                    AppPage::BestDeals => view! { <BestDealsList /> }.into_any(),
                    AppPage::Compare => view! { <CompareList /> }.into_any(),
                })
            }
        />
    }
}
