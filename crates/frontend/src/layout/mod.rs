pub mod global_context;

use global_context::{AppGlobalContext, AppPage};
use leptos::prelude::*;

#[component]
fn TopHeader(ctx: AppGlobalContext) -> impl IntoView {
    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"OfferZone"</span>
            </div>
            <nav class="top-header__nav">
                {AppPage::ALL
                    .into_iter()
                    .map(move |page| view! {
                        <a
                            href=page.path()
                            class=move || {
                                if ctx.active.get() == page {
                                    "top-header__link top-header__link--active"
                                } else {
                                    "top-header__link"
                                }
                            }
                            on:click=move |ev| {
                                ev.prevent_default();
                                ctx.open(page);
                            }
                        >
                            {page.title()}
                        </a>
                    })
                    .collect_view()}
            </nav>
        </div>
    }
}

/// Main application shell: top navigation bar over the active page.
///
/// `center` is re-run whenever the signals it reads change, so the old
/// page is disposed (and its cleanups run) when another one is opened.
#[component]
pub fn Shell<C>(ctx: AppGlobalContext, center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send + Sync,
{
    view! {
        <div class="app-layout">
            <TopHeader ctx=ctx />
            <div class="app-main">
                {move || center()}
            </div>
        </div>
    }
}
