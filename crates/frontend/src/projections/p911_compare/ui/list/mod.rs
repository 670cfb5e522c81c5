mod state;
mod view_model;

use crate::projections::p911_compare::api;
use crate::shared::config::config;
use crate::shared::filter_sync::url::{current_query, UrlWriter};
use crate::shared::filter_sync::{
    BoundedSelection, BrowserUrl, QueryExecutor, ScrollTracker, SelectionError, SessionStore,
    WindowViewport,
};
use crate::shared::number_format::format_inr;
use contracts::projections::p911_compare::dto::ProductDto;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use state::{resolve_entry, save_snapshot, search_query, CompareEntry, CompareSnapshot};
use thaw::*;
use view_model::{dedupe_models, filter_by_screen_size, screen_size_label, short_name};

const NOTICE_MS: u32 = 3000;
const TRAY_NAME_CHARS: usize = 40;

#[component]
fn ProductImage(src: Option<String>, alt: String, #[prop(optional)] small: bool) -> impl IntoView {
    let (width, height) = if small { (60, 45) } else { (100, 75) };
    match src {
        Some(src) => view! {
            <img class="product-image" src=src alt=alt width=width height=height />
        }
        .into_any(),
        None => view! {
            <div class="image-placeholder" style=format!("width:{}px;height:{}px", width, height)>
                <span>"📺"</span>
            </div>
        }
        .into_any(),
    }
}

/// Search TVs and pick up to four of them for a side-by-side comparison.
/// The pick list survives navigation; the last search is restored when
/// coming back to the page.
#[component]
pub fn CompareList() -> impl IntoView {
    let cfg = &config().compare;

    let selected = RwSignal::new(BoundedSelection::<ProductDto>::load(
        &SessionStore,
        &cfg.selected_key,
        cfg.max_selected,
    ));
    let exec = RwSignal::new(QueryExecutor::<ProductDto>::new());
    let search_text = RwSignal::new(String::new());
    let initialized = RwSignal::new(false);
    let show_selected = RwSignal::new(true);
    let notice = RwSignal::new(None::<String>);
    let scroll = ScrollTracker::new(SessionStore, cfg.scroll_key.clone());
    let scroll_restored = StoredValue::new(false);
    let last_request = StoredValue::new(None::<CompareEntry>);
    let leave_mark = StoredValue::new(scroll.clone());

    let show_notice = move |e: SelectionError| {
        log::info!("compare: {}", e);
        notice.set(Some(e.to_string()));
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            notice.try_set(None);
        });
    };

    // Responses of superseded runs are dropped by the executor
    let fetch = move |request: CompareEntry| {
        let Some(ticket) = exec.try_update(|e| e.begin()) else {
            return;
        };
        last_request.set_value(Some(request.clone()));
        leptos::task::spawn_local(async move {
            let result = match request {
                CompareEntry::Filter { query, screen_size } => {
                    api::filter_products(&query).await.map(|products| {
                        let products = dedupe_models(products);
                        match screen_size {
                            Some(size) => filter_by_screen_size(products, size),
                            None => products,
                        }
                    })
                }
                CompareEntry::Search(text) => api::search_products(&text).await.map(dedupe_models),
                CompareEntry::Restored(snapshot) => Ok(snapshot.products),
                CompareEntry::Empty => Ok(Vec::new()),
            };
            exec.try_update(|e| e.complete(ticket, result));
            initialized.try_set(true);
        });
    };

    let search = move || {
        let text = search_text.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        fetch(CompareEntry::Search(text));
    };

    let retry = move || {
        if let Some(request) = last_request.get_value() {
            fetch(request);
        }
    };

    // Entry: facet link, `?search=` link, saved snapshot, or a blank page
    Effect::new(move |_| {
        match resolve_entry(&current_query(), &SessionStore, &cfg.storage_key) {
            CompareEntry::Filter { query, screen_size } => {
                search_text.set(query.brand.clone().unwrap_or_default());
                fetch(CompareEntry::Filter { query, screen_size });
            }
            CompareEntry::Search(text) => {
                search_text.set(text.clone());
                fetch(CompareEntry::Search(text));
            }
            CompareEntry::Restored(snapshot) => {
                search_text.set(snapshot.search_text);
                exec.update(|e| e.preload(snapshot.products));
                initialized.set(true);
            }
            CompareEntry::Empty => initialized.set(true),
        }
    });

    Effect::new(move |_| {
        selected.with(|s| s.save(&SessionStore, &cfg.selected_key));
    });

    // Once the entry is settled, the snapshot and the URL follow the page
    Effect::new(move |_| {
        if !initialized.get() {
            return;
        }
        let snapshot = CompareSnapshot {
            search_text: search_text.get(),
            products: exec.with(|e| e.results().to_vec()),
        };
        save_snapshot(&SessionStore, &cfg.storage_key, &snapshot);
        if let Some(query) = search_query(&snapshot.search_text) {
            BrowserUrl.replace_query(&query);
        }
    });

    Effect::new({
        let scroll = scroll.clone();
        move |_| {
            let has_results = exec.with(|e| !e.is_loading() && !e.results().is_empty());
            if has_results && !scroll_restored.get_value() {
                scroll_restored.set_value(true);
                scroll
                    .clone()
                    .restore_later(WindowViewport, true, cfg.scroll_restore_delay_ms);
            }
        }
    });

    on_cleanup(move || {
        scroll.record(&WindowViewport);
        exec.try_update(|e| e.cancel());
    });

    let toggle = move |product: ProductDto| {
        let outcome = selected.try_update(|s| s.toggle(product));
        if let Some(Err(e)) = outcome {
            show_notice(e);
        }
    };

    let compare = move || match selected.with_untracked(|s| s.compare_link()) {
        Ok(link) => {
            let Some(window) = web_sys::window() else {
                return;
            };
            // A full page load skips on_cleanup
            let navigated = leave_mark.try_with_value(|mark| {
                mark.record_then(&WindowViewport, || window.location().set_href(&link))
            });
            if let Some(Err(e)) = navigated {
                log::error!("compare: navigation to {} failed: {:?}", link, e);
            }
        }
        Err(e) => show_notice(e),
    };

    view! {
        <div class="compare-page">
            <div class="page-header">
                <h1 class="page-title">"Compare TVs"</h1>
                <p class="page-subtitle">
                    {format!(
                        "Search and select up to {} TVs to compare prices across platforms",
                        cfg.max_selected
                    )}
                </p>
            </div>

            <div class="search-section">
                <div class="search-container">
                    <input
                        class="search-input"
                        placeholder="Search TV by Brand, Model, or Name..."
                        prop:value=move || search_text.get()
                        on:input=move |ev| search_text.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                search();
                            }
                        }
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || exec.with(|e| e.is_loading()))
                        on_click=move |_| search()
                    >
                        {move || if exec.with(|e| e.is_loading()) { "Searching..." } else { "Search" }}
                    </Button>
                </div>
            </div>

            {move || {
                notice
                    .get()
                    .map(|text| view! {
                        <div class="warning-box">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{text}</span>
                        </div>
                    })
            }}

            <Show when=move || selected.with(|s| !s.is_empty())>
                <div class=move || {
                    if show_selected.get() {
                        "selected-products-section expanded"
                    } else {
                        "selected-products-section collapsed"
                    }
                }>
                    <div class="selected-header" on:click=move |_| show_selected.update(|v| *v = !*v)>
                        <h3>"Selected for Comparison"</h3>
                        <span class="selected-count">
                            {move || selected.with(|s| format!("{}/{}", s.len(), s.capacity()))}
                        </span>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| selected.update(|s| s.clear())
                        >
                            "Clear All"
                        </Button>
                    </div>

                    <Show when=move || show_selected.get()>
                        <div class="selected-products-grid">
                            {move || {
                                selected.with(|s| {
                                    let filled = s
                                        .iter()
                                        .enumerate()
                                        .map(|(i, p)| {
                                            let key = p.model_id.clone();
                                            view! {
                                                <div class="selected-product-card">
                                                    <div class="selected-number">{i + 1}</div>
                                                    <button
                                                        class="btn-remove"
                                                        on:click=move |_| {
                                                            selected.update(|s| {
                                                                s.remove(&key);
                                                            })
                                                        }
                                                    >
                                                        "✕"
                                                    </button>
                                                    <ProductImage src=p.image_url.clone() alt=p.full_name.clone() small=true />
                                                    <div class="selected-info">
                                                        <h4>{short_name(&p.full_name, TRAY_NAME_CHARS)}</h4>
                                                        <div class="selected-price">{format_inr(p.sale_price)}</div>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view();
                                    let empty = (s.len()..s.capacity())
                                        .map(|_| view! {
                                            <div class="selected-product-card empty">
                                                <div class="empty-slot">"+ Add TV"</div>
                                            </div>
                                        })
                                        .collect_view();
                                    view! { {filled} {empty} }
                                })
                            }}
                        </div>
                    </Show>

                    <div class="compare-action">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || selected.with(|s| s.compare_link().is_err()))
                            on_click=move |_| compare()
                        >
                            {move || format!("Compare {} TVs →", selected.with(|s| s.len()))}
                        </Button>
                    </div>
                </div>
            </Show>

            {move || {
                exec.with(|e| e.error().cloned())
                    .map(|err| view! {
                        <div class="warning-box warning-box--error">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{err.to_string()}</span>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| retry()>
                                "Retry"
                            </Button>
                        </div>
                    })
            }}

            {move || {
                let (loading, empty) = exec.with(|e| (e.is_loading(), e.results().is_empty()));
                if loading {
                    view! {
                        <div class="loading-container">
                            <div class="loader-tv">"📺"</div>
                            <div class="loader-text">"Searching TVs..."</div>
                        </div>
                    }
                    .into_any()
                } else if empty {
                    view! {
                        <div class="empty-state">
                            <div class="empty-icon">"🔍"</div>
                            <h3>"Search for TVs to Compare"</h3>
                            <p>"Enter a brand name, model number, or TV size to find products"</p>
                        </div>
                    }
                    .into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            <div class="products-grid">
                <For
                    each=move || exec.with(|e| if e.is_loading() { Vec::new() } else { e.results().to_vec() })
                    key=|p| p.model_id.clone()
                    children=move |product| {
                        let key = product.model_id.clone();
                        let is_selected = Memo::new(move |_| selected.with(|s| s.contains(&key)));
                        let size = screen_size_label(&product.full_name);
                        let for_toggle = product.clone();
                        view! {
                            <div class=move || {
                                if is_selected.get() { "product-card selected" } else { "product-card" }
                            }>
                                <label class="select-checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || is_selected.get()
                                        on:change=move |_| toggle(for_toggle.clone())
                                    />
                                </label>
                                <ProductImage src=product.image_url.clone() alt=product.full_name.clone() />
                                <div class="product-info">
                                    <h3 class="product-name">{product.full_name.clone()}</h3>
                                    {size.map(|s| view! { <span class="screen-size">{s}</span> })}
                                    <div class="product-price">{format_inr(product.sale_price)}</div>
                                    {(product.discount > 0.0).then(|| view! {
                                        <span class="discount-badge">{format!("{}% off", product.discount)}</span>
                                    })}
                                    <span class="platform-name">{product.platform.clone()}</span>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
