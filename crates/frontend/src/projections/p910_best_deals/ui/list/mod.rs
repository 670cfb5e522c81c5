mod view_model;

use crate::projections::p910_best_deals::api;
use crate::shared::config::config;
use crate::shared::filter_sync::url::current_query;
use crate::shared::filter_sync::{
    best_deals_query, BrowserUrl, Debouncer, FilterPatch, FilterState, FilterSync, QueryExecutor,
    ScrollTracker, SessionStore, SortBy, SortOrder, WindowViewport,
};
use crate::shared::number_format::{format_inr, group_indian};
use contracts::projections::p910_best_deals::dto::BestDealDto;
use contracts::projections::shared_filters::dto::BrandCountDto;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use thaw::*;
use view_model::{
    has_next_page, is_hot_deal, max_price_options, next_page, previous_page, star_rating,
    visible_brands, DISCOUNT_OPTIONS, MIN_PRICE_OPTIONS, RATING_OPTIONS,
};

type BestDealsSync = FilterSync<SessionStore, BrowserUrl>;

#[component]
fn Stars(rating: Option<f64>) -> impl IntoView {
    let stars = star_rating(rating);
    view! {
        <span class="star-rating">
            {"★".repeat(stars.full)}
            {stars.half.then(|| view! { <span class="star half">"★"</span> })}
            {"☆".repeat(stars.empty)}
        </span>
    }
}

#[component]
fn DealCard(deal: BestDealDto) -> impl IntoView {
    let hot = is_hot_deal(deal.savings_percent);
    let discounted = deal.original_cost > deal.min_price;
    let platforms = deal.platform_prices.clone();
    let in_stock = deal.in_stock();

    view! {
        <div class="product-card">
            {hot.then(|| view! { <span class="hot-deal-badge">"Hot Deal"</span> })}
            <div class="product-image-container">
                {match deal.image_url.clone() {
                    Some(src) => view! { <img class="product-image" src=src alt=deal.full_name.clone() /> }.into_any(),
                    None => view! { <div class="product-image-placeholder">"📺"</div> }.into_any(),
                }}
            </div>
            <div class="product-info">
                <h3 class="product-name">{deal.full_name.clone()}</h3>
                <div class="product-rating">
                    <span class="rating-badge">
                        {format!("{:.1} ", deal.avg_rating.unwrap_or(0.0))}
                        <Stars rating=deal.avg_rating />
                    </span>
                </div>
                <ul class="product-specs">
                    <li><strong>{deal.display_type.clone().unwrap_or_else(|| "LED".to_string())}</strong></li>
                    <li>"Model ID: "<strong>{deal.model_id.clone()}</strong></li>
                    <li>"Available on: "<strong>{format!("{} platforms", deal.platform_count)}</strong></li>
                </ul>
                <div class="price-comparison">
                    {platforms
                        .into_iter()
                        .map(|(platform, price)| view! {
                            <div class="platform-price">
                                <span class="platform-name">{platform}</span>
                                <span class="platform-price-value">{format_inr(price)}</span>
                            </div>
                        })
                        .collect_view()}
                </div>
                <div class="product-price-section">
                    <span class="current-price">{format_inr(deal.min_price)}</span>
                    {discounted.then(|| view! {
                        <span class="original-price">{format_inr(deal.original_cost)}</span>
                        <span class="discount-badge">{format!("{}% off", deal.max_discount)}</span>
                    })}
                </div>
                {(deal.price_difference > 0.0).then(|| view! {
                    <div class="savings-info">
                        <span class="savings-text">
                            {format!(
                                "Save up to {} ({}%)",
                                format_inr(deal.price_difference),
                                deal.savings_percent
                            )}
                        </span>
                    </div>
                })}
                <div class={if in_stock { "stock-status in-stock" } else { "stock-status out-stock" }}>
                    {if in_stock { "In Stock" } else { "Out of Stock" }}
                </div>
            </div>
        </div>
    }
}

/// Best deals across platforms with brand / price / rating / discount
/// filters. Filters live in the URL and in session storage, so reloads,
/// shared links and back-navigation all land on the same list.
#[component]
pub fn BestDealsList() -> impl IntoView {
    let cfg = &config().best_deals;

    let sync = RwSignal::new(BestDealsSync::bootstrap(
        &current_query(),
        SessionStore,
        BrowserUrl,
        cfg.storage_key.clone(),
    ));
    let exec = RwSignal::new(QueryExecutor::<BestDealDto>::new());
    let brands = RwSignal::new(Vec::<BrandCountDto>::new());
    let brand_search = RwSignal::new(String::new());
    let show_more_brands = RwSignal::new(false);
    let search_input = RwSignal::new(sync.with_untracked(|s| s.state().search_text.clone()));
    let debouncer = StoredValue::new(Debouncer::default());
    let scroll = ScrollTracker::new(SessionStore, cfg.scroll_key.clone());
    let scroll_restored = StoredValue::new(false);

    let filters = Memo::new(move |_| sync.with(|s| s.state().clone()));
    let observed_max = Memo::new(move |_| sync.with(|s| s.observed_max()));

    let load = move || {
        let Some(query) = sync.with_untracked(|s| {
            s.is_initialized()
                .then(|| best_deals_query(s.state(), cfg.page_size, cfg.unbounded_price))
        }) else {
            return;
        };
        let Some(ticket) = exec.try_update(|e| e.begin()) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = api::fetch_best_deals(&query).await;
            exec.try_update(|e| e.complete(ticket, result));
        });
    };

    let set_filter = move |patch: FilterPatch| {
        if sync.try_update(|s| s.apply(&patch)).unwrap_or(false) {
            load();
        }
    };

    let reset_filters = move || {
        debouncer.update_value(|d| d.flush());
        search_input.set(String::new());
        sync.update(|s| s.reset());
        load();
    };

    // Brands and price bounds first; nothing is written back before that
    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            match api::fetch_brands().await {
                Ok(list) => {
                    brands.try_set(list);
                }
                Err(e) => log::warn!("best_deals: brands unavailable: {}", e),
            }
            let observed = match api::fetch_price_range().await {
                Ok(range) => range.max_whole(),
                Err(e) => {
                    log::warn!("best_deals: price range unavailable: {}", e);
                    None
                }
            };
            sync.try_update(|s| s.complete_initialization(observed));
            load();
        });
    });

    // Back on the page with results rendered: return to the old position
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

    // search text (with debounce) -> filters
    let on_search_input = move |text: String| {
        search_input.set(text.clone());
        let mut d = debouncer.get_value();
        let token = d.schedule();
        debouncer.set_value(d);
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(cfg.search_debounce_ms).await;
            if debouncer
                .try_get_value()
                .is_some_and(|d| d.is_current(token))
            {
                set_filter(FilterPatch::search(text));
            }
        });
    };

    let search_now = move || {
        debouncer.update_value(|d| d.flush());
        set_filter(FilterPatch::search(search_input.get_untracked()));
    };

    view! {
        <div class="best-deals-page">
            <div class="search-section">
                <div class="search-bar">
                    <input
                        type="text"
                        placeholder="Search TVs by brand, model, or name..."
                        prop:value=move || search_input.get()
                        on:input=move |ev| on_search_input(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                search_now();
                            }
                        }
                    />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| search_now()>
                        "Search"
                    </Button>
                </div>

                <div class="sort-section">
                    <label>"Sort by:"</label>
                    <select
                        prop:value=move || filters.with(|f| f.sort_by.as_str())
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<SortBy>() {
                                set_filter(FilterPatch::sort_by(v));
                            }
                        }
                    >
                        {SortBy::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                    <select
                        prop:value=move || filters.with(|f| f.sort_order.as_str())
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<SortOrder>() {
                                set_filter(FilterPatch::sort_order(v));
                            }
                        }
                    >
                        <option value="desc">"High to Low"</option>
                        <option value="asc">"Low to High"</option>
                    </select>
                </div>
            </div>

            <div class="content-wrapper">
                <aside class="filters-sidebar">
                    <div class="filters-header">
                        <h3>"Filters"</h3>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset_filters()>
                            "Clear All"
                        </Button>
                    </div>

                    <div class="filter-section">
                        <h4>"BRAND"</h4>
                        <input
                            type="text"
                            placeholder="Search brand"
                            prop:value=move || brand_search.get()
                            on:input=move |ev| brand_search.set(event_target_value(&ev))
                        />
                        <For
                            each=move || {
                                brands.with(|b| {
                                    visible_brands(
                                        b,
                                        &brand_search.get(),
                                        show_more_brands.get(),
                                        cfg.visible_brands,
                                    )
                                })
                            }
                            key=|b| b.brand.clone()
                            children=move |b| {
                                let name = b.brand.clone();
                                let checked_name = b.brand.clone();
                                view! {
                                    <label class="filter-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || {
                                                filters.with(|f| f.selected_categories.contains(&checked_name))
                                            }
                                            on:change=move |_| set_filter(FilterPatch::toggle_category(name.clone()))
                                        />
                                        <span>{format!("{} ({})", b.brand, b.count)}</span>
                                    </label>
                                }
                            }
                        />
                        <button
                            class="show-more-btn"
                            on:click=move |_| show_more_brands.update(|v| *v = !*v)
                        >
                            {move || if show_more_brands.get() { "Show less" } else { "Show more" }}
                        </button>
                    </div>

                    <div class="filter-section">
                        <h4>"CUSTOMER RATINGS"</h4>
                        {RATING_OPTIONS
                            .into_iter()
                            .map(|rating| view! {
                                <label class="filter-option">
                                    <input
                                        type="radio"
                                        name="rating"
                                        prop:checked=move || filters.with(|f| f.min_rating == Some(rating))
                                        on:click=move |_| set_filter(FilterPatch::toggle_min_rating(rating))
                                    />
                                    <span>{format!("{}★ & above", rating)}</span>
                                </label>
                            })
                            .collect_view()}
                    </div>

                    <div class="filter-section">
                        <h4>"DISCOUNT"</h4>
                        {DISCOUNT_OPTIONS
                            .into_iter()
                            .map(|(value, label)| view! {
                                <label class="filter-option">
                                    <input
                                        type="radio"
                                        name="discount"
                                        prop:checked=move || filters.with(|f| f.min_discount == Some(value))
                                        on:click=move |_| set_filter(FilterPatch::toggle_min_discount(value))
                                    />
                                    <span>{label}</span>
                                </label>
                            })
                            .collect_view()}
                    </div>

                    <div class="filter-section">
                        <h4>"PRICE"</h4>
                        <button
                            class="reset-price-btn"
                            on:click=move |_| set_filter(FilterPatch::price_range(0, observed_max.get_untracked()))
                        >
                            "Reset"
                        </button>
                        <div class="price-selects">
                            <select
                                prop:value=move || filters.with(|f| f.min_price.to_string())
                                on:change=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<u64>() {
                                        set_filter(FilterPatch::min_price(v));
                                    }
                                }
                            >
                                {MIN_PRICE_OPTIONS
                                    .into_iter()
                                    .map(|v| view! {
                                        <option value=v.to_string()>{format!("₹{}+", group_indian(v as f64))}</option>
                                    })
                                    .collect_view()}
                            </select>
                            <span>"to"</span>
                            <select
                                prop:value=move || filters.with(|f| f.max_price.to_string())
                                on:change=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<u64>() {
                                        set_filter(FilterPatch::max_price(v));
                                    }
                                }
                            >
                                {move || {
                                    max_price_options(observed_max.get(), filters.with(|f| f.max_price))
                                        .into_iter()
                                        .map(|v| view! {
                                            <option value=v.to_string()>{format_inr(v as f64)}</option>
                                        })
                                        .collect_view()
                                }}
                            </select>
                        </div>
                    </div>
                </aside>

                <main class="products-section">
                    <div class="results-header">
                        <h2>"Best TV Deals"</h2>
                        <span class="results-count">
                            {move || {
                                exec.with(|e| {
                                    if e.is_loading() {
                                        "Loading...".to_string()
                                    } else {
                                        format!("{} products found", e.results().len())
                                    }
                                })
                            }}
                        </span>
                    </div>

                    {move || {
                        exec.with(|e| e.error().cloned())
                            .map(|err| view! {
                                <div class="warning-box warning-box--error">
                                    <span class="warning-box__icon">"⚠"</span>
                                    <span class="warning-box__text">{err.to_string()}</span>
                                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                                        "Retry"
                                    </Button>
                                </div>
                            })
                    }}

                    {move || {
                        let (loading, empty, failed) = exec
                            .with(|e| (e.is_loading(), e.results().is_empty(), e.error().is_some()));
                        if loading {
                            view! {
                                <div class="loading-container">
                                    <div class="spinner"></div>
                                    <p>"Finding best deals..."</p>
                                </div>
                            }
                            .into_any()
                        } else if empty && !failed {
                            view! {
                                <div class="empty-state">
                                    <span class="empty-icon">"🔍"</span>
                                    <h3>"No products found"</h3>
                                    <p>"Try adjusting your filters or search terms"</p>
                                    <button on:click=move |_| reset_filters()>"Clear Filters"</button>
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
                            key=|d| d.model_id.clone()
                            children=move |deal| view! { <DealCard deal=deal /> }
                        />
                    </div>

                    <Show when=move || exec.with(|e| !e.is_loading() && !e.results().is_empty())>
                        <Pagination
                            filters=filters
                            loaded=Signal::derive(move || exec.with(|e| e.results().len()))
                            page_size=cfg.page_size
                            on_page=Callback::new(move |p: u32| set_filter(FilterPatch::page(p)))
                        />
                    </Show>
                </main>
            </div>
        </div>
    }
}

#[component]
fn Pagination(
    filters: Memo<FilterState>,
    #[prop(into)] loaded: Signal<usize>,
    page_size: u32,
    on_page: Callback<u32>,
) -> impl IntoView {
    let page = move || filters.with(|f| f.page);
    view! {
        <div class="pagination">
            <button
                disabled=move || page() <= 1
                on:click=move |_| on_page.run(previous_page(page()))
            >
                "← Previous"
            </button>
            <span>{move || format!("Page {}", page())}</span>
            <button
                disabled=move || !has_next_page(loaded.get(), page_size)
                on:click=move |_| on_page.run(next_page(page()))
            >
                "Next →"
            </button>
        </div>
    }
}
