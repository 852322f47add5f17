use crate::utils::*;
use clap::Args;
use gloo::timers::future::TimeoutFuture;
use proyectos_core::{
    Catalog, Product, SearchApi, SearchSession, SearchTicket, SortMode, format_price,
};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

const QUERY_KEY: &str = "query";
const SORT_KEY: &str = "sort";

/// Which flavor of the product list to show.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum ListVariant {
    /// Search only, results in API order
    #[default]
    Plain,
    /// Search plus sorting, remembering query and sort mode
    Sorted,
}

impl ListVariant {
    const fn is_sorted(self) -> bool {
        matches!(self, Self::Sorted)
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct SearchProps {
    /// Simulated latency of the product API, in milliseconds
    #[arg(long = "latency", default_value_t = 300)]
    pub latency_ms: u32,

    #[arg(skip)]
    pub variant: ListVariant,
}

/// Parses a stored sort mode, falling back to sorting by name.
fn restore_sort(stored: Option<String>) -> SortMode {
    stored
        .map(|raw| {
            raw.parse().unwrap_or_else(|err| {
                log::warn!("ignoring stored sort mode: {}", err);
                SortMode::default()
            })
        })
        .unwrap_or_default()
}

fn price_label(variant: ListVariant, product: &Product) -> String {
    if variant.is_sorted() {
        format_price(product.price)
    } else {
        format!("$ {}", product.price)
    }
}

pub(crate) enum Msg {
    QueryChanged(String),
    SortChanged(SortMode),
    Results(SearchTicket, Vec<Product>),
}

pub(crate) struct SearchView {
    session: SearchSession,
    api: Rc<Catalog>,
}

impl SearchView {
    fn dispatch(&self, ctx: &Context<Self>, ticket: SearchTicket) {
        let api = Rc::clone(&self.api);
        let query = self.session.query().to_string();
        let latency_ms = ctx.props().latency_ms;
        log::debug!("search {:?} as {:?}", query, ticket);

        ctx.link().send_future(async move {
            TimeoutFuture::new(latency_ms).await;
            Msg::Results(ticket, api.search(&query))
        });
    }

    fn view_product(variant: ListVariant, product: &Product) -> Html {
        let price_class = (!variant.is_sorted() && product.is_on_sale()).then_some("sale");
        html! {
            <li key={product.id}>
                <h4>{product.title.clone()}</h4>
                <p>{product.description.clone()}</p>
                <span class={classes!(price_class)}>{price_label(variant, product)}</span>
            </li>
        }
    }

    fn view_sort_select(&self, ctx: &Context<Self>) -> Html {
        let current = self.session.sort().unwrap_or_default();
        let onchange = ctx.link().batch_callback(|e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            match value.parse::<SortMode>() {
                Ok(mode) => Some(Msg::SortChanged(mode)),
                Err(err) => {
                    log::warn!("{}", err);
                    None
                }
            }
        });

        html! {
            <select name="sortProducts" id="sortProducts" {onchange}>
                {
                    for SortMode::ALL.into_iter().map(|mode| html! {
                        <option value={mode.as_str()} selected={mode == current}>{mode.label()}</option>
                    })
                }
            </select>
        }
    }
}

impl Component for SearchView {
    type Message = Msg;
    type Properties = SearchProps;

    fn create(ctx: &Context<Self>) -> Self {
        let session = if ctx.props().variant.is_sorted() {
            let query = load_text(QUERY_KEY).unwrap_or_default();
            let sort = restore_sort(load_text(SORT_KEY));
            SearchSession::new(query, Some(sort))
        } else {
            SearchSession::new("", None)
        };

        let api = Catalog::builtin().unwrap_or_else(|err| {
            log::error!("{}", err);
            Catalog::default()
        });

        let mut view = Self {
            session,
            api: Rc::new(api),
        };
        let ticket = view.session.refresh();
        view.dispatch(ctx, ticket);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let variant = ctx.props().variant;
        match msg {
            QueryChanged(query) => {
                if variant.is_sorted() {
                    save_text(QUERY_KEY, &query);
                }
                match self.session.set_query(query) {
                    Some(ticket) => {
                        self.dispatch(ctx, ticket);
                        true
                    }
                    None => false,
                }
            }
            SortChanged(mode) => {
                log::debug!("sort by {}", mode);
                save_text(SORT_KEY, mode.as_str());
                self.session.set_sort(mode)
            }
            Results(ticket, products) => {
                log::debug!("{} results for {:?}", products.len(), ticket);
                self.session.apply_results(ticket, products)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let products = self.session.visible();
        let oninput = ctx.link().callback(|e: InputEvent| {
            Msg::QueryChanged(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <main class="buscador">
                <h1>{"Tienda digitaloncy"}</h1>
                <input name="text" placeholder="tv" type="text" value={self.session.query().to_string()} {oninput}/>
                if variant.is_sorted() {
                    { self.view_sort_select(ctx) }
                }
                <ul>
                    if products.is_empty() {
                        if self.session.is_loading() {
                            <span>{"cargando..."}</span>
                        } else {
                            <span>{"sin resultados"}</span>
                        }
                    } else {
                        { for products.iter().map(|product| Self::view_product(variant, product)) }
                    }
                </ul>
            </main>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64) -> Product {
        Product {
            id: 1,
            title: "Antena".to_string(),
            description: String::new(),
            price,
        }
    }

    #[test]
    fn stored_sort_mode_is_restored() {
        assert_eq!(restore_sort(Some("PRICE".to_string())), SortMode::Price);
        assert_eq!(restore_sort(Some("NAME".to_string())), SortMode::Name);
    }

    #[test]
    fn missing_or_unknown_sort_mode_falls_back_to_name() {
        assert_eq!(restore_sort(None), SortMode::Name);
        assert_eq!(restore_sort(Some("PRECIO".to_string())), SortMode::Name);
    }

    #[test]
    fn price_labels_depend_on_variant() {
        assert_eq!(price_label(ListVariant::Plain, &product(99.5)), "$ 99.5");
        assert_eq!(
            price_label(ListVariant::Sorted, &product(1500.0)),
            "$\u{a0}1.500,00"
        );
    }

    #[test]
    fn storage_keys_are_fixed() {
        assert_eq!(QUERY_KEY, "query");
        assert_eq!(SORT_KEY, "sort");
    }
}
