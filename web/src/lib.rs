use clap::{Parser, ValueEnum};
use wasm_bindgen::prelude::*;

mod game;
mod search;
mod settings;
mod utils;

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq)]
enum Page {
    /// The pumpkin grid game
    #[default]
    Booscaminas,
    /// Product search list
    Buscador,
    /// Product search list with sorting and remembered preferences
    BuscadorOrdenado,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Which demo to mount
    #[arg(short, long, value_enum, default_value_t)]
    page: Page,

    #[command(flatten)]
    game: game::GameProps,

    #[command(flatten)]
    search: search::SearchProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    log::debug!("mounting {:?}", args.page);
    match args.page {
        Page::Booscaminas => {
            yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
        }
        Page::Buscador | Page::BuscadorOrdenado => {
            let variant = if args.page == Page::BuscadorOrdenado {
                search::ListVariant::Sorted
            } else {
                search::ListVariant::Plain
            };
            let props = search::SearchProps {
                variant,
                ..args.search
            };
            yew::Renderer::<search::SearchView>::with_root_and_props(root, props).render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(hash: &str) -> Args {
        Args::try_parse_from(hash.split(['#', '&'])).unwrap()
    }

    #[test]
    fn empty_hash_mounts_the_game() {
        let args = parse("");
        assert_eq!(args.page, Page::Booscaminas);
        assert_eq!(args.game.seed, None);
        assert_eq!(args.search.latency_ms, 300);
    }

    #[test]
    fn hash_flags_select_page_and_options() {
        let args = parse("#--page=buscador-ordenado&--latency=50&-s&42");
        assert_eq!(args.page, Page::BuscadorOrdenado);
        assert_eq!(args.search.latency_ms, 50);
        assert_eq!(args.game.seed, Some(42));
    }
}
