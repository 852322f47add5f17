use crate::utils::*;
use proyectos_core::{CellCount, Coord, GameConfig};
use serde::{Deserialize, Serialize};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub config: GameConfig,
}

impl Settings {
    pub(crate) fn with_size(self, size: Coord) -> Self {
        Self {
            config: GameConfig::new(size, self.config.mines),
        }
    }

    pub(crate) fn with_mines(self, mines: CellCount) -> Self {
        Self {
            config: GameConfig::new(self.config.size, mines),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "booscaminas:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub settings: Settings,
    pub available_cells: CellCount,
    pub on_change: Callback<Settings>,
}

/// Emits updated settings when `value` parses, ignores anything else typed in the box.
fn number_input<T: core::str::FromStr + 'static>(
    settings: Settings,
    on_change: Callback<Settings>,
    apply: fn(Settings, T) -> Settings,
) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let value = e.target_unchecked_into::<HtmlInputElement>().value();
        match value.trim().parse::<T>() {
            Ok(parsed) => on_change.emit(apply(settings, parsed)),
            Err(_) => log::trace!("ignoring input {:?}", value),
        }
    })
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        settings,
        available_cells,
        on_change,
    } = props;
    let config = settings.config;

    let on_size = number_input(*settings, on_change.clone(), Settings::with_size);
    let on_mines = number_input(*settings, on_change.clone(), Settings::with_mines);

    html! {
        <section class="settings">
            <label for="size">
                <span>{"Configura el tamaño de la grilla"}</span>
                <input
                    type="number"
                    name="size"
                    id="size"
                    min={GameConfig::MIN_SIZE.to_string()}
                    max={GameConfig::MAX_SIZE.to_string()}
                    value={config.size.to_string()}
                    oninput={on_size}
                />
            </label>
            <label for="mines">
                <span>{"Configura la cantidad de minas"}</span>
                <input
                    type="number"
                    name="mines"
                    id="mines"
                    min="1"
                    max={config.total_cells().saturating_sub(1).to_string()}
                    value={config.mines.to_string()}
                    oninput={on_mines}
                />
            </label>
            <span>{format!("Casillas disponibles {}", available_cells)}</span>
        </section>
    }
}
