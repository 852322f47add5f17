use crate::settings;
use crate::utils::*;
use bitflags::bitflags;
use chrono::prelude::*;
use clap::Args;
use proyectos_core as game;
use game::LayoutGenerator;
use yew::prelude::*;

const BOO_SOUND: &str = "boo.mp3";

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Revealed(u8),
    Flagged,
    Pumpkin,
}

impl From<&game::GridCell> for ViewCellState {
    fn from(cell: &game::GridCell) -> Self {
        match cell {
            game::GridCell { flagged: true, .. } => Self::Flagged,
            game::GridCell {
                revealed: true,
                mine: true,
                ..
            } => Self::Pumpkin,
            game::GridCell {
                revealed: true,
                around,
                ..
            } => Self::Revealed(*around),
            _ => Self::Hidden,
        }
    }
}

impl ViewCellState {
    fn label(self) -> String {
        use ViewCellState::*;
        match self {
            Hidden => String::new(),
            Revealed(count) => count.to_string(),
            Flagged => "🕯️".to_string(),
            Pumpkin => "🎃".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Playing,
    Won,
    Lost,
}

/// The board being played, with the move handling the screen needs around it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub board: game::Board,
}

impl GameSession {
    fn new(seed: u64, config: game::GameConfig) -> Self {
        let layout = game::RunningOddsGenerator::new(seed).generate(config);
        Self {
            board: game::Board::new(layout),
        }
    }

    fn view_state(&self) -> ViewGameState {
        use game::BoardState::*;
        match self.board.state() {
            Ready | Active => ViewGameState::Playing,
            Won => ViewGameState::Won,
            Lost => ViewGameState::Lost,
        }
    }

    fn reveal(&mut self, coords: game::Coord2) -> game::RevealOutcome {
        match self.board.reveal(coords) {
            Ok(outcome) => {
                if self.board.is_finished() && outcome.has_update() {
                    log::info!("game {:?}", self.board.state());
                }
                outcome
            }
            Err(err) => {
                log::debug!("reveal {:?} rejected: {}", coords, err);
                game::RevealOutcome::NoChange
            }
        }
    }

    fn toggle_flag(&mut self, coords: game::Coord2) -> bool {
        match self.board.toggle_flag(coords) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::debug!("flag {:?} rejected: {}", coords, err);
                false
            }
        }
    }
}

fn play_boo() {
    use wasm_bindgen_futures::{JsFuture, spawn_local};

    let audio = match web_sys::HtmlAudioElement::new_with_src(BOO_SOUND) {
        Ok(audio) => audio,
        Err(err) => {
            log::error!("could not load {}: {:?}", BOO_SOUND, err);
            return;
        }
    };
    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("could not play {}: {:?}", BOO_SOUND, err);
            }
        }),
        Err(err) => log::warn!("could not play {}: {:?}", BOO_SOUND, err),
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
    }
}

impl MouseButtons {
    const fn is_chord(self) -> bool {
        self.bits().count_ones() > 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    /// Click without a pointer, e.g. Enter or Space on a focused cell
    Activate(game::Coord2),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    NewGame,
    UpdateSettings(settings::Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    pos: game::Coord2,
    cell_state: ViewCellState,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        pos,
        cell_state,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Hidden => classes!(),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Flagged => classes!("flag"),
            Pumpkin => classes!("open", "mine"),
        }
    );
    if pressed {
        class.push("pressed");
    }

    let pointer_update = |name: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState { pos, buttons }));
            log::trace!("{:?} mouse {} ({:?})", pos, name, buttons);
        })
    };
    let onmousedown = pointer_update("down");
    let onmouseup = pointer_update("up");
    let onmouseenter = pointer_update("enter");
    let onclick = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            // pointer clicks are already handled on mouseup
            if e.detail() == 0 {
                callback.emit(CellMsg::Activate(pos));
            }
        })
    };
    let onmouseleave = Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Leave));

    html! {
        <button {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave} {onclick}>
            {cell_state.label()}
        </button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    game: GameSession,
    seed: u64,
    current_cell_state: Option<CellPointerState>,
    chord_pressed: bool,
}

impl GameView {
    fn restart(&mut self, seed: u64) {
        log::debug!("new grid {:?} with seed {}", self.settings.config, seed);
        self.seed = seed;
        self.game = GameSession::new(seed, self.settings.config);
    }

    fn reveal_cell(&mut self, coords: game::Coord2) -> bool {
        let outcome = self.game.reveal(coords);
        if outcome == game::RevealOutcome::HitMine {
            play_boo();
        }
        outcome.has_update()
    }

    fn flag_cell(&mut self, coords: game::Coord2) -> bool {
        self.game.toggle_flag(coords)
    }

    fn on_cell_msg(&mut self, msg: CellMsg) -> bool {
        use CellMsg::*;

        match msg {
            Leave => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            Update(pointer) => self.on_pointer(pointer),
            Activate(pos) => {
                log::debug!("reveal cell: {:?}", pos);
                self.reveal_cell(pos)
            }
        }
    }

    /// Resolves a pointer update; buttons released over a cell act on the cell they were pressed on.
    ///
    /// A press that ever held several buttons does nothing, however its buttons are released.
    fn on_pointer(&mut self, pointer: CellPointerState) -> bool {
        if !pointer.buttons.is_empty() {
            self.chord_pressed |= pointer.buttons.is_chord();
            return self.current_cell_state.replace(pointer) != Some(pointer);
        }

        let chord_pressed = core::mem::take(&mut self.chord_pressed);
        match self.current_cell_state.take() {
            None => false,
            Some(_) if chord_pressed => true,
            Some(CellPointerState { pos, buttons }) => match buttons {
                MouseButtons::LEFT => {
                    log::debug!("reveal cell: {:?}", pos);
                    self.reveal_cell(pos);
                    true
                }
                MouseButtons::RIGHT => {
                    log::debug!("flag cell: {:?}", pos);
                    self.flag_cell(pos);
                    true
                }
                _ => true,
            },
        }
    }

    fn is_pressed(&self, coords: game::Coord2, cell_state: ViewCellState) -> bool {
        matches!(
            (self.current_cell_state, cell_state),
            (
                Some(CellPointerState {
                    pos,
                    buttons: MouseButtons::LEFT,
                }),
                ViewCellState::Hidden,
            ) if pos == coords && !self.chord_pressed
        )
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="board">
                {
                    for self.game.board.rows().enumerate().map(|(row, cells)| html! {
                        <div class="row" key={row}>
                            {
                                for cells.enumerate().map(|(col, cell)| {
                                    // grid sides never exceed GameConfig::MAX_SIZE
                                    let pos = (row as game::Coord, col as game::Coord);
                                    let cell_state = ViewCellState::from(&cell);
                                    let pressed = self.is_pressed(pos, cell_state);
                                    let callback = ctx.link().callback(Msg::CellEvent);
                                    html! {
                                        <CellView key={cell.id} {pos} {cell_state} {pressed} {callback}/>
                                    }
                                })
                            }
                        </div>
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: settings::Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        Self {
            game: GameSession::new(seed, settings.config),
            settings,
            seed,
            current_cell_state: None,
            chord_pressed: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellEvent(cell_msg) => self.on_cell_msg(cell_msg),
            NewGame => {
                self.restart(js_random_seed());
                true
            }
            UpdateSettings(settings) => {
                if self.settings == settings {
                    return false;
                }
                self.settings = settings;
                self.settings.local_save();
                self.restart(js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;

        let game_state = self.game.view_state();
        let available_cells = self.game.board.available_cells();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            Msg::NewGame
        });
        let cb_settings = ctx.link().callback(Msg::UpdateSettings);

        html! {
            <main class="booscaminas" data-seed={self.seed.to_string()} oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <header>{"booscaminas"}</header>
                if game_state == ViewGameState::Playing {
                    <SettingsView settings={self.settings} {available_cells} on_change={cb_settings}/>
                }
                <section>
                    {
                        match game_state {
                            ViewGameState::Playing => self.view_board(ctx),
                            ViewGameState::Lost => html! {
                                <span class="lose">
                                    {format!("Perdiste capo. Te quedaron {} casillas disponibles", available_cells)}
                                </span>
                            },
                            ViewGameState::Won => html! {
                                <span class="win">{"¡Ganaste! idolo bestia maestro distinto."}</span>
                            },
                        }
                    }
                    <button class="reset" onclick={cb_new_game}>{"Reset"}</button>
                </section>
                <footer>{format!("© {} booscaminas", utc_now().year())}</footer>
            </main>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: game::Coord2, mines: &[game::Coord2]) -> GameSession {
        let layout = game::MineLayout::from_mine_coords(size, mines).unwrap();
        GameSession {
            board: game::Board::new(layout),
        }
    }

    fn view(size: game::Coord2, mines: &[game::Coord2]) -> GameView {
        GameView {
            settings: settings::Settings::default(),
            game: session(size, mines),
            seed: 0,
            current_cell_state: None,
            chord_pressed: false,
        }
    }

    fn pointer(pos: game::Coord2, buttons: MouseButtons) -> CellMsg {
        CellMsg::Update(CellPointerState { pos, buttons })
    }

    #[test]
    fn cell_states_follow_grid_cells() {
        let mut session = session((2, 2), &[(0, 0)]);

        session.reveal((1, 1));
        session.toggle_flag((0, 1));

        assert_eq!(
            ViewCellState::from(&session.board.cell((1, 1))),
            ViewCellState::Revealed(1)
        );
        assert_eq!(
            ViewCellState::from(&session.board.cell((0, 1))),
            ViewCellState::Flagged
        );
        assert_eq!(
            ViewCellState::from(&session.board.cell((1, 0))),
            ViewCellState::Hidden
        );

        session.reveal((0, 0));
        assert_eq!(
            ViewCellState::from(&session.board.cell((0, 0))),
            ViewCellState::Pumpkin
        );
    }

    #[test]
    fn hitting_a_pumpkin_loses_and_ends_the_game() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.reveal((0, 0)), game::RevealOutcome::HitMine);
        assert_eq!(session.view_state(), ViewGameState::Lost);
        assert_eq!(session.reveal((1, 1)), game::RevealOutcome::NoChange);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert!(session.toggle_flag((0, 0)));
        assert_eq!(session.reveal((0, 0)), game::RevealOutcome::NoChange);
        assert_eq!(session.view_state(), ViewGameState::Playing);
    }

    #[test]
    fn revealing_all_safe_cells_wins() {
        let mut session = session((2, 2), &[(0, 0)]);

        for pos in [(0, 1), (1, 0), (1, 1)] {
            session.reveal(pos);
        }
        assert_eq!(session.view_state(), ViewGameState::Won);
    }

    #[test]
    fn left_release_reveals_and_right_release_flags() {
        let mut view = view((2, 2), &[(0, 0)]);

        view.on_cell_msg(pointer((1, 1), MouseButtons::LEFT));
        assert!(view.is_pressed((1, 1), ViewCellState::Hidden));
        view.on_cell_msg(pointer((1, 1), MouseButtons::empty()));
        assert!(view.game.board.cell((1, 1)).revealed);

        view.on_cell_msg(pointer((0, 1), MouseButtons::RIGHT));
        view.on_cell_msg(pointer((0, 1), MouseButtons::empty()));
        assert!(view.game.board.cell((0, 1)).flagged);
    }

    #[test]
    fn chord_released_one_button_at_a_time_does_nothing() {
        let mut view = view((2, 2), &[(0, 0)]);

        view.on_cell_msg(pointer((1, 1), MouseButtons::LEFT));
        view.on_cell_msg(pointer((1, 1), MouseButtons::LEFT | MouseButtons::RIGHT));
        view.on_cell_msg(pointer((1, 1), MouseButtons::LEFT));
        assert!(!view.is_pressed((1, 1), ViewCellState::Hidden));
        view.on_cell_msg(pointer((1, 1), MouseButtons::empty()));

        let cell = view.game.board.cell((1, 1));
        assert!(!cell.revealed);
        assert!(!cell.flagged);

        view.on_cell_msg(pointer((1, 1), MouseButtons::LEFT));
        view.on_cell_msg(pointer((1, 1), MouseButtons::empty()));
        assert!(view.game.board.cell((1, 1)).revealed);
    }

    #[test]
    fn keyboard_activation_reveals_the_cell() {
        let mut view = view((2, 2), &[(0, 0)]);

        assert!(view.on_cell_msg(CellMsg::Activate((1, 0))));
        assert_eq!(
            ViewCellState::from(&view.game.board.cell((1, 0))),
            ViewCellState::Revealed(1)
        );
        assert!(!view.on_cell_msg(CellMsg::Activate((1, 0))));
    }

    #[test]
    fn labels_match_cell_states() {
        assert_eq!(ViewCellState::Hidden.label(), "");
        assert_eq!(ViewCellState::Revealed(3).label(), "3");
        assert_eq!(ViewCellState::Flagged.label(), "🕯️");
        assert_eq!(ViewCellState::Pumpkin.label(), "🎃");
    }
}
