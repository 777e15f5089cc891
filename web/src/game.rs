use crate::settings::Settings;
use crate::utils::*;
use clap::Args;
use gameportal_core as game;
use game::{CellView, Coord2, Difficulty, GameSession, GameStatus, SessionId, Snapshot};
use gloo::timers::callback::Interval;
use yew::prelude::*;

/// Milliseconds between two ticks of the elapsed-time counter.
const TICK_MILLIS: u32 = 1000;

/// Owns the current session and swaps it out on restart or difficulty change.
#[derive(Debug)]
pub(crate) struct GameHost {
    difficulty: Difficulty,
    session: GameSession,
    next_id: SessionId,
}

impl GameHost {
    fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            session: GameSession::new(0, difficulty.config(), seed),
            next_id: 1,
        }
    }

    fn start(&mut self, difficulty: Difficulty, seed: u64) {
        self.difficulty = difficulty;
        self.session = GameSession::new(self.next_id, difficulty.config(), seed);
        self.next_id += 1;
    }

    /// Same difficulty, fresh board.
    fn restart(&mut self, seed: u64) {
        self.session = self.session.restart(self.next_id, seed);
        self.next_id += 1;
    }

    fn reveal(&mut self, coords: Coord2) -> bool {
        self.session.handle_reveal(coords).has_update()
    }

    fn flag(&mut self, coords: Coord2) -> bool {
        self.session.toggle_flag(coords).has_update()
    }

    /// Ticks addressed to a session that was already replaced are dropped.
    fn tick(&mut self, session_id: SessionId) -> bool {
        if session_id != self.session.id() {
            log::trace!("stale tick for session {}", session_id);
            return false;
        }
        self.session.tick()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(&self.session)
    }
}

fn cell_glyph(view: CellView) -> String {
    match view {
        CellView::Hidden | CellView::Empty => String::new(),
        CellView::Flagged => "🚩".to_string(),
        CellView::Mine => "💣".to_string(),
        CellView::Number(count) => count.to_string(),
    }
}

fn cell_classes(view: CellView) -> Classes {
    classes!(
        "cell",
        if view.is_revealed() { "open" } else { "closed" },
        match view {
            CellView::Hidden | CellView::Empty => None,
            CellView::Flagged => Some("flag".to_string()),
            CellView::Mine => Some("mine".to_string()),
            CellView::Number(count) => Some(format!("num-{}", count)),
        }
    )
}

/// Locked cells get no listener at all, so clicks on a finished board go nowhere.
fn cell_listener(
    coords: Coord2,
    locked: bool,
    target: Callback<Coord2>,
) -> Option<Callback<MouseEvent>> {
    (!locked).then(|| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            log::trace!("{:?} {}", coords, e.type_());
            target.emit(coords);
        })
    })
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(Coord2),
    Flag(Coord2),
    Tick(SessionId),
    SelectDifficulty(Difficulty),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    coords: Coord2,
    view: CellView,
    #[prop_or_default]
    locked: bool,
    on_reveal: Callback<Coord2>,
    on_flag: Callback<Coord2>,
}

#[function_component(CellButton)]
fn cell_button(props: &CellProps) -> Html {
    let CellProps {
        coords,
        view,
        locked,
        on_reveal,
        on_flag,
    } = props.clone();

    let mut class = cell_classes(view);
    if locked {
        class.push("locked");
    }

    let onclick = cell_listener(coords, locked, on_reveal);
    let oncontextmenu = cell_listener(coords, locked, on_flag);

    html! {
        <td {class} {onclick} {oncontextmenu}>{cell_glyph(view)}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,

    /// Start on this difficulty (easy, medium, hard) instead of the saved one
    #[arg(short, long)]
    #[prop_or_default]
    pub difficulty: Option<Difficulty>,
}

pub(crate) struct GameView {
    settings: Settings,
    host: GameHost,
    forced_seed: Option<u64>,
    timer: Option<Interval>,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    /// Keeps exactly one interval alive while the session clock runs, and none otherwise.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let running = self.host.session.clock().is_running();
        match (running, self.timer.is_some()) {
            (true, false) => {
                let session_id = self.host.session.id();
                let link = ctx.link().clone();
                log::debug!("timer started for session {}", session_id);
                self.timer = Some(Interval::new(TICK_MILLIS, move || {
                    link.send_message(Msg::Tick(session_id))
                }));
            }
            (false, true) => {
                log::debug!("timer stopped for session {}", self.host.session.id());
                // dropping the interval cancels it
                self.timer = None;
            }
            _ => {}
        }
    }

    fn replace_session(&mut self, difficulty: Difficulty) {
        self.timer = None;
        let seed = self.next_seed();
        self.host.start(difficulty, seed);
    }

    fn new_game(&mut self) {
        self.timer = None;
        let seed = self.next_seed();
        self.host.restart(seed);
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut settings = Settings::local_or_default();
        if let Some(difficulty) = props.difficulty {
            settings.difficulty = difficulty;
        }
        let forced_seed = props.seed;
        let seed = forced_seed.unwrap_or_else(js_random_seed);

        Self {
            settings,
            host: GameHost::new(settings.difficulty, seed),
            forced_seed,
            timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Reveal(coords) => {
                log::debug!("reveal cell: {:?}", coords);
                self.host.reveal(coords)
            }
            Flag(coords) => {
                log::debug!("mark cell: {:?}", coords);
                self.host.flag(coords)
            }
            Tick(session_id) => self.host.tick(session_id),
            SelectDifficulty(difficulty) => {
                log::debug!("difficulty: {}", difficulty);
                self.settings.difficulty = difficulty;
                self.settings.local_save();
                self.replace_session(difficulty);
                true
            }
            NewGame => {
                log::debug!("new game");
                self.new_game();
                true
            }
        };

        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.host.snapshot();
        let locked = snapshot.status.is_finished();

        let on_reveal = ctx.link().callback(Msg::Reveal);
        let on_flag = ctx.link().callback(Msg::Flag);
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);

        let difficulty_buttons = Difficulty::ALL.into_iter().map(|difficulty| {
            let class = classes!(
                "difficulty",
                (difficulty == self.host.difficulty).then_some("active")
            );
            let onclick = ctx
                .link()
                .callback(move |_: MouseEvent| Msg::SelectDifficulty(difficulty));
            html! {
                <button {class} {onclick}>{difficulty.label()}</button>
            }
        });

        let result = match snapshot.status {
            GameStatus::Playing => html! {},
            GameStatus::Won => html! {
                <div class="result win">
                    <strong>{"Victory!"}</strong>
                    <p>{format!("Time: {} seconds", snapshot.elapsed_secs)}</p>
                </div>
            },
            GameStatus::Lost => html! {
                <div class="result loss">
                    <strong>{"Defeat!"}</strong>
                    <p>{"Try again!"}</p>
                </div>
            },
        };

        html! {
            <div class="minesweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <span class="difficulties">{ for difficulty_buttons }</span>
                    <aside class="timer">{format!("{}s", snapshot.elapsed_secs)}</aside>
                    <aside class="mines-left">{snapshot.mines_left.to_string()}</aside>
                    <button class="new-game" onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <table class={(!locked).then_some("playable")}>
                    {
                        for snapshot.rows().map(|(_, cells)| html! {
                            <tr>
                                {
                                    for cells.map(|(coords, view)| html! {
                                        <CellButton
                                            {coords}
                                            {view}
                                            {locked}
                                            on_reveal={on_reveal.clone()}
                                            on_flag={on_flag.clone()}
                                        />
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                {result}
            </div>
        }
    }
}
