//! kantodex - Kanto Pokedex TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use kantodex::action::Action;
use kantodex::api;
use kantodex::components::{Component, DetailView, DetailViewProps, DexList, DexListProps};
use kantodex::effect::Effect;
use kantodex::nav::NavTarget;
use kantodex::reducer::reducer;
use kantodex::state::{AppState, Screen, DEFAULT_LIMIT, SPINNER_TICK_MS};

/// Kanto Pokedex TUI
#[derive(Parser, Debug)]
#[command(name = "kantodex")]
#[command(about = "A Kanto Pokedex TUI demonstrating tui-dispatch patterns")]
struct Args {
    /// Open the detail screen for this creature id on startup
    #[arg(long)]
    id: Option<String>,

    /// How many catalog entries to list (the first generation by default)
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    List,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    List,
    Detail,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        match self.screen {
            Screen::List => Some(DexComponentId::List),
            Screen::Detail => Some(DexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        match self.screen {
            Screen::Detail => Some(DexComponentId::Detail),
            Screen::List => None,
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::List => DexContext::List,
            DexComponentId::Detail => DexContext::Detail,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        id,
        limit,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(limit))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // Deep link: `--id 25` opens the detail screen directly; a malformed
    // id falls back to the default creature.
    let init_action = match id.as_deref() {
        Some(param) => Action::DetailOpen(NavTarget::from_param(param)),
        None => Action::ListFetch,
    };

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, init_action, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct DexUi {
    list: DexList,
    detail: DetailView,
}

impl DexUi {
    fn new() -> Self {
        Self {
            list: DexList::new(),
            detail: DetailView,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        match state.screen {
            Screen::List => {
                event_ctx.set_component_area(DexComponentId::List, area);
                event_ctx.component_areas.remove(&DexComponentId::Detail);
                self.list.render(
                    frame,
                    area,
                    DexListProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            Screen::Detail => {
                event_ctx.set_component_area(DexComponentId::Detail, area);
                event_ctx.component_areas.remove(&DexComponentId::List);
                self.detail.render(
                    frame,
                    area,
                    DetailViewProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
        }
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .list
            .handle_event(
                event,
                DexListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    init_action: Action,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail.borrow_mut().handle_detail_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(init_action),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning keyed tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchList { limit } => {
            ctx.tasks().spawn(TaskKey::new("list"), async move {
                let result = async {
                    let refs = api::list_first_page(limit).await?;
                    api::enrich_references(refs).await
                }
                .await;
                match result {
                    Ok(summaries) => Action::ListDidLoad(summaries),
                    Err(error) => Action::ListDidError(error),
                }
            });
        }
        Effect::FetchDetail { target } => {
            // One fixed key: a new navigation replaces the outstanding
            // fetch instead of racing it.
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match api::fetch_detail(&target).await {
                    Ok(detail) => Action::DetailDidLoad { target, detail },
                    Err(error) => Action::DetailDidError { target, error },
                }
            });
        }
        Effect::AbandonDetail => {
            ctx.tasks().cancel(&TaskKey::new("detail"));
        }
    }
}
