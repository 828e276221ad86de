//! skypanel - terminal weather client

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use skypanel::action::Action;
use skypanel::api::OpenWeatherClient;
use skypanel::components::{Component, WeatherDisplay, WeatherDisplayProps};
use skypanel::config::{Config, Overrides, API_KEY_ENV};
use skypanel::effect::{Effect, EffectRunner};
use skypanel::reducer::reducer;
use skypanel::state::{AppState, Coordinates, RecoveryPolicy, LOADING_ANIM_TICK_MS};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Current weather for your location or any city
#[derive(Parser, Debug)]
#[command(name = "skypanel")]
#[command(about = "Current weather conditions in the terminal")]
struct Args {
    /// Look up this city at start-up instead of locating
    #[arg(long, short)]
    city: Option<String>,

    /// Latitude to report as the current location
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude to report as the current location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Skip the location service and go straight to the default city
    #[arg(long)]
    no_locate: bool,

    /// City used when location is unavailable
    #[arg(long)]
    default_city: Option<String>,

    /// What a failed lookup does to the last snapshot
    #[arg(long, value_enum)]
    recovery: Option<RecoveryPolicy>,

    /// OpenWeatherMap API key (overrides config and environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Provider base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            default_city: self.default_city.clone(),
            recovery: self.recovery,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            log_file: self.log_file.clone(),
            coords: self.lat.zip(self.lon).map(|(lat, lon)| Coordinates::new(lat, lon)),
            no_locate: self.no_locate,
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SkyComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SkyContext {
    Main,
}

impl EventRoutingState<SkyComponentId, SkyContext> for AppState {
    fn focused(&self) -> Option<SkyComponentId> {
        Some(SkyComponentId::Display)
    }

    fn modal(&self) -> Option<SkyComponentId> {
        None
    }

    fn binding_context(&self, _id: SkyComponentId) -> SkyContext {
        SkyContext::Main
    }

    fn default_context(&self) -> SkyContext {
        SkyContext::Main
    }
}

fn load_config(args: &Args) -> Config {
    let path = args.config.clone().or_else(Config::default_path);
    let loaded = match &path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let config = match loaded {
        Ok(config) => config
            .with_env_key(std::env::var(API_KEY_ENV).ok())
            .with_overrides(&args.overrides()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        if let Some(path) = path {
            eprintln!("Set provider.api_key in {}", path.display());
        }
        std::process::exit(1);
    }
    config
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = load_config(&args);

    if let Err(e) = skypanel::init_logging(&config.log_path()) {
        eprintln!("Warning: logging disabled ({e})");
    }

    let client = match OpenWeatherClient::new(&config.provider) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let runner = EffectRunner::new(client, config.locator(args.overrides().coords));

    let Args {
        city, debug: debug_args, ..
    } = args;
    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let default_city = config.default_city.clone();
    let recovery = config.recovery;
    let initial_city = city.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(default_city, recovery);
            if let Some(city) = initial_city {
                state.city = city;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    // A city on the command line skips the location step
    let init_action = match city {
        Some(city) => Action::WeatherFetchCity(city),
        None => Action::Init,
    };

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        replay_actions,
        init_action,
        Arc::new(runner),
    )
    .await;

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

    tracing::info!("skypanel exiting");
    Ok(())
}

struct SkyUi {
    display: WeatherDisplay,
}

impl SkyUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SkyComponentId>,
    ) {
        event_ctx.set_component_area(SkyComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    init_action: Action,
    runner: Arc<EffectRunner>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SkyUi::new()));
    let mut bus: EventBus<AppState, Action, SkyComponentId, SkyContext> = EventBus::new();
    let keybindings: Keybindings<SkyContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(SkyComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
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
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
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
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&runner)),
        )
        .await
}

/// Handle effects by spawning tasks; weather lookups share one task key.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, runner: Arc<EffectRunner>) {
    let key = TaskKey::new(effect.task_key());
    ctx.tasks()
        .spawn(key, async move { runner.run(effect).await });
}
