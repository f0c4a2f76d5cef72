mod renderer;
mod signal;
mod ui;
mod utils;

use corona_api::{Bounds, NannouCanvas, ParameterSet, PixelTarget};
use nannou::prelude::*;
use nannou::wgpu;
use nannou::winit::event::WindowEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{AnimationLoop, CoronaScene, LoopHandle, LoopState, Mapper, Schedule};
use signal::{RandomWalk, SignalSource};
use std::cell::RefCell;
use std::env;
use std::time::Instant;
use ui::bindings::{parse_key, Action};
use ui::help_overlay::HelpOverlay;
use ui::readout::{Notification, Readout};
use utils::{Config, ConfigWatcher, ViewportManager};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    nannou::app(model).update(update).exit(exit).run();
}

/// Command line flags
struct Args {
    windowed: bool,
    debug: bool,
    paused: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let has = |long: &str, short: Option<&str>| {
            args.iter().any(|a| a == long || short.is_some_and(|s| a == s))
        };
        Self {
            windowed: has("--windowed", Some("-w")),
            debug: has("--debug", Some("-d")),
            paused: has("--paused", None),
        }
    }
}

/// Initial window settings
struct Resolution {
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl Resolution {
    fn current(windowed: bool) -> Self {
        if windowed || cfg!(debug_assertions) {
            Self {
                width: 960,
                height: 540,
                fullscreen: false,
            }
        } else {
            Self {
                width: 1280,
                height: 720,
                fullscreen: true,
            }
        }
    }
}

struct Model {
    window_id: WindowId,
    source: RandomWalk,
    /// RefCell so `view` can advance particles and grain
    corona: RefCell<AnimationLoop>,
    loop_handle: LoopHandle,
    viewports: ViewportManager,
    /// GPU side of the grain buffer, sized to the backing resolution
    grain_texture: Option<wgpu::Texture>,
    config_watcher: Option<ConfigWatcher>,
    knobs: ParameterSet,
    help_overlay: HelpOverlay,
    readout: Readout,
    notification: Notification,
    /// Track shift key state from raw events (more reliable than app.keys.mods)
    shift_held: bool,
}

fn model(app: &App) -> Model {
    let args = Args::parse();
    let resolution = Resolution::current(args.windowed);
    app.set_exit_on_escape(false);

    let mut win = app
        .new_window()
        .title("corona-viz")
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_event)
        .resized(resized)
        .closed(closed)
        .size(resolution.width, resolution.height)
        .min_size(320, 240);

    if resolution.fullscreen {
        win = win.fullscreen();
    }

    let window_id = win.build().expect("Failed to create window");

    let config = Config::load();
    let knobs = config.knobs();
    let mut rng = match config.seed() {
        Some(seed) => {
            log::info!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let now = Instant::now();
    let mut source = RandomWalk::new(
        config.signal_interval(),
        config.signal_max_step(),
        StdRng::from_rng(&mut rng),
        now,
    );
    log::info!("Signal steps every {:?}", source.interval());
    let scene = CoronaScene::new(
        Mapper::new(config.streak_chances()),
        knobs.clone(),
        StdRng::from_rng(&mut rng),
    );
    let mut corona = AnimationLoop::new(scene);
    let loop_handle = corona.handle();

    // Mount with the real window size before the first frame is drawn
    let mut viewports = ViewportManager::new();
    let mut grain_texture = None;
    if let Some(window) = app.window(window_id) {
        if resolution.fullscreen {
            window.set_cursor_visible(false);
        }
        let (w, h) = window.inner_size_points();
        if let Some(viewport) = viewports.observe(w, h, window.scale_factor()) {
            grain_texture = create_grain_texture(window.device(), viewport.backing_size());
            corona.start(viewport);
            corona.push_signal(source.snapshot(now));
        }
    }

    if args.paused {
        corona.pause();
    }
    app.set_loop_mode(LoopMode::RefreshSync);

    Model {
        window_id,
        source,
        corona: RefCell::new(corona),
        loop_handle,
        viewports,
        grain_texture,
        config_watcher: ConfigWatcher::for_home(),
        knobs,
        help_overlay: HelpOverlay::new(),
        readout: Readout::new(args.debug),
        notification: Notification::default(),
        shift_held: false,
    }
}

fn create_grain_texture(device: &wgpu::Device, size: [u32; 2]) -> Option<wgpu::Texture> {
    if size[0] == 0 || size[1] == 0 {
        return None;
    }
    Some(
        wgpu::TextureBuilder::new()
            .size(size)
            .usage(wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING)
            .sample_count(1)
            .format(wgpu::TextureFormat::Rgba8Unorm)
            .build(device),
    )
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    model.readout.tick(now);
    model.notification.tick();

    if let Some(config) = model.config_watcher.as_ref().and_then(|w| w.poll()) {
        apply_config(model, &config);
    }

    let mut corona = model.corona.borrow_mut();
    if corona.state() == LoopState::Running {
        corona.push_signal(model.source.snapshot(now));
    }
}

/// The config file replaces the knobs as a whole
fn apply_config(model: &mut Model, config: &Config) {
    let knobs = config.knobs();
    let mut corona = model.corona.borrow_mut();
    corona.set_mapper(Mapper::new(config.streak_chances()));
    if knobs != model.knobs {
        corona.set_knobs(knobs.clone());
        model.knobs = knobs;
        model.notification.show("Config reloaded".to_string());
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let rect = app.window_rect();
    let bounds = Bounds::new(rect.x(), rect.y(), rect.w(), rect.h());
    draw.background().color(BLACK);

    let mut corona = model.corona.borrow_mut();
    let schedule = match app.window(model.window_id) {
        Some(window) => {
            let canvas = NannouCanvas::new(&draw, bounds);
            let mut canvas = match model.grain_texture.as_ref() {
                Some(texture) => canvas.with_pixel_target(PixelTarget {
                    device: window.device(),
                    queue: window.queue(),
                    texture,
                }),
                None => canvas,
            };
            corona.frame(&mut canvas)
        }
        None => {
            corona.surface_lost("window is gone");
            Schedule::Stop
        }
    };
    if schedule == Schedule::Stop {
        app.set_loop_mode(LoopMode::Wait);
    }

    // Overlays are drawn on top of the corona, outside the loop
    model.readout.draw(&draw, rect, &corona);
    model.notification.draw(&draw, rect);
    model.help_overlay.draw(&draw, corona.state(), &model.knobs);

    if let Err(e) = draw.to_frame(app, &frame) {
        log::warn!("Failed to render frame: {:?}", e);
    }
}

fn resized(app: &App, model: &mut Model, size: Vec2) {
    let Some(window) = app.window(model.window_id) else {
        return;
    };
    let Some(viewport) = model.viewports.observe(size.x, size.y, window.scale_factor()) else {
        return;
    };

    let backing = viewport.backing_size();
    if model.grain_texture.as_ref().map(|t| t.size()) != Some(backing) {
        model.grain_texture = create_grain_texture(window.device(), backing);
    }

    let mut corona = model.corona.borrow_mut();
    if corona.state() == LoopState::Idle {
        // Window had no usable size at startup
        corona.start(viewport);
    } else {
        corona.resize(viewport);
    }
    if corona.state().wants_frames() {
        app.set_loop_mode(LoopMode::RefreshSync);
    }
}

fn raw_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    if let WindowEvent::ModifiersChanged(mods) = event {
        model.shift_held = mods.shift();
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let Some(action) = parse_key(key, model.shift_held) else {
        return;
    };

    match action {
        Action::Quit => app.quit(),
        Action::ShowHelp => model.help_overlay.toggle(),
        Action::ToggleReadout => model.readout.toggle(),
        Action::ToggleLive => {
            let state = model.corona.borrow_mut().toggle_live();
            model
                .notification
                .show(format!("Signal: {}", state.label().to_uppercase()));
        }
        knob => {
            if let Some((knobs, message)) = knob.adjust(&model.knobs) {
                model.corona.borrow_mut().set_knobs(knobs.clone());
                model.knobs = knobs;
                model.notification.show(message);
            }
        }
    }
}

fn closed(app: &App, model: &mut Model) {
    teardown(model);
    app.set_loop_mode(LoopMode::Wait);
}

fn exit(_app: &App, mut model: Model) {
    teardown(&mut model);
}

/// Cancel the loop and stop listening to resizes. Safe to call more than once.
fn teardown(model: &mut Model) {
    model.viewports.detach();
    if model.loop_handle.cancel() {
        log::info!("Corona loop cancelled after {} frames", model.corona.borrow().frames());
    }
    model.corona.borrow_mut().stop();
}
