use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use crate::model::{
    ControlScheme, Direction, EnemyKind, GRID_HEIGHT, GRID_WIDTH, GameAction, GameSession,
    InputCommand, NoticeTone, Phase, Tile, grid::Decoration,
};
use crate::util::clog;

use super::{
    controls_panel::ControlsPanel,
    game_over_overlay::GameOverOverlay,
    intro_overlay::IntroOverlay,
    legend_panel::LegendPanel,
    level_select::{LevelEntry, LevelSelect},
    notice_banner::NoticeBanner,
    settings_modal::SettingsModal,
    stats_panel::StatsPanel,
};

const TILE_PX: f64 = 48.0;
/// Invulnerability blink half-period.
const BLINK_MS: f64 = 100.0;

type DrawFn = Rc<RefCell<Option<Rc<dyn Fn()>>>>;
type SessionRef = Rc<RefCell<UseReducerHandle<GameSession>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub session: UseReducerHandle<GameSession>,
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let draw_ref: DrawFn = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let session_ref: SessionRef = use_mut_ref(|| props.session.clone());
    let open_settings = use_state(|| false);
    let open_levels = use_state(|| false);
    let show_intro = use_state(|| true);
    // Frames and keys are ignored while a modal covers the board.
    let overlay_open = use_mut_ref(|| true);

    {
        let overlay_open = overlay_open.clone();
        let open = *show_intro || *open_settings || *open_levels;
        use_effect_with(open, move |open| {
            *overlay_open.borrow_mut() = *open;
            || ()
        });
    }
    // Effect: track the newest handle and redraw after every reduce
    {
        let session_ref = session_ref.clone();
        let current_handle = props.session.clone();
        let draw_ref = draw_ref.clone();
        use_effect(move || {
            *session_ref.borrow_mut() = current_handle;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    // Main mount effect (canvas, loop, keys)
    {
        let canvas_ref = canvas_ref.clone();
        let session_ref = session_ref.clone();
        let draw_ref = draw_ref.clone();
        let overlay_open = overlay_open.clone();
        use_effect_with((), move |_| {
            let teardown = mount(canvas_ref, session_ref, draw_ref, overlay_open);
            if teardown.is_none() {
                clog("game view: canvas unavailable, loop not started");
            }
            move || {
                if let Some(teardown) = teardown {
                    teardown();
                }
            }
        });
    }

    let session = &props.session;
    let now_ms = js_sys::Date::now();
    let snap = session.snapshot(now_ms);
    let config = session.config;

    let open_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(true))
    };
    let close_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };
    let open_levels_cb = {
        let open_levels = open_levels.clone();
        Callback::from(move |()| open_levels.set(true))
    };
    let close_levels_cb = {
        let open_levels = open_levels.clone();
        Callback::from(move |()| open_levels.set(false))
    };
    let show_help_cb = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| show_intro.set(true))
    };
    let hide_intro_cb = {
        let show_intro = show_intro.clone();
        Callback::from(move |()| show_intro.set(false))
    };
    let restart_cb = {
        let session = session.clone();
        Callback::from(move |()| session.dispatch(GameAction::Restart))
    };
    let select_level_cb = {
        let session = session.clone();
        let open_levels = open_levels.clone();
        Callback::from(move |index: usize| {
            session.dispatch(GameAction::SelectLevel { index });
            open_levels.set(false);
        })
    };
    let enemy_speed_cb = {
        let session = session.clone();
        Callback::from(move |v: f64| session.dispatch(GameAction::SetEnemySpeed(v)))
    };
    let scheme_cb = {
        let session = session.clone();
        Callback::from(move |scheme: ControlScheme| {
            session.dispatch(GameAction::SetControlScheme(scheme))
        })
    };

    let level_entries: Vec<LevelEntry> = (0..session.level_count())
        .filter_map(|i| {
            session.catalog().level(i).map(|level| LevelEntry {
                name: level.name.clone().into(),
                completed: snap.completed.contains(&i),
            })
        })
        .collect();
    let (notice_text, notice_remaining) = match &snap.notice {
        Some((text, remaining)) => (Some(AttrValue::from(text.clone())), *remaining),
        None => (None, 0.0),
    };
    let notice_tone = session
        .notice
        .as_ref()
        .map(|n| n.tone)
        .unwrap_or(NoticeTone::Info);
    let scheme_label: AttrValue = session.settings.control_scheme.label().into();
    let game_over = snap.phase == Phase::GameOver;

    html! {
        <div style="position:relative; width:100%; height:100%; display:flex; align-items:center; justify-content:center; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <canvas ref={canvas_ref.clone()} style="display:block; border:1px solid #30363d; image-rendering:pixelated;" />
            <StatsPanel
                score={snap.score}
                level={snap.level}
                level_name={AttrValue::from(session.level_name().to_string())}
                enemies={snap.enemy_count}
                hearts={snap.hearts}
            />
            <ControlsPanel
                scheme_label={scheme_label.clone()}
                levels_unlocked={snap.all_completed}
                on_open_settings={open_settings_cb}
                on_open_levels={open_levels_cb}
                on_show_help={show_help_cb}
                on_restart={restart_cb.clone()}
            />
            <LegendPanel exits_open={snap.enemy_count == 0} />
            <NoticeBanner text={notice_text} tone={notice_tone} remaining_ms={notice_remaining} />
            <SettingsModal
                show={*open_settings}
                on_close={close_settings_cb}
                enemy_speed={session.settings.enemy_speed}
                min_speed={config.min_enemy_speed}
                max_speed={config.max_enemy_speed}
                on_enemy_speed={enemy_speed_cb}
                scheme={session.settings.control_scheme}
                on_scheme={scheme_cb}
            />
            <LevelSelect
                show={*open_levels}
                unlocked={snap.all_completed}
                current={session.level}
                levels={level_entries}
                on_select={select_level_cb}
                on_close={close_levels_cb}
            />
            <IntroOverlay show={*show_intro} game_over={game_over} scheme_label={scheme_label} hide_intro={hide_intro_cb} />
            <GameOverOverlay
                show={game_over}
                score={snap.score}
                level={snap.level}
                completed={snap.completed.len()}
                total_levels={session.level_count()}
                restart={restart_cb}
            />
        </div>
    }
}

/// Sizes the canvas, starts the frame loop and the key listener. Returns the
/// teardown, or `None` when there is no window or canvas to attach to.
fn mount(
    canvas_ref: NodeRef,
    session_ref: SessionRef,
    draw_ref: DrawFn,
    overlay_open: Rc<RefCell<bool>>,
) -> Option<Box<dyn FnOnce()>> {
    let window = web_sys::window()?;
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    canvas.set_width((GRID_WIDTH as f64 * TILE_PX) as u32);
    canvas.set_height((GRID_HEIGHT as f64 * TILE_PX) as u32);

    let draw_closure: Rc<dyn Fn()> = {
        let canvas = canvas.clone();
        let session_ref = session_ref.clone();
        Rc::new(move || {
            if !canvas.is_connected() {
                return;
            }
            let Some(ctx) = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            else {
                return;
            };
            let handle = session_ref.borrow();
            draw_session(&ctx, &handle, js_sys::Date::now());
        })
    };
    *draw_ref.borrow_mut() = Some(draw_closure.clone());
    (draw_closure)();

    // RAF loop; every tick feeds the reducer one frame
    let raf_id = Rc::new(RefCell::new(None::<i32>));
    let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let raf_id = raf_id.clone();
        let session_ref = session_ref.clone();
        let overlay_open = overlay_open.clone();
        let window_loop = window.clone();
        let closure_cell_loop = closure_cell.clone();
        *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !*overlay_open.borrow() {
                let handle = session_ref.borrow().clone();
                handle.dispatch(GameAction::Frame {
                    now_ms: js_sys::Date::now(),
                });
            }
            if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(cb) = closure_cell.borrow().as_ref() {
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            *raf_id.borrow_mut() = Some(id);
        }
    }

    let keydown_cb = {
        let session_ref = session_ref.clone();
        let overlay_open = overlay_open.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if *overlay_open.borrow() {
                return;
            }
            let handle = session_ref.borrow().clone();
            let Some(command) = handle.settings.control_scheme.map_key(&e.code()) else {
                return;
            };
            // Keep arrows and space from scrolling the page.
            e.prevent_default();
            let now_ms = js_sys::Date::now();
            handle.dispatch(match command {
                InputCommand::Move(dir) => GameAction::Move { dir, now_ms },
                InputCommand::Attack => GameAction::Attack { now_ms },
            });
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
        .ok();

    Some(Box::new(move || {
        let _ = window
            .remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
        if let Some(id) = raf_id.borrow_mut().take() {
            let _ = window.cancel_animation_frame(id);
        }
        // Break the self-reference so the loop closure is freed.
        closure_cell.borrow_mut().take();
        draw_ref.borrow_mut().take();
        drop(keydown_cb);
    }))
}

fn tile_color(tile: Tile, exits_open: bool) -> &'static str {
    match tile {
        Tile::Empty | Tile::Decoration(_) => "#161b22",
        Tile::Wall(_) => "#3c4454",
        Tile::LeftDoor => "#8b5a2b",
        Tile::TopDoor if exits_open => "#2ea043",
        Tile::TopDoor => "#5c3a1e",
        Tile::Stairs if exits_open => "#f0883e",
        Tile::Stairs => "#5c3a1e",
    }
}

fn fill_circle(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, radius: f64, color: &str) {
    ctx.begin_path();
    ctx.set_fill_style_str(color);
    ctx.arc(cx, cy, radius, 0.0, PI * 2.0).ok();
    ctx.fill();
}

fn draw_session(ctx: &CanvasRenderingContext2d, session: &GameSession, now_ms: f64) {
    let w = GRID_WIDTH as f64 * TILE_PX;
    let h = GRID_HEIGHT as f64 * TILE_PX;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);

    let exits_open = session.enemies.is_empty();
    for (i, tile) in session.board.tiles().iter().enumerate() {
        let rx = (i % GRID_WIDTH) as f64 * TILE_PX;
        let ry = (i / GRID_WIDTH) as f64 * TILE_PX;
        ctx.set_fill_style_str(tile_color(*tile, exits_open));
        ctx.fill_rect(rx, ry, TILE_PX, TILE_PX);
        // faint grid lines
        ctx.set_stroke_style_str("rgba(255,255,255,0.04)");
        ctx.stroke_rect(rx, ry, TILE_PX, TILE_PX);
        match tile {
            Tile::Decoration(Decoration::Lanterns) => {
                fill_circle(ctx, rx + TILE_PX * 0.3, ry + TILE_PX * 0.5, TILE_PX * 0.12, "#d4af37");
                fill_circle(ctx, rx + TILE_PX * 0.7, ry + TILE_PX * 0.5, TILE_PX * 0.12, "#d4af37");
            }
            Tile::Decoration(Decoration::FirePot) => {
                ctx.set_fill_style_str("#6e2b22");
                ctx.fill_rect(rx + TILE_PX * 0.25, ry + TILE_PX * 0.35, TILE_PX * 0.5, TILE_PX * 0.45);
                fill_circle(ctx, rx + TILE_PX * 0.5, ry + TILE_PX * 0.35, TILE_PX * 0.18, "#f85149");
            }
            _ => {}
        }
    }

    for attack in &session.attacks {
        let rx = attack.cell.x() as f64 * TILE_PX;
        let ry = attack.cell.y() as f64 * TILE_PX;
        ctx.set_fill_style_str("rgba(255,210,80,0.55)");
        ctx.fill_rect(rx + 4.0, ry + 4.0, TILE_PX - 8.0, TILE_PX - 8.0);
    }

    for enemy in &session.enemies {
        let (x, y) = enemy.position();
        let cx = (x + 0.5) * TILE_PX;
        let cy = (y + 0.5) * TILE_PX;
        match enemy.kind() {
            EnemyKind::Slicer => {
                // diamond
                ctx.begin_path();
                ctx.set_fill_style_str("#a371f7");
                ctx.move_to(cx, cy - TILE_PX * 0.35);
                ctx.line_to(cx + TILE_PX * 0.35, cy);
                ctx.line_to(cx, cy + TILE_PX * 0.35);
                ctx.line_to(cx - TILE_PX * 0.35, cy);
                ctx.close_path();
                ctx.fill();
            }
            EnemyKind::Skeletor => {
                fill_circle(ctx, cx, cy, TILE_PX * 0.32, "#e6edf3");
                fill_circle(ctx, cx - TILE_PX * 0.1, cy - TILE_PX * 0.05, TILE_PX * 0.06, "#0e1116");
                fill_circle(ctx, cx + TILE_PX * 0.1, cy - TILE_PX * 0.05, TILE_PX * 0.06, "#0e1116");
            }
        }
    }

    let player = &session.player;
    let blink_off = player
        .invulnerable_until
        .filter(|_| player.is_invulnerable(now_ms))
        .is_some_and(|until| ((until - now_ms) / BLINK_MS).floor() as i64 % 2 == 1);
    if !blink_off {
        let cx = (player.position.x() as f64 + 0.5) * TILE_PX;
        let cy = (player.position.y() as f64 + 0.5) * TILE_PX;
        fill_circle(ctx, cx, cy, TILE_PX * 0.32, "#58a6ff");
        let (dx, dy) = match player.facing {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        };
        fill_circle(ctx, cx + dx * TILE_PX * 0.22, cy + dy * TILE_PX * 0.22, TILE_PX * 0.08, "#0e1116");
    }

    if session.is_flashing(now_ms) {
        ctx.set_fill_style_str("rgba(248,81,73,0.25)");
        ctx.fill_rect(0.0, 0.0, w, h);
    }
    if session.phase == Phase::GameOver {
        ctx.set_fill_style_str("rgba(0,0,0,0.45)");
        ctx.fill_rect(0.0, 0.0, w, h);
    }
}
