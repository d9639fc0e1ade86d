mod config;
mod domain;
mod sim;
mod ui;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::FrameInput;
use domain::geom::Vec2;
use sim::map::TileMap;
use sim::session::{Mode, Session};
use ui::input::InputState;
use ui::renderer::Renderer;

/// Sleep between frames; keeps CPU usage sane without a vsync.
const FRAME_SLEEP: Duration = Duration::from_millis(8);

/// Ceiling on dt so a stall (suspend, debugger) doesn't teleport
/// actors through walls.
const MAX_DT: f32 = 0.1;

fn main() -> ExitCode {
    let config = GameConfig::load();

    // Fail closed: without a map there is no game.
    let map = match TileMap::load_from_file(&config.map_path) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error loading map {}: {e}", config.map_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(map, &config);
    let mut renderer = Renderer::new(config.ui.clone());
    let mut input = InputState::new();

    if let Err(e) = renderer.init() {
        eprintln!("Error initializing terminal: {e}");
        return ExitCode::FAILURE;
    }

    input.honor_release =
        crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);

    let result = run_loop(&mut session, &mut renderer, &mut input);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Error restoring terminal: {e}");
    }
    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    input: &mut InputState,
) -> std::io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        input.drain_events();

        if input.ctrl_c_pressed()
            || input.was_pressed(KeyCode::Esc)
            || input.was_pressed(KeyCode::Char('q'))
        {
            return Ok(());
        }

        let button = renderer.start_button_rect(session);
        let hover = session.mode == Mode::Menu
            && input
                .mouse_position()
                .is_some_and(|(c, r)| button.contains(c, r));
        let clicked_start = session.mode == Mode::Menu
            && input.left_clicked()
            && input
                .mouse_position()
                .is_some_and(|(c, r)| button.contains(c, r));

        let frame = FrameInput {
            dir_a: held_direction(
                input,
                KeyCode::Char('a'),
                KeyCode::Char('d'),
                KeyCode::Char('w'),
                KeyCode::Char('s'),
            ),
            dir_b: held_direction(
                input,
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Up,
                KeyCode::Down,
            ),
            start: input.any_pressed(&[KeyCode::Enter, KeyCode::Char(' ')]) || clicked_start,
            restart: input.was_pressed(KeyCode::Char('r')),
        };

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_DT);
        last_frame = now;

        session.update(&frame, dt);
        renderer.render(session, hover)?;

        std::thread::sleep(FRAME_SLEEP);
    }
}

/// Combine held keys into a movement intent, normalized so diagonals
/// are not faster than straight lines.
fn held_direction(
    input: &InputState,
    left: KeyCode,
    right: KeyCode,
    up: KeyCode,
    down: KeyCode,
) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.is_held(left) {
        dir.x -= 1.0;
    }
    if input.is_held(right) {
        dir.x += 1.0;
    }
    if input.is_held(up) {
        dir.y -= 1.0;
    }
    if input.is_held(down) {
        dir.y += 1.0;
    }
    dir.normalized()
}
