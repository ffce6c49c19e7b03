//! Terminal runner (default binary).
//!
//! Two modes, chosen by `STACKFALL_HEADLESS`:
//! - terminal: crossterm input, framebuffer view, one `step()` per tick
//! - headless: no input, the board is printed as text after every gravity step

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use stackfall::core::Engine;
use stackfall::input::{map_control, map_key, should_quit, Control, RepeatHandler};
use stackfall::term::{FrameBuffer, GameView, Palette, TerminalRenderer, Viewport};
use stackfall::Config;

/// Why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Quit,
    GameOver,
    TickLimit,
}

impl Exit {
    fn as_str(self) -> &'static str {
        match self {
            Exit::Quit => "quit",
            Exit::GameOver => "game over",
            Exit::TickLimit => "tick limit reached",
        }
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();

    let (engine, exit) = if config.headless {
        run_headless(&config)
    } else {
        let mut term = TerminalRenderer::new();
        term.enter()?;
        let result = run(&mut term, &config);
        // Always try to restore terminal state.
        let _ = term.exit();
        result?
    };

    eprintln!(
        "[stackfall] seed={} tick_ms={} headless={}",
        engine.seed(),
        config.tick_ms,
        config.headless
    );
    eprintln!(
        "[stackfall] {}: score={} level={} lines={} ticks={}",
        exit.as_str(),
        engine.score(),
        engine.level(),
        engine.lines(),
        engine.ticks()
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<(Engine, Exit)> {
    let mut seed = config.seed;
    let mut engine = Engine::new(seed);
    let mut palette = Palette::new(seed);
    let mut input = RepeatHandler::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();
    let mut paused = false;

    loop {
        // Render.
        let snap = engine.snapshot();
        palette.sync(&snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &palette, paused, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok((engine, Exit::Quit));
                        }
                        match map_control(key) {
                            Some(Control::Pause) => paused = !paused,
                            Some(Control::Restart) => {
                                seed = seed.wrapping_add(1);
                                engine = Engine::new(seed);
                                palette.clear();
                                input.reset();
                                paused = false;
                            }
                            None if paused || map_key(key).is_none() => {}
                            None => {
                                if let Some(cmd) = input.handle_key_press(key.code) {
                                    engine.enqueue_command(cmd);
                                }
                            }
                        }
                    }
                    // The repeat handler produces its own repeats.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            let repeats = input.update(config.tick_ms);
            if paused {
                continue;
            }
            for cmd in repeats {
                engine.enqueue_command(cmd);
            }
            engine.step();
        }
    }
}

fn run_headless(config: &Config) -> (Engine, Exit) {
    let mut engine = Engine::new(config.seed);
    let mut last_printed = None;

    loop {
        if engine.is_game_over() {
            return (engine, Exit::GameOver);
        }
        if config.max_ticks > 0 && engine.ticks() >= config.max_ticks {
            return (engine, Exit::TickLimit);
        }
        engine.step();

        // One picture per visible change of the falling piece or the stack
        let key = (engine.active().map(|c| c.anchor), engine.board().occupied());
        if last_printed != Some(key) {
            last_printed = Some(key);
            println!(
                "tick {} | {} | score {} level {} lines {}",
                engine.ticks(),
                engine.phase().as_str(),
                engine.score(),
                engine.level(),
                engine.lines()
            );
            println!("{}", engine.board());
        }
    }
}
