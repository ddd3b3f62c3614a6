mod display;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
    ExecutableCommand,
};

use space_survival::controller::{Command, GameController};
use space_survival::logger::Logger;
use space_survival::model::GameModel;

/// One simulation tick per frame.
const TICK: Duration = Duration::from_millis(100); // 10 ticks/sec

/// Log lines kept in the on-screen event feed.
const FEED_LINES: usize = 8;

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_survival_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── Event feed logger ─────────────────────────────────────────────────────────

/// Feeds the core's event strings into the on-screen message feed and
/// mirrors them to the `log` facade (visible via `RUST_LOG=debug`).
struct FeedLogger {
    lines: Rc<RefCell<VecDeque<String>>>,
}

impl Logger for FeedLogger {
    fn log(&mut self, text: &str) {
        log::debug!("{}", text);
        let mut lines = self.lines.borrow_mut();
        if lines.len() == FEED_LINES {
            lines.pop_front();
        }
        lines.push_back(text.to_string());
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits; returns the final score.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<u32> {
    let feed: Rc<RefCell<VecDeque<String>>> = Rc::new(RefCell::new(VecDeque::new()));
    let logger = FeedLogger { lines: Rc::clone(&feed) };

    let mut controller = GameController::new(GameModel::new(logger));
    let mut best = high_score;
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        // Drain all pending input events (non-blocking); the driver
        // serializes input against ticks, the core never sees both at
        // once.
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(controller.snapshot().stats.score.max(best));
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(controller.snapshot().stats.score.max(best));
                }
                KeyCode::Up => controller.handle_command(Command::Up),
                KeyCode::Down => controller.handle_command(Command::Down),
                KeyCode::Left => controller.handle_command(Command::Left),
                KeyCode::Right => controller.handle_command(Command::Right),
                KeyCode::Char(' ') => controller.handle_command(Command::Fire),
                // Letters go through the token path so the core can
                // report unknown input itself.
                KeyCode::Char(c) => controller.handle_input(&c.to_string()),
                _ => {}
            }
        }

        controller.on_tick(tick);

        {
            let snapshot = controller.snapshot();
            best = best.max(snapshot.stats.score);
            let messages: Vec<String> = feed.borrow().iter().cloned().collect();
            display::render(out, &snapshot, &messages, !controller.is_running(), best)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending
    // them through a channel so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let loaded = load_high_score();
    let result = game_loop(&mut out, &rx, loaded);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(best) => {
            if best > loaded {
                save_high_score(best);
            }
            Ok(())
        }
        Err(err) => Err(err),
    }
}
