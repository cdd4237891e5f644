mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use invaders::compute::{initial_state, reduce};
use invaders::entities::GameEvent;

const FRAME: Duration = Duration::from_millis(33); // ≈30 ticks/sec

// ── Input constants ───────────────────────────────────────────────────────────

/// Min frames between shots while Space is held.
/// 8 frames @ 30 FPS ≈ 3.75 shots/sec.
const SHOOT_COOLDOWN: u32 = 8;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  INVADERS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let blurb = "Clear the formation before it reaches the ground.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(blurb.chars().count() as u16 / 2),
        cy.saturating_sub(2),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(blurb))?;

    let lines: &[&str] = &[
        "← → / A D : Move",
        "SPACE     : Shoot",
        "R         : Restart",
        "ESC       : Back to this screen",
    ];
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(*line))?;
    }

    let prompt = "[ENTER] Play    [Q] Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy + lines.len() as u16 + 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(prompt))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to the title screen.
///
/// The engine only sees a stream of `GameEvent`s; this loop owns the
/// translation.  A `key_frame` map records the frame number of the last
/// press/repeat event for every key, so direction keys and Space can be
/// held simultaneously:
/// * **Keyboard-enhancement capable** terminals (Ghostty, kitty, etc.) send
///   proper `Press` / `Repeat` / `Release` events → keys drop on release.
/// * **Classic terminals** only send `Press` (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` silent frames,
///   shorter than the OS repeat interval, so a held key stays live.
///
/// `Move` is edge-triggered: one event per direction change, as the engine
/// expects filtered, non-repeating movement commands.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut state = initial_state();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut direction: f32 = 0.0;
    let mut elapsed: u64 = 0;

    loop {
        let frame_start = Instant::now();
        elapsed += 1;

        let mut events: Vec<GameEvent> = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), elapsed);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(true);
                        }
                        KeyCode::Esc => return Ok(false),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            events.push(GameEvent::Restart);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), elapsed);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Direction from held keys, one Move event per change ───────────────
        let left = is_held(&key_frame, &KeyCode::Left, elapsed)
            || is_held(&key_frame, &KeyCode::Char('a'), elapsed)
            || is_held(&key_frame, &KeyCode::Char('A'), elapsed);
        let right = is_held(&key_frame, &KeyCode::Right, elapsed)
            || is_held(&key_frame, &KeyCode::Char('d'), elapsed)
            || is_held(&key_frame, &KeyCode::Char('D'), elapsed);

        let dir = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        if dir != direction {
            events.push(GameEvent::Move(dir));
            direction = dir;
        }

        // Shooting — throttled so holding Space doesn't flood the canvas
        if shoot_cooldown == 0 && is_held(&key_frame, &KeyCode::Char(' '), elapsed) {
            events.push(GameEvent::Shoot);
            shoot_cooldown = SHOOT_COOLDOWN;
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        events.push(GameEvent::Tick { elapsed });

        // ── Fold the frame's events through the reducer, in order ─────────────
        for ev in &events {
            state = reduce(&state, ev, &mut rng);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &state, cols, rows)?;

        let spent = frame_start.elapsed();
        if spent < FRAME {
            thread::sleep(FRAME - spent);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                if game_loop(out, rx)? {
                    break;
                }
                // Otherwise loop back to the title screen
            }
        }
    }
    Ok(())
}
