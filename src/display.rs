/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot.  No
/// game logic is performed; canvas coordinates scale onto the terminal cell
/// grid, and entities listed in `exited` flash once as their views go away.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use invaders::compute::{CANVAS_HEIGHT, CANVAS_WIDTH};
use invaders::entities::{Entity, GameState, Kind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ENEMIES: Color = Color::Green;
const C_SHIP: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_SHIELD: Color = Color::DarkGreen;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXIT_FLASH: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas → cell mapping ─────────────────────────────────────────────────────

/// Map a canvas position into the play area (inside the border: columns
/// 1..cols-1, rows 2..rows-2).
fn to_cell(x: f32, y: f32, cols: u16, rows: u16) -> (u16, u16) {
    let inner_w = cols.saturating_sub(3).max(1) as f32;
    let inner_h = rows.saturating_sub(5).max(1) as f32;
    let col = 1.0 + (x / CANVAS_WIDTH).clamp(0.0, 1.0) * inner_w;
    let row = 2.0 + (y / CANVAS_HEIGHT).clamp(0.0, 1.0) * inner_h;
    (col as u16, row as u16)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cols, rows)?;
    draw_hud(out, state, cols)?;

    for shield in &state.shields {
        draw_entity(out, shield, cols, rows)?;
    }
    for enemy in &state.enemies {
        draw_entity(out, enemy, cols, rows)?;
    }
    for bullet in &state.player_bullets {
        draw_entity(out, bullet, cols, rows)?;
    }
    for bullet in &state.enemy_bullets {
        draw_entity(out, bullet, cols, rows)?;
    }
    draw_entity(out, &state.ship, cols, rows)?;

    // One-frame flash where something was just removed; the next snapshot
    // carries a fresh `exited`, so these clean themselves up.
    for gone in &state.exited {
        draw_exit_flash(out, gone, cols, rows)?;
    }

    draw_controls_hint(out, rows)?;

    if state.game_over {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row rows-2 — bottom bar
    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    // Enemies remaining — right
    let right_str = format!("Invaders:{:>3}", state.enemies.len());
    let rx = cols.saturating_sub(right_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
    out.queue(Print(&right_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(
    out: &mut W,
    e: &Entity,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(e.x, e.y, cols, rows);
    match e.kind {
        Kind::Ship => {
            out.queue(style::SetForegroundColor(C_SHIP))?;
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
            out.queue(Print("◢▲◣"))?;
        }
        Kind::Enemy => {
            out.queue(style::SetForegroundColor(C_ENEMY))?;
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
            out.queue(Print("«▼»"))?;
        }
        Kind::Shield => {
            out.queue(style::SetForegroundColor(C_SHIELD))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("▒"))?;
        }
        Kind::PlayerBullet => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("║"))?;
        }
        Kind::EnemyBullet => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

fn draw_exit_flash<W: Write>(
    out: &mut W,
    e: &Entity,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(e.x, e.y, cols, rows);
    out.queue(style::SetForegroundColor(C_EXIT_FLASH))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("✦"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = cols / 2;
    let total_rows = lines.len() + 2; // 3 box lines + score + hint
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "R - Restart  Q - Quit";
    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
