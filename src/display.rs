/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot of
/// the simulation.  No game logic is performed; this module only
/// translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_survival::controller::Snapshot;
use space_survival::entities::{Kind, SpaceObject};
use space_survival::model::{GAME_HEIGHT, GAME_WIDTH};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Screen column of the left playfield border.
const FIELD_X: u16 = 1;
/// Screen row of the top playfield border.
const FIELD_Y: u16 = 0;
/// Column where the stats panel starts.
const PANEL_X: u16 = FIELD_X + GAME_WIDTH as u16 + 5;

/// Rows inside the border: grid cells `y = 0 ..= GAME_HEIGHT` are all
/// drawable (an object sits on row `GAME_HEIGHT` for one tick before
/// the sweep removes it).
const FIELD_ROWS: u16 = GAME_HEIGHT as u16 + 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAT_LABEL: Color = Color::DarkGrey;
const C_STAT_VALUE: Color = Color::White;
const C_EVENTS: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_PAUSED: Color = Color::Yellow;

fn color_for(kind: &Kind) -> Color {
    match kind {
        Kind::Ship { .. } => Color::White,
        Kind::Bullet => Color::Cyan,
        Kind::Asteroid => Color::Grey,
        Kind::Enemy => Color::Red,
        Kind::ShieldPowerUp => Color::Blue,
        Kind::HealthPowerUp => Color::Magenta,
    }
}

fn health_color(health: i32) -> Color {
    if health > 60 {
        Color::Green
    } else if health > 30 {
        Color::Yellow
    } else {
        Color::Red
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    messages: &[String],
    paused: bool,
    high_score: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_field(out, snapshot)?;
    draw_stats(out, snapshot, high_score)?;
    draw_events(out, messages)?;
    draw_hint(out)?;

    if paused {
        draw_paused(out)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FIELD_Y + FIELD_ROWS + 3))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    let inner = GAME_WIDTH as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(FIELD_X, FIELD_Y))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    for row in 0..FIELD_ROWS {
        out.queue(cursor::MoveTo(FIELD_X, FIELD_Y + 1 + row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FIELD_X + 1 + GAME_WIDTH as u16, FIELD_Y + 1 + row))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(FIELD_X, FIELD_Y + 1 + FIELD_ROWS))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    // Ship last, so it stays visible when sharing a cell
    for object in snapshot.objects.iter().filter(|o| !o.is_ship()) {
        draw_object(out, object)?;
    }
    for object in snapshot.objects.iter().filter(|o| o.is_ship()) {
        draw_object(out, object)?;
    }

    Ok(())
}

fn draw_object<W: Write>(out: &mut W, object: &SpaceObject) -> std::io::Result<()> {
    let (x, y) = object.position();
    // Bullets keep climbing above the visible grid; skip anything
    // outside the drawable band instead of wrapping.
    if !(0..=GAME_HEIGHT).contains(&y) || !(0..GAME_WIDTH).contains(&x) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(FIELD_X + 1 + x as u16, FIELD_Y + 1 + y as u16))?;
    out.queue(style::SetForegroundColor(color_for(&object.kind)))?;
    out.queue(Print(object.render_info().glyph))?;
    Ok(())
}

// ── Stats panel ───────────────────────────────────────────────────────────────

fn draw_stats<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    high_score: u32,
) -> std::io::Result<()> {
    let stats = &snapshot.stats;

    let rows: [(&str, String, Color); 4] = [
        ("Score", format!("{}", stats.score), C_STAT_VALUE),
        ("Health", format!("{}", stats.health), health_color(stats.health)),
        ("Level", format!("{}", stats.level), C_STAT_VALUE),
        (
            "Time Survived",
            format!("{} seconds", stats.time_survived_secs),
            C_STAT_VALUE,
        ),
    ];

    for (i, (label, value, color)) in rows.iter().enumerate() {
        out.queue(cursor::MoveTo(PANEL_X, FIELD_Y + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(C_STAT_LABEL))?;
        out.queue(Print(format!("{}: ", label)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(value))?;
    }

    if high_score > 0 {
        out.queue(cursor::MoveTo(PANEL_X, FIELD_Y + 6))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(format!("Best: {}", high_score)))?;
    }

    Ok(())
}

// ── Event feed ────────────────────────────────────────────────────────────────

fn draw_events<W: Write>(out: &mut W, messages: &[String]) -> std::io::Result<()> {
    let top = FIELD_Y + 8;
    out.queue(cursor::MoveTo(PANEL_X, top))?;
    out.queue(style::SetForegroundColor(C_EVENTS))?;
    out.queue(Print("── Events ──"))?;
    for (i, message) in messages.iter().enumerate() {
        out.queue(cursor::MoveTo(PANEL_X, top + 1 + i as u16))?;
        out.queue(Print(message))?;
    }
    Ok(())
}

// ── Hint & pause overlay ──────────────────────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(FIELD_X, FIELD_Y + FIELD_ROWS + 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("W A S D : Move   F / SPACE : Fire   P : Pause   Q : Quit"))?;
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W) -> std::io::Result<()> {
    let label = "[ PAUSED ]";
    let col = FIELD_X; // the playfield is narrower than the label
    out.queue(cursor::MoveTo(col, FIELD_Y + FIELD_ROWS / 2))?;
    out.queue(style::SetForegroundColor(C_PAUSED))?;
    out.queue(Print(label))?;
    Ok(())
}
