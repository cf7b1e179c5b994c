//! Frame rendering. One `draw` call per event-loop iteration, rebuilding
//! widgets from current `App` state — the idiomatic ratatui immediate-mode
//! pattern, replacing the original's incremental `addstr`/`refresh` calls.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, MEMORY_PANE_ROWS};
use hadloc_asm::emulator::display::DISPLAY_ROWS;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(frame.area());

    draw_left_column(frame, app, root[0]);
    draw_memory_panes(frame, app, root[1]);
}

fn draw_left_column(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DISPLAY_ROWS as u16 + 2),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);

    draw_display(frame, app, rows[0]);
    draw_registers(frame, app, rows[1]);
    draw_help(frame, rows[2]);
}

fn draw_display(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = (0..DISPLAY_ROWS)
        .map(|row| {
            let text: String = app
                .computer
                .display
                .row(row)
                .iter()
                .map(|&b| b as char)
                .collect();
            Line::from(text)
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title("display");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_registers(frame: &mut Frame, app: &App, area: Rect) {
    let c = &app.computer;
    let input_char = if c.input.is_ascii_graphic() || c.input == b' ' {
        c.input as char
    } else {
        ' '
    };
    let lines = vec![
        Line::from(format!("PC: {:04x} ({})", c.pc, c.pc)),
        Line::from(format!("L:  {:02x} ({})", c.l, c.l)),
        Line::from(format!("H:  {:02x} ({})", c.h, c.h)),
        Line::from(format!("X:  {:02x} ({})", c.x, c.x)),
        Line::from(format!("Y:  {:02x} ({})", c.y, c.y)),
        Line::from(format!("IN: {:02x} ({}) [{input_char}]", c.input, c.input)),
        Line::from(format!(
            "CF={}  IF={}",
            u8::from(c.cf),
            u8::from(c.if_flag)
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.halted_message.clone().unwrap_or_default(),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let block = Block::default().borders(Borders::ALL).title("registers");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("space  step"),
        Line::from("r      run to halt"),
        Line::from("c      reset"),
        Line::from("q      quit"),
    ];
    let block = Block::default().borders(Borders::ALL).title("controls");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_memory_panes(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let pc = app.computer.pc as usize;
    let mem_addr = ((app.computer.h as usize & 0x7F) << 8) | app.computer.l as usize;

    draw_memory_pane(
        frame,
        cols[0],
        "rom",
        &app.computer.rom,
        app.rom_scroll,
        Some(pc),
        Some(mem_addr),
        |index, byte| format!(" {index:04x}  {byte:02x}  {}", app.disassemble_rom_row(index)),
    );
    draw_memory_pane(
        frame,
        cols[1],
        "ram",
        &app.computer.ram,
        app.ram_scroll,
        Some(mem_addr),
        None,
        |index, byte| format!(" {index:04x}  {byte:02x} ({byte})"),
    );
}

/// Renders `MEMORY_PANE_ROWS` rows starting at `scroll`, highlighting
/// `primary` (the original's `highlight_element`, green) and `secondary`
/// (`alternative_highlight`, cyan) if within the visible window.
fn draw_memory_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    data: &[u8],
    scroll: usize,
    primary: Option<usize>,
    secondary: Option<usize>,
    render_row: impl Fn(usize, u8) -> String,
) {
    let lines: Vec<Line> = (scroll..(scroll + MEMORY_PANE_ROWS).min(data.len()))
        .map(|i| {
            let text = render_row(i, data[i]);
            let style = if Some(i) == primary {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else if Some(i) == secondary {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if i % 2 == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
