//! `hadloc-sim`: an interactive TUI around [`hadloc_asm::emulator::Computer`].
//!
//! Loads a `.bin` file produced by `hadloc-asm` and steps the machine under
//! user control, mirroring `original_source/emulator/emulator.py`'s curses
//! `main()` one to one: a register panel (PC/L/H/X/Y/IN/CF/IF), the 20x4
//! character display, and scrolling ROM/RAM hex panes that highlight the
//! current PC and the current `H:L` memory address — translated from raw
//! curses `addstr` calls into `ratatui` widgets.

mod app;
mod ui;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser as ClapParser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;

#[derive(ClapParser, Debug)]
#[command(name = "hadloc-sim", about = "Interactive TUI simulator for HADLoC machine code")]
struct Cli {
    /// A `.bin` file produced by `hadloc-asm`.
    program: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rom = fs::read(&cli.program)?;
    info!("loaded {} bytes from {}", rom.len(), cli.program.display());
    let mut app = App::new(rom);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Key bindings mirror the original's `KEY_F(5)` pause toggle, generalized
/// to a few more controls a curses single-key loop didn't have room for:
/// space steps once, `r` free-runs until halt or the next key press, `c`
/// resets the machine, `q` quits.
fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(' ') => app.step(),
                    KeyCode::Char('r') => app.run_to_halt(),
                    KeyCode::Char('c') => app.reset(),
                    _ => {}
                }
            }
        }
    }
}
