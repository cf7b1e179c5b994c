//! UI-facing state: owns the [`Computer`] and the scroll position of the
//! two memory panes, translating the original's `MemoryDisplay.start`
//! auto-scroll (`highlight_element` in `emulator.py`) into plain fields the
//! `ui` module reads each frame.

use hadloc_asm::emulator::{disasm, Computer, RunOutcome};

/// Visible rows in a memory pane, matching the original's `DISPLAY_HEIGHT`.
pub const MEMORY_PANE_ROWS: usize = 24;

/// Caps a free-run so a buggy program can't hang the UI forever.
const RUN_STEP_BUDGET: u64 = 1_000_000;

pub struct App {
    pub computer: Computer,
    initial_rom: Vec<u8>,
    pub rom_scroll: usize,
    pub ram_scroll: usize,
    pub halted_message: Option<String>,
}

impl App {
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            computer: Computer::new(rom.clone()),
            initial_rom: rom,
            rom_scroll: 0,
            ram_scroll: 0,
            halted_message: None,
        }
    }

    pub fn step(&mut self) {
        if self.computer.halted {
            return;
        }
        self.computer.step();
        self.follow_cursors();
        if self.computer.halted {
            self.halted_message = Some(format!("halted at pc={:04x}", self.computer.pc));
        }
    }

    pub fn run_to_halt(&mut self) {
        match self.computer.run(RUN_STEP_BUDGET) {
            RunOutcome::Halted { steps } => {
                self.halted_message = Some(format!("halted after {steps} steps"));
            }
            RunOutcome::StepLimitReached { steps } => {
                self.halted_message = Some(format!("step budget ({steps}) exhausted without halting"));
            }
        }
        self.follow_cursors();
    }

    pub fn reset(&mut self) {
        self.computer = Computer::new(self.initial_rom.clone());
        self.rom_scroll = 0;
        self.ram_scroll = 0;
        self.halted_message = None;
    }

    /// Keeps both memory panes scrolled so the highlighted row (PC for ROM,
    /// `H:L` for RAM) stays on screen, mirroring `MemoryDisplay.highlight_element`'s
    /// `max(0, min(index - 5, len - DISPLAY_HEIGHT))` window.
    fn follow_cursors(&mut self) {
        let pc = self.computer.pc as usize;
        self.rom_scroll = scroll_to_show(pc, self.computer.rom.len());
        let mem_addr = ((self.computer.h as usize & 0x7F) << 8) | self.computer.l as usize;
        self.ram_scroll = scroll_to_show(mem_addr, self.computer.ram.len());
    }

    pub fn disassemble_rom_row(&self, index: usize) -> String {
        disasm::disassemble(self.computer.rom[index])
    }
}

fn scroll_to_show(index: usize, len: usize) -> usize {
    let target = index.saturating_sub(5);
    target.min(len.saturating_sub(MEMORY_PANE_ROWS))
}
