//! The fixed-size memory tape and its data pointer.

use crate::error::{Direction, Fault};

/// Number of cells on the tape.
pub const TAPE_LEN: usize = 30_000;

/// Largest value a cell may hold. There is no wraparound in either direction.
pub const CELL_MAX: u8 = u8::MAX;

/// Zero-initialised cells plus the data pointer.
///
/// The tape never grows. Moving off either end, incrementing a cell at
/// [`CELL_MAX`] or decrementing a cell at 0 is refused with a [`Fault`]
/// located at the instruction position the caller passes in.
pub struct Tape {
    cells: Box<[u8; TAPE_LEN]>,
    pointer: usize,
    furthest: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; TAPE_LEN]),
            pointer: 0,
            furthest: 0,
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Highest index the pointer has reached so far.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn cell(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    pub fn move_right(&mut self, ip: usize) -> Result<(), Fault> {
        if self.pointer == TAPE_LEN - 1 {
            return Err(Fault::PointerOutOfBounds { pos: ip, direction: Direction::Right });
        }
        self.pointer += 1;
        self.furthest = self.furthest.max(self.pointer);
        Ok(())
    }

    pub fn move_left(&mut self, ip: usize) -> Result<(), Fault> {
        if self.pointer == 0 {
            return Err(Fault::PointerOutOfBounds { pos: ip, direction: Direction::Left });
        }
        self.pointer -= 1;
        Ok(())
    }

    pub fn increment(&mut self, ip: usize) -> Result<(), Fault> {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.checked_add(1).ok_or(Fault::CellOverflow { pos: ip })?;
        Ok(())
    }

    pub fn decrement(&mut self, ip: usize) -> Result<(), Fault> {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.checked_sub(1).ok_or(Fault::CellUnderflow { pos: ip })?;
        Ok(())
    }

    /// Snapshot every non-zero cell up to the furthest pointer.
    pub fn report(&self) -> MemoryReport {
        let cells = self.cells[..=self.furthest]
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0)
            .map(|(index, value)| (index, *value))
            .collect();

        MemoryReport {
            cells,
            pointer: self.pointer,
            furthest: self.furthest,
        }
    }
}

/// Sparse view of the tape after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryReport {
    /// `(index, value)` for each non-zero cell, in index order.
    pub cells: Vec<(usize, u8)>,
    pub pointer: usize,
    pub furthest: usize,
}

impl MemoryReport {
    /// Value at `index`, treating unlisted cells as zero.
    pub fn value_at(&self, index: usize) -> u8 {
        self.cells
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}
