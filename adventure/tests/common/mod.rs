//! Shared helpers: a tiny assembler for synthetic adventure programs.
//!
//! The real challenge binary is proprietary, so these tests hand-assemble
//! minimal programs that speak the adventure's textual protocol: print a
//! banner, then loop reading a command line and answering it.

#![allow(dead_code)]

// Register specifiers as they appear in argument position.
pub const R0: u16 = 32768;
pub const R1: u16 = 32769;
pub const R2: u16 = 32770;
pub const R3: u16 = 32771;
pub const R7: u16 = 32775;

pub struct Asm {
    words: Vec<u16>,
}

impl Asm {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Address of the next word to be emitted.
    pub fn here(&self) -> u16 {
        self.words.len() as u16
    }

    pub fn emit(&mut self, words: &[u16]) {
        self.words.extend_from_slice(words);
    }

    /// One `out` instruction per byte of `text`.
    pub fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            self.emit(&[19, byte as u16]);
        }
    }

    /// `in` into `reg`.
    pub fn read(&mut self, reg: u16) {
        self.emit(&[20, reg]);
    }

    /// Consume input up to and including the next newline (r0, r1 scratch).
    pub fn skip_rest_of_line(&mut self) {
        let top = self.here();
        self.emit(&[20, R0]); // in r0
        self.emit(&[4, R1, R0, 10]); // eq r1 r0 '\n'
        self.emit(&[8, R1, top]); // jf r1 top
    }

    pub fn jmp(&mut self, target: u16) {
        self.emit(&[6, target]);
    }

    pub fn halt(&mut self) {
        self.emit(&[0]);
    }

    /// `jt reg <patched-later>`; returns the slot to pass to [`patch`].
    ///
    /// [`patch`]: Asm::patch
    pub fn jt_later(&mut self, reg: u16) -> usize {
        self.emit(&[7, reg, 0]);
        self.words.len() - 1
    }

    pub fn patch(&mut self, slot: usize, target: u16) {
        self.words[slot] = target;
    }

    pub fn image(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

pub const ROOM_A: &str = "\n== Antechamber ==\nA cramped stone chamber hewn from dark rock.\n\nThings of interest here:\n- coin\n\nThere are 2 exits:\n- east\n- west\n\nWhat do you do?\n";

pub const ROOM_RUINS: &str = "\n== Ruins ==\nCrumbled masonry and old carvings litter the ground.\n\nThere is 1 exit:\n- east\n\nWhat do you do?\n";

pub const INV_BLOB: &str = "\nYour inventory:\n- tablet\n\nWhat do you do?\n";

/// A two-room adventure. Commands are dispatched on their first byte:
/// `g` parses the direction initial ("go west" ends the program, any other
/// direction moves to the Ruins), `i` prints a one-item inventory, and
/// everything else reprints the current room. Room state lives in r7.
pub fn two_room_image() -> Vec<u8> {
    let mut asm = Asm::new();
    asm.print("Welcome to the test cavern!\n\nWhat do you do?\n");

    let loop_top = asm.here();
    asm.read(R2); // first byte of the command
    asm.emit(&[4, R1, R2, b'g' as u16]);
    let to_go = asm.jt_later(R1);
    asm.emit(&[4, R1, R2, b'i' as u16]);
    let to_inv = asm.jt_later(R1);
    asm.emit(&[4, R1, R2, 10]);
    let to_print = asm.jt_later(R1); // bare newline: nothing left to consume
    asm.skip_rest_of_line();

    let print_room = asm.here();
    asm.patch(to_print, print_room);
    asm.emit(&[4, R1, R7, 1]);
    let to_ruins = asm.jt_later(R1);
    asm.print(ROOM_A);
    asm.jmp(loop_top);

    let ruins = asm.here();
    asm.patch(to_ruins, ruins);
    asm.print(ROOM_RUINS);
    asm.jmp(loop_top);

    let inv = asm.here();
    asm.patch(to_inv, inv);
    asm.skip_rest_of_line();
    asm.print(INV_BLOB);
    asm.jmp(loop_top);

    let go = asm.here();
    asm.patch(to_go, go);
    asm.read(R0); // 'o'
    asm.read(R0); // ' '
    asm.read(R3); // direction initial
    asm.skip_rest_of_line();
    asm.emit(&[4, R1, R3, b'w' as u16]);
    let to_dead = asm.jt_later(R1);
    asm.emit(&[1, R7, 1]); // move to the Ruins
    asm.jmp(print_room);

    let dead = asm.here();
    asm.patch(to_dead, dead);
    asm.halt();

    asm.image()
}

pub const ROOM_CELL: &str =
    "\n== Cell ==\nBare walls on every side.\n\nThere is 1 exit:\n- out\n\nWhat do you do?\n";

/// A one-room adventure whose only exit ends the program.
pub fn dead_end_image() -> Vec<u8> {
    let mut asm = Asm::new();
    asm.print("You wake up in a cell.\n\nWhat do you do?\n");

    let loop_top = asm.here();
    asm.read(R2);
    asm.emit(&[4, R1, R2, b'g' as u16]);
    let to_dead = asm.jt_later(R1);
    asm.emit(&[4, R1, R2, 10]);
    let to_print = asm.jt_later(R1);
    asm.skip_rest_of_line();

    let print_room = asm.here();
    asm.patch(to_print, print_room);
    asm.print(ROOM_CELL);
    asm.jmp(loop_top);

    let dead = asm.here();
    asm.patch(to_dead, dead);
    asm.halt();

    asm.image()
}
