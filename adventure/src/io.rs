//! Textual adapter between a driver and the adventure program hosted in the
//! machine: issues commands, drains output, and parses the game's room and
//! inventory listings.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use synacor_core::error::MachineError;
use synacor_core::machine::io::{OutputBuffer, Pipe};
use synacor_core::machine::{Halt, Machine};
use synacor_core::trace::Tracer;

use crate::error::AdventureError;

/// Using the lit lantern would extinguish it and break a later puzzle, so
/// the use-everything fixpoint loop skips it.
const LIT_LANTERN: &str = "lit lantern";

static ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^== (.*) ==\n(.+)$").unwrap());
static INTEREST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Things of interest here:\n((?:.|\n)+)\n\nThere").unwrap());
static EXITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^There (?:is 1|are \d+) exits?:\n((?:.|\n)+)\n\nWhat").unwrap()
});
static INV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Your inventory:\n((?:.|\n)+)\n\nWhat").unwrap());

/// One room as printed by `look`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub desc: String,
    pub items: Vec<String>,
    pub exits: Vec<String>,
}

/// A machine wired to in-memory I/O buffers, driven one command at a time.
pub struct MachineIo {
    machine: Machine,
    input: Pipe,
    output: OutputBuffer,
}

impl MachineIo {
    /// Load `program`, run it to its first input block, and discard the
    /// opening banner.
    pub fn start(program: &[u8], tracer: Rc<dyn Tracer>) -> Result<Self, AdventureError> {
        let input = Pipe::new();
        let output = OutputBuffer::new();
        let machine = Machine::new(program)?
            .with_tracer(tracer)
            .with_input(Box::new(input.clone()))
            .with_output(Box::new(output.clone()));

        let mut io = Self {
            machine,
            input,
            output,
        };
        if io.pump()? == Halt::Clean {
            return Err(AdventureError::Halted);
        }
        io.output.take();
        Ok(io)
    }

    /// Send `cmd` and return everything the program prints before it next
    /// blocks on input. Fails with [`AdventureError::Halted`] if the command
    /// ends the program instead.
    pub fn run_cmd(&mut self, cmd: &str) -> Result<String, AdventureError> {
        self.input.push_line(cmd);
        match self.pump()? {
            Halt::Clean => Err(AdventureError::Halted),
            Halt::NeedInput => Ok(self.output.take_string()),
        }
    }

    /// Issue `look` and parse the current room.
    pub fn room(&mut self) -> Result<Room, AdventureError> {
        let look = self.run_cmd("look")?;
        parse_room(&look)
    }

    /// Issue `inv` and parse the inventory; empty if the program prints no
    /// inventory block.
    pub fn inv(&mut self) -> Result<Vec<String>, AdventureError> {
        let output = self.run_cmd("inv")?;
        Ok(parse_inv(&output))
    }

    /// Use every carried item (except the lit lantern) until a full pass
    /// leaves the inventory unchanged, and return the stable inventory.
    /// Items can create or consume other items when used, hence the fixpoint.
    pub fn use_until_stable(&mut self) -> Result<Vec<String>, AdventureError> {
        let mut inv = self.inv()?;
        loop {
            let before = inv_key(&inv);
            for item in inv.clone() {
                if item != LIT_LANTERN {
                    self.run_cmd(&format!("use {item}"))?;
                }
                inv = self.inv()?;
            }
            if inv_key(&inv) == before {
                return Ok(inv);
            }
        }
    }

    /// An independent adapter over a deep machine clone with fresh buffers.
    pub fn fork(&self) -> Self {
        let input = Pipe::new();
        let output = OutputBuffer::new();
        let machine = self
            .machine
            .clone_with(Box::new(input.clone()), Box::new(output.clone()));
        Self {
            machine,
            input,
            output,
        }
    }

    fn pump(&mut self) -> Result<Halt, MachineError> {
        self.machine.run()
    }
}

/// Canonical inventory fingerprint: item names sorted and joined, so the
/// order the game lists them in doesn't matter.
pub(crate) fn inv_key(inv: &[String]) -> String {
    let mut sorted: Vec<&str> = inv.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join("|")
}

fn parse_room(look: &str) -> Result<Room, AdventureError> {
    let header = ROOM_RE.captures(look).ok_or_else(|| AdventureError::Parse {
        what: "room data",
        output: look.to_owned(),
    })?;

    let items = INTEREST_RE
        .captures(look)
        .map(|caps| bullet_lines(&caps[1]))
        .unwrap_or_default();

    let exits = EXITS_RE
        .captures(look)
        .map(|caps| bullet_lines(&caps[1]))
        .ok_or_else(|| AdventureError::Parse {
            what: "exit data",
            output: look.to_owned(),
        })?;

    Ok(Room {
        name: header[1].to_string(),
        desc: header[2].to_string(),
        items,
        exits,
    })
}

fn parse_inv(output: &str) -> Vec<String> {
    INV_RE
        .captures(output)
        .map(|caps| bullet_lines(&caps[1]))
        .unwrap_or_default()
}

/// Strip the two-character `"- "` bullet from each line of a block.
fn bullet_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| line.get(2..).unwrap_or("").to_string())
        .collect()
}
