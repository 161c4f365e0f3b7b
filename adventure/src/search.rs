//! Breadth-first exploration of the hosted adventure toward the Ruins.
//!
//! Each explored state owns an independent machine clone. Expanding a state
//! picks up everything in the room, uses items until the inventory settles,
//! then forks the machine once per exit and walks each fork one room ahead.

use std::cell::Cell;
use std::rc::Rc;

use synacor_core::trace::Tracer;

use crate::bfs::{self, Node, SearchError};
use crate::error::AdventureError;
use crate::io::{MachineIo, Room, inv_key};

/// Goal room name. The game has several rooms named Ruins with distinct
/// descriptions; the first one reached will do.
const RUINS: &str = "Ruins";

// Two distinct rooms share this exact (name, description) tuple, which would
// defeat visited-key pruning: the second room would be mistaken for the
// first and never entered. Up to three visits through the bucket are
// admitted. In practice, and in order, these are:
// (1) the first room, entered west out of the narrow passage;
// (2) the second room, entered west from (1);
// (3) the second room again, entered east from the room west of (2).
const DARK_PASSAGE_NAME: &str = "Dark passage";
const DARK_PASSAGE_DESC: &str = "You are in a dark, narrow passage.";
const DARK_PASSAGE_LIMIT: usize = 3;

/// Visited-state fingerprint: room identity, ambiguity bucket, and the
/// normalized inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    name: String,
    desc: String,
    bucket: usize,
    inv: String,
}

/// One explored state: a machine clone parked at a room, plus the path
/// witness (the exit taken to get here and the inventory carried in).
pub struct SearchNode {
    /// Inventory at arrival. Empty for the root.
    pub inventory: Vec<String>,
    /// Exit taken from the predecessor. Empty for the root.
    pub exit_to_here: String,

    io: MachineIo,
    room: Room,
    /// Shared count of keyings of the ambiguous (name, desc) tuple. Owned by
    /// this search, so repeated searches don't interfere.
    dark_passage_visits: Rc<Cell<usize>>,
}

/// Run the explorer over `program` and return the shortest path from the
/// starting room to the Ruins, root node included.
pub fn find_ruins(
    program: &[u8],
    tracer: Rc<dyn Tracer>,
) -> Result<Vec<SearchNode>, AdventureError> {
    let mut io = MachineIo::start(program, tracer)?;
    let room = io.room()?;
    log::debug!("searching for {RUINS} from {}", room.name);

    let root = SearchNode {
        inventory: Vec::new(),
        exit_to_here: String::new(),
        io,
        room,
        dark_passage_visits: Rc::new(Cell::new(0)),
    };

    match bfs::search(root) {
        Ok(path) => Ok(path),
        Err(SearchError::NotFound) => Err(AdventureError::NotFound),
        Err(SearchError::Expand(err)) => Err(err),
    }
}

impl SearchNode {
    pub fn room_name(&self) -> &str {
        &self.room.name
    }
}

impl Node for SearchNode {
    type Key = NodeKey;
    type Error = AdventureError;

    fn neighbours(&mut self) -> Result<Vec<Self>, AdventureError> {
        // Pick up everything on the floor, then settle the inventory; some
        // items transform others when used.
        for item in &self.room.items {
            self.io.run_cmd(&format!("take {item}"))?;
        }
        let inventory = self.io.use_until_stable()?;

        let mut neighbours = Vec::new();
        for exit in &self.room.exits {
            let mut fork = self.io.fork();
            match fork.run_cmd(&format!("go {exit}")) {
                // The program ended: this exit is not passable.
                Err(AdventureError::Halted) => continue,
                Err(err) => return Err(err),
                Ok(_) => {}
            }

            let room = fork.room()?;
            log::debug!("{} -> {} via {exit}", self.room.name, room.name);
            neighbours.push(SearchNode {
                inventory: inventory.clone(),
                exit_to_here: exit.clone(),
                io: fork,
                room,
                dark_passage_visits: Rc::clone(&self.dark_passage_visits),
            });
        }
        Ok(neighbours)
    }

    fn is_goal(&self) -> bool {
        self.room.name == RUINS
    }

    fn key(&self) -> NodeKey {
        NodeKey {
            name: self.room.name.clone(),
            desc: self.room.desc.clone(),
            bucket: ambiguity_bucket(&self.room, &self.dark_passage_visits),
            inv: inv_key(&self.inventory),
        }
    }
}

/// Bucket index mixed into the key for the ambiguous room pair: 0 for every
/// other room; for Dark passage, the keying count so far clamped to
/// `DARK_PASSAGE_LIMIT - 1`. The counter advances on every keying of a
/// matching room, so the bucket admits exactly three visits.
fn ambiguity_bucket(room: &Room, counter: &Cell<usize>) -> usize {
    if room.name != DARK_PASSAGE_NAME || room.desc != DARK_PASSAGE_DESC {
        return 0;
    }
    let count = counter.get();
    counter.set(count + 1);
    count.min(DARK_PASSAGE_LIMIT - 1)
}
