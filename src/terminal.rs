#![cfg(feature = "std")]

//! Terminal front end: board rendering and command parsing.

use std::fmt::Write as _;
use std::io::{self, BufRead};
use std::thread;

use tokio::sync::{mpsc::UnboundedSender, watch};

use crate::board::{Board, Terrain, Visibility};
use crate::config::{BOARD_SIZE, FLEET};
use crate::game::{GameEvent, GameState, Phase};
use crate::session::SessionEvent;
use crate::vessel::{Coord, Orientation, VesselId};

/// Parses `A5`-style coordinates: column letter A-J, row number 1-10.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize;
    if x >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Coord::new(x, row - 1).ok_or_else(|| format!("{} is off the board", input))
}

fn parse_vessel(name: &str) -> Result<VesselId, String> {
    VesselId::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = FLEET.iter().map(|v| v.slug()).collect();
        format!("Unknown vessel '{}' - one of {}", name, names.join(", "))
    })
}

/// Translates one line of input into session events. The current state
/// decides which board a bare coordinate refers to.
pub fn parse_command(line: &str, state: &GameState) -> Result<Vec<SessionEvent>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Ok(Vec::new());
    };
    match (first.to_ascii_lowercase().as_str(), &words[1..]) {
        ("q" | "quit" | "exit", []) => Ok(vec![SessionEvent::Quit]),
        ("w" | "r" | "rotate", []) => Ok(vec![SessionEvent::ToggleOrientation]),
        ("restart" | "redeploy", []) => Ok(vec![SessionEvent::Restart]),
        ("auto", []) => Ok(vec![SessionEvent::AutoDeploy]),
        ("select", [name]) => Ok(vec![SessionEvent::SelectVessel(parse_vessel(name)?)]),
        ("place", [name, at, rest @ ..]) => {
            if state.phase() != Phase::Setup {
                return Err("Vessels can only be placed during setup".to_string());
            }
            let id = parse_vessel(name)?;
            let at = parse_coord(at)?;
            if state.placed().contains(&id) {
                return Err(format!("{} is already placed - click it to pick it up", id));
            }
            if let Some(other) = state.player_board().vessel_at(at) {
                return Err(format!("{} is occupied by the {}", at, other));
            }
            let wanted = match rest {
                [] => state.orientation(),
                [o] if o.eq_ignore_ascii_case("h") => Orientation::Horizontal,
                [o] if o.eq_ignore_ascii_case("v") => Orientation::Vertical,
                _ => return Err("Orientation must be h or v".to_string()),
            };
            let mut events = vec![SessionEvent::SelectVessel(id)];
            if wanted != state.orientation() {
                events.push(SessionEvent::ToggleOrientation);
            }
            events.push(SessionEvent::ClickPlayerCell(at));
            Ok(events)
        }
        (_, []) => {
            let at = parse_coord(first)?;
            match state.phase() {
                Phase::Setup => Ok(vec![SessionEvent::ClickPlayerCell(at)]),
                Phase::Playing => Ok(vec![SessionEvent::ClickOpponentCell(at)]),
                Phase::GameOver => Err("Game over - type 'restart' to play again".to_string()),
            }
        }
        _ => Err(format!("Unrecognised command '{}'", line.trim())),
    }
}

fn cell_char(board: &Board, at: Coord, reveal: bool) -> char {
    let cell = board.cell(at);
    match (cell.visibility, cell.terrain) {
        (Visibility::Hit, _) => 'X',
        (Visibility::Miss, _) => 'o',
        (Visibility::Hidden, Terrain::Vessel(id)) if reveal => {
            id.kind().name().chars().next().unwrap_or('S')
        }
        _ => '.',
    }
}

/// Both boards side by side: the enemy waters on the left, the player's
/// own fleet on the right.
pub fn render(state: &GameState) -> String {
    let mut out = String::new();
    let header: String = (0..BOARD_SIZE)
        .map(|c| format!(" {}", (b'A' + c as u8) as char))
        .collect();
    let _ = writeln!(out, "     ENEMY WATERS              YOUR FLEET");
    let _ = writeln!(out, "   {}     {}", header, header);
    for y in 0..BOARD_SIZE {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..BOARD_SIZE {
            if let Some(at) = Coord::new(x, y) {
                let _ = write!(out, " {}", cell_char(state.opponent_board(), at, false));
            }
        }
        let _ = write!(out, "  {:2} ", y + 1);
        for x in 0..BOARD_SIZE {
            if let Some(at) = Coord::new(x, y) {
                let _ = write!(out, " {}", cell_char(state.player_board(), at, true));
            }
        }
        out.push('\n');
    }
    let _ = writeln!(out, "STREAK: {}", state.streak());
    if state.phase() == Phase::Setup {
        let dock: Vec<String> = VesselId::all()
            .filter(|id| !state.placed().contains(id))
            .map(|id| {
                let mark = if state.selected() == Some(id) { "*" } else { "" };
                format!("{}{} ({})", mark, id.kind().slug(), id.kind().length())
            })
            .collect();
        let _ = writeln!(
            out,
            "DOCK: {}   orientation: {:?}",
            dock.join(", "),
            state.orientation()
        );
    }
    out
}

/// Prints the boards and the messages for the events just handled.
pub fn show(state: &GameState, events: &[GameEvent]) {
    print!("{}", render(state));
    for event in events {
        println!("> {}", event);
    }
    match state.phase() {
        Phase::Setup => println!(
            "place <vessel> <A5> [h|v] | select <vessel> | <A5> | r | auto | restart | quit"
        ),
        Phase::Playing => println!("fire with <A5> | restart | quit"),
        Phase::GameOver => println!("restart | quit"),
    }
}

/// Reads commands from stdin on a plain thread and forwards them to the
/// session. The thread ends at end of input or once the session is gone.
pub fn spawn_input(
    events: UnboundedSender<SessionEvent>,
    state: watch::Receiver<GameState>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let parsed = parse_command(&line, &state.borrow());
            match parsed {
                Ok(batch) => {
                    for event in batch {
                        if events.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(msg) => println!("! {}", msg),
            }
        }
        let _ = events.send(SessionEvent::Quit);
    })
}
