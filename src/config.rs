use crate::vessel::VesselType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_VESSELS: usize = 5;

/// The fleet each side deploys, longest first. The random generator seats
/// vessels in this order.
pub const FLEET: [VesselType; NUM_VESSELS] = [
    VesselType::new("carrier", "Carrier", 5, "#8b5cf6"),
    VesselType::new("battleship", "Battleship", 4, "#3b82f6"),
    VesselType::new("cruiser", "Cruiser", 3, "#10b981"),
    VesselType::new("submarine", "Submarine", 3, "#f59e0b"),
    VesselType::new("destroyer", "Destroyer", 2, "#ef4444"),
];

/// Number of vessel cells on a fully deployed board.
pub const TOTAL_VESSEL_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Game identifier sent to the scoreboard.
pub const GAME_ID: &str = "Battleship";

/// Pause before the computer fires, so its move reads as a separate action.
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 700;
