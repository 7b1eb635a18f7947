//! Shared types module - data structures and constants
//!
//! This crate defines the plain data exchanged between the engine and its
//! collaborators (host loop, renderer, ranking store). Everything here is pure
//! data with no dependencies, so any layer can use it.
//!
//! # Board Dimensions
//!
//! The well is a fixed 21 x 12 grid *including* its border:
//!
//! - **Rows**: 21 (indexed 0-20, row 20 is the floor)
//! - **Columns**: 12 (indexed 0-11, columns 0 and 11 are walls)
//! - **Interior**: rows 0-19, columns 1-10
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host fixed timestep (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 800 | Gravity interval at level 0 |
//! | `MIN_GRAVITY_MS` | 300 | Gravity never gets faster than this |
//! | `GRAVITY_STEP_MS` | 50 | Interval reduction per level |
//! | `SOFT_DROP_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_RELEASE_MS` | 500 | Interval restored on soft drop release |
//! | `READY_MS` / `GO_MS` | 2000 / 1000 | Start presentation delays |
//! | `FINISH_MS` | 3000 | Delay between game over and results |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameMode, PieceKind, BOARD_COLS, BOARD_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(GameMode::from_str("time-attack"), Some(GameMode::TimeAttack));
//!
//! assert_eq!(BOARD_ROWS, 21);
//! assert_eq!(BOARD_COLS, 12);
//! ```

/// Board height in cells, floor row included (21 rows)
pub const BOARD_ROWS: u8 = 21;

/// Board width in cells, both walls included (12 columns)
pub const BOARD_COLS: u8 = 12;

/// Host fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0
pub const BASE_GRAVITY_MS: u32 = 800;

/// Gravity interval floor
pub const MIN_GRAVITY_MS: u32 = 300;

/// Gravity interval reduction per level
pub const GRAVITY_STEP_MS: u32 = 50;

/// Gravity interval while the soft drop command is held
pub const SOFT_DROP_MS: u32 = 50;

/// Gravity interval restored when soft drop is released, whatever the level
pub const SOFT_DROP_RELEASE_MS: u32 = 500;

/// Host-side soft drop timeout for terminals without key-release events
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Session clock period (one second)
pub const CLOCK_MS: u32 = 1000;

/// "Ready" presentation delay before the first spawn
pub const READY_MS: u32 = 2000;

/// "Go" presentation delay before the first spawn
pub const GO_MS: u32 = 1000;

/// Delay between game over and the results screen
pub const FINISH_MS: u32 = 3000;

/// Time-attack countdown length in seconds
pub const TIME_ATTACK_SECONDS: u32 = 180;

/// Score needed per level
pub const SCORE_PER_LEVEL: u32 = 1000;

/// Points awarded every time a piece locks
pub const PLACEMENT_BONUS: u32 = 10;

/// Points awarded for a hard drop, in place of the placement bonus
pub const HARD_DROP_BONUS: u32 = 10;

/// Points by number of lines removed in one lock.
///
/// Index 0 = no lines. Clears beyond 4 lines have no entry and award 0.
pub const LINE_CLEAR_SCORES: [u32; 5] = [0, 100, 250, 450, 700];

/// Number of scores kept per mode in the ranking
pub const RANKING_SIZE: usize = 5;


/// The seven piece kinds
///
/// Each kind maps to one canonical shape mask in the engine's catalog and to
/// a display color in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Something that occupies a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Permanent border (side walls and floor)
    Wall,
    /// A locked piece cell; the kind is only used for color
    Piece(PieceKind),
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Wall or locked piece
pub type Cell = Option<Block>;

/// Game mode, which decides how the session clock runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Clock counts up from zero; the game ends on top-out
    #[default]
    Normal,
    /// Clock counts down from [`TIME_ATTACK_SECONDS`]; zero ends the game
    TimeAttack,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(GameMode::Normal),
            "time-attack" | "timeattack" | "time_attack" => Some(GameMode::TimeAttack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::TimeAttack => "time-attack",
        }
    }

    /// Clock value a session in this mode starts from
    pub fn initial_clock_seconds(&self) -> u32 {
        match self {
            GameMode::Normal => 0,
            GameMode::TimeAttack => TIME_ATTACK_SECONDS,
        }
    }
}

/// Abstract input commands
///
/// The host maps raw keys to these; the engine never sees hardware events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Down key pressed: switch to the fast gravity interval
    SoftDropStart,
    /// Down key released: restore the normal interval
    SoftDropEnd,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Swap with the hold slot
    Hold,
    /// Toggle pause (escape key)
    Pause,
    /// Start a fresh session with the same mode
    Restart,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdropstart" => Some(Command::SoftDropStart),
            "softdropend" => Some(Command::SoftDropEnd),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            "pause" | "escape" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropStart => "softDropStart",
            Command::SoftDropEnd => "softDropEnd",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }
}

/// Outward events for presentation and audio collaborators.
///
/// Rejected commands never produce an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// "Ready" presentation started
    Ready,
    /// "Go" presentation started
    Go,
    /// The active piece was committed to the board
    PieceLocked,
    /// Rows were removed by a lock
    LinesCleared(u32),
    ScoreChanged(u32),
    LevelChanged(u32),
    /// A rotation succeeded
    Rotated,
    /// A hold swap happened
    Held,
    /// Session clock moved (seconds elapsed, or remaining in time attack)
    ClockChanged(u32),
    Paused,
    Resumed,
    /// Fired exactly once per session with the final score
    GameOver(u32),
    /// The finish delay elapsed; the host may show results
    ResultsDue,
}
