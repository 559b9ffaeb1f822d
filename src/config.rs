use crate::error::ConfigError;
use crate::hex::Stone;

pub const DEFAULT_DEPTH: usize = 4;

/// Fixed settings of one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which side the engine plays.
    pub stone: Stone,
    /// Plies searched by the general search, counting the engine's own move.
    pub depth: usize,
    /// Answer a move into a bridge carrier by taking an open endpoint.
    pub hold_bridges: bool,
    /// Print a line per decision.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            stone: Stone::White,
            depth: DEFAULT_DEPTH,
            hold_bridges: true,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn new(stone: Stone) -> Self {
        EngineConfig {
            stone,
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_hold_bridges(mut self, hold_bridges: bool) -> Self {
        self.hold_bridges = hold_bridges;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Validation("depth must be >= 1".into()));
        }

        Ok(())
    }
}
