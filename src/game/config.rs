use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SimError};

/// Board geometry and episode limits
///
/// All coordinates are in board units; snake segments and food occupy
/// `cell_size`-aligned squares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of one grid cell
    pub cell_size: i32,
    /// Width of the board
    pub board_width: i32,
    /// Height of the board
    pub board_height: i32,
    /// Episode is cut off once this many ticks have run
    pub max_steps: u32,
    /// Initial number of body segments per snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            board_width: 600,
            board_height: 600,
            max_steps: 500,
            initial_snake_length: 7,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a square board of `cells` × `cells`
    pub fn with_cells(cell_size: i32, cells: i32) -> Self {
        Self {
            cell_size,
            board_width: cell_size * cells,
            board_height: cell_size * cells,
            ..Default::default()
        }
    }

    /// Small board with short snakes, handy for tests
    pub fn small() -> Self {
        Self {
            max_steps: 100,
            initial_snake_length: 3,
            ..Self::with_cells(10, 12)
        }
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the geometry can host two snakes and their food
    pub fn validate(&self) -> Result<()> {
        let c = self.cell_size;
        if c <= 0 {
            return Err(invalid(format!("cell_size must be positive, got {}", c)));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be positive".to_string()));
        }
        // A one-cell snake would start with its head on the left wall.
        if self.initial_snake_length < 2 {
            return Err(invalid(format!(
                "initial_snake_length must be at least 2, got {}",
                self.initial_snake_length
            )));
        }
        if self.board_width % c != 0 || self.board_height % c != 0 {
            return Err(invalid(format!(
                "board {}x{} is not aligned to cell_size {}",
                self.board_width, self.board_height, c
            )));
        }
        // Food spawns in [2c, extent - c), which needs at least one cell.
        if self.board_width < 4 * c || self.board_height < 4 * c {
            return Err(invalid(format!(
                "board {}x{} is too small for the food region",
                self.board_width, self.board_height
            )));
        }
        let head_x = (self.initial_snake_length as i32 - 1) * c;
        if head_x + c >= self.board_width {
            return Err(invalid(format!(
                "initial_snake_length {} does not fit a board {} wide",
                self.initial_snake_length, self.board_width
            )));
        }
        if self.lane_y(1) <= 0 || self.lane_y(1) == self.lane_y(2) {
            return Err(invalid(format!(
                "board height {} leaves no room for two starting lanes",
                self.board_height
            )));
        }
        Ok(())
    }

    /// Starting row of snake `lane` (1 or 2): one cell above `lane/3` of the height
    pub(crate) fn lane_y(&self, lane: i32) -> i32 {
        let c = self.cell_size;
        (lane * self.board_height / 3) / c * c - c
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.board_width, 600);
        assert_eq!(config.board_height, 600);
        assert_eq!(config.max_steps, 500);
        assert_eq!(config.initial_snake_length, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_config_is_valid() {
        let config = GameConfig::small();
        assert_eq!(config.board_width, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_lanes() {
        let config = GameConfig::default();
        assert_eq!(config.lane_y(1), 180);
        assert_eq!(config.lane_y(2), 380);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let mut config = GameConfig::default();
        config.cell_size = 0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.board_width = 610;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.max_steps = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_snake_length = 40;
        assert!(config.validate().is_err());

        // head would start against the right wall
        let mut config = GameConfig::default();
        config.initial_snake_length = 30;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_snake_length = 1;
        assert!(config.validate().is_err());

        let config = GameConfig::with_cells(20, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_steps": 42, "initial_snake_length": 4 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_steps, 42);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.cell_size, 20);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, SimError::Json { .. }));
    }
}
