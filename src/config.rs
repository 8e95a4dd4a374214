use core::fmt;
use std::str::FromStr;

use log::warn;

use crate::CellId;

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLUMNS: usize = 30;

/// Dimensions, initial walls and endpoint placement for building a [Grid](crate::grid::Grid).
///
/// `start` and `finish` default to the top-left and bottom-right corners. An endpoint placed on
/// one of the initial walls lifts that wall.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    pub walls: Vec<CellId>,
    pub allow_diagonal_move: bool,
    pub start: Option<CellId>,
    pub finish: Option<CellId>,
}

impl GridConfig {
    pub fn new(rows: usize, columns: usize) -> GridConfig {
        GridConfig {
            rows,
            columns,
            walls: Vec::new(),
            allow_diagonal_move: false,
            start: Some(0),
            finish: rows.checked_mul(columns).and_then(|n| n.checked_sub(1)),
        }
    }

    pub fn with_walls<I: IntoIterator<Item = CellId>>(mut self, walls: I) -> GridConfig {
        self.walls = walls.into_iter().collect();
        self
    }

    pub fn with_diagonal_move(mut self, allow_diagonal_move: bool) -> GridConfig {
        self.allow_diagonal_move = allow_diagonal_move;
        self
    }

    pub fn with_start(mut self, start: Option<CellId>) -> GridConfig {
        self.start = start;
        self
    }

    pub fn with_finish(mut self, finish: Option<CellId>) -> GridConfig {
        self.finish = finish;
        self
    }

    /// Number of cells, or [None] when it does not fit in a `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// Checks dimensions and endpoints. Wall ids are not checked here: out-of-range walls are
    /// dropped with a warning when the grid is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell_count = match self.cell_count() {
            Some(n) if n > 0 => n,
            _ => {
                return Err(ConfigError::InvalidDimensions {
                    rows: self.rows,
                    columns: self.columns,
                })
            }
        };
        for id in [self.start, self.finish].into_iter().flatten() {
            if id >= cell_count {
                return Err(ConfigError::EndpointOutOfBounds { id, cell_count });
            }
        }
        Ok(())
    }

    /// The wall ids that address a cell of this grid, in the given order. Others are logged
    /// and skipped.
    pub fn valid_walls(&self) -> impl Iterator<Item = CellId> + '_ {
        let cell_count = self.cell_count().unwrap_or(0);
        self.walls.iter().copied().filter(move |&id| {
            if id < cell_count {
                true
            } else {
                warn!("Ignoring wall id {} outside of a {} cell grid", id, cell_count);
                false
            }
        })
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

/// Parses the `rows&columns&id:id:...` grid descriptor. Empty fields fall back to the defaults
/// and wall tokens that are not non-negative integers are skipped.
impl FromStr for GridConfig {
    type Err = ConfigError;

    fn from_str(descriptor: &str) -> Result<GridConfig, ConfigError> {
        let mut fields = descriptor.trim().trim_start_matches('#').split('&');
        let rows = parse_dimension(fields.next(), DEFAULT_ROWS)?;
        let columns = parse_dimension(fields.next(), DEFAULT_COLUMNS)?;
        let walls = fields
            .next()
            .unwrap_or("")
            .split(':')
            .filter(|token| !token.is_empty())
            .filter_map(|token| match token.trim().parse::<CellId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring malformed wall id {:?}", token);
                    None
                }
            })
            .collect::<Vec<_>>();
        let config = GridConfig::new(rows, columns).with_walls(walls);
        config.validate()?;
        Ok(config)
    }
}

fn parse_dimension(field: Option<&str>, default: usize) -> Result<usize, ConfigError> {
    match field.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidDescriptor {
                field: value.to_owned(),
            }),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDimensions { rows: usize, columns: usize },
    InvalidDescriptor { field: String },
    EndpointOutOfBounds { id: CellId, cell_count: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, columns } => {
                write!(f, "grid dimensions {rows}x{columns} are empty or too large")
            }
            Self::InvalidDescriptor { field } => {
                write!(f, "grid descriptor field {field:?} is not a dimension")
            }
            Self::EndpointOutOfBounds { id, cell_count } => {
                write!(f, "endpoint {id} is outside of a {cell_count} cell grid")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
