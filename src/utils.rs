use crate::engine::{BoardState, MAX_SIDE};
use crate::error::PegError;

/// Parses a command-line state argument into a seed.
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative decimal
/// integer fitting in a `u128` is rejected.
///
/// # Examples
/// ```
/// use peg_solitaire::utils::parse_seed;
///
/// assert_eq!(parse_seed("65023"), Ok(65023));
/// assert!(parse_seed("-3").is_err());
/// assert!(parse_seed("twelve").is_err());
/// ```
pub fn parse_seed(s: &str) -> Result<u128, PegError> {
    let trimmed = s.trim();
    // A leading '+' is accepted.
    trimmed
        .parse::<u128>()
        .map_err(|_| PegError::InvalidSeed(s.to_string()))
}

/// Parses rows of a drawn board into a root `BoardState`.
///
/// Each string slice is one row, top row first, using the same glyphs the board is
/// displayed with: `X` for a peg and `O` for an empty cell. Whitespace between cells is
/// ignored, so `"X O X"` and `"XOX"` are the same row. The board must be square. The
/// first empty cell becomes the goal anchor, exactly as for a seed.
///
/// # Returns
/// * `Ok(BoardState)` if parsing is successful.
/// * `Err(PegError::InvalidBoard)` if:
///     - No rows are given, or there are more than `MAX_SIDE` rows.
///     - A row's cell count differs from the number of rows.
///     - An unrecognized character (not `X`, `O` or whitespace) is encountered.
///
/// # Examples
/// ```
/// use peg_solitaire::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["O O O", "O O O", "X X O"]).unwrap();
/// assert_eq!(board.side(), 3);
/// assert_eq!(board.key(), 0b110);
/// assert_eq!(board.initial_empty(), Some(0));
///
/// assert!(board_from_str_array(&["X O", "X"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<BoardState, PegError> {
    let side = s.len();
    if side == 0 || side > MAX_SIDE {
        return Err(PegError::InvalidBoard(format!(
            "Invalid number of rows. Expected between 1 and {}, found {}",
            MAX_SIDE, side
        )));
    }

    let mut bits = 0u128;
    for (r, row_str) in s.iter().enumerate() {
        let mut cells = 0;
        for ch in row_str.chars().filter(|ch| !ch.is_whitespace()) {
            let occupied = match ch {
                'X' => true,
                'O' => false,
                _ => {
                    return Err(PegError::InvalidBoard(format!(
                        "Unrecognized character '{}' in row {}",
                        ch, r
                    )))
                }
            };
            bits = (bits << 1) | u128::from(occupied);
            cells += 1;
        }

        if cells != side {
            return Err(PegError::InvalidBoard(format!(
                "Row {} has {} cells, expected {}",
                r, cells, side
            )));
        }
    }

    Ok(BoardState::from_cells(side, bits))
}
