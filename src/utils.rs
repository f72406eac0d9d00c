//! Utility functions for describing tube layouts as text.

use crate::engine::{Board, Color, Tube};
use crate::error::{Error, Result};

/// Parses an array of string slices into a `Board`.
///
/// Each string slice describes one tube, bottom-to-top, using one
/// uppercase letter per unit (`'A'` = color 0, `'B'` = color 1, ...). A
/// row holding the single character `'-'`, or an empty row, describes an
/// empty tube. Rows may be shorter than `capacity` (tubes often start
/// partially filled) but never longer.
///
/// # Arguments
/// * `rows`: One string slice per tube, in board order.
/// * `capacity`: The uniform tube capacity.
///
/// # Returns
/// * `Ok(Board)` when every row parses.
/// * `Err(Error::RowTooLong)` when a row exceeds `capacity`.
/// * `Err(Error::UnknownColor)` when a row contains anything but
///   uppercase letters.
///
/// # Examples
/// ```
/// use liquidsort_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RB", "BR", "-"], 2).unwrap();
/// assert_eq!(board.tubes().len(), 3);
/// assert!(board.tubes()[2].is_empty());
/// assert_eq!(board.tubes()[0].len(), 2);
///
/// assert!(board_from_str_array(&["RX?"], 4).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str], capacity: usize) -> Result<Board> {
    let mut tubes = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if row.is_empty() || *row == "-" {
            tubes.push(Tube::new(capacity));
            continue;
        }

        let len = row.chars().count();
        if len > capacity {
            return Err(Error::RowTooLong {
                tube: i,
                len,
                capacity,
            });
        }

        let mut contents = Vec::with_capacity(len);
        for (position, character) in row.chars().enumerate() {
            let color = Color::from_char(character).ok_or(Error::UnknownColor {
                character,
                tube: i,
                position,
            })?;
            contents.push(color);
        }
        tubes.push(Tube::with_contents(capacity, contents)?);
    }

    Ok(Board::new(tubes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["AABB", "BBAA", "-", ""], 4).unwrap();
        assert_eq!(board.tubes().len(), 4);
        assert_eq!(board.tubes()[0].contents()[0], Color(0));
        assert_eq!(board.tubes()[0].top_color(), Some(Color(1)));
        assert!(board.tubes()[2].is_empty());
        assert!(board.tubes()[3].is_empty());
    }

    #[test]
    fn test_board_from_str_array_partial_rows() {
        let board = board_from_str_array(&["AB", "A"], 4).unwrap();
        assert_eq!(board.tubes()[0].len(), 2);
        assert_eq!(board.tubes()[0].free_space(), 2);
        assert_eq!(board.tubes()[1].len(), 1);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["AB", "Ax"], 4);
        assert!(matches!(
            result,
            Err(Error::UnknownColor {
                character: 'x',
                tube: 1,
                position: 1,
            })
        ));
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let result = board_from_str_array(&["AAABB"], 4);
        assert!(matches!(
            result,
            Err(Error::RowTooLong {
                tube: 0,
                len: 5,
                capacity: 4,
            })
        ));
        // The error message names the offending tube.
        assert!(result.unwrap_err().to_string().contains("tube 0"));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board = board_from_str_array(&[], 4).unwrap();
        assert!(board.tubes().is_empty());
        assert!(board.is_solved());
    }
}
