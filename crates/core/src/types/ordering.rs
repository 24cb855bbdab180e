//! Pure computation for moving an item within an ordered list.
//!
//! Services carry an explicit `orderIndex`; the admin screen moves a service
//! up or down by one position and then rewrites every record's index to its
//! list position, keeping the indices a dense `0..N-1` sequence. The swap
//! itself is computed here so it can be tested without I/O.

use serde::{Deserialize, Serialize};

/// Direction to move an item in an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward index 0.
    Up,
    /// Toward the end of the list.
    Down,
}

/// Index of the neighbor an item at `index` swaps with when moved in
/// `direction`, or `None` if the move is a boundary no-op (first item moved
/// up, last item moved down).
#[must_use]
pub const fn neighbor_index(len: usize, index: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        Direction::Up => {
            if index == 0 {
                None
            } else {
                Some(index - 1)
            }
        }
        Direction::Down => {
            if index + 1 >= len {
                None
            } else {
                Some(index + 1)
            }
        }
    }
}

/// Swap the item at `index` with its neighbor in `direction`.
///
/// Returns `true` if the list changed. Boundary moves leave the list
/// untouched and return `false`.
pub fn move_item<T>(items: &mut [T], index: usize, direction: Direction) -> bool {
    match neighbor_index(items.len(), index, direction) {
        Some(target) => {
            items.swap(index, target);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_up_swaps_with_previous() {
        let mut items = vec!["a", "b", "c"];
        assert!(move_item(&mut items, 1, Direction::Up));
        assert_eq!(items, vec!["b", "a", "c"]);
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut items = vec!["a", "b", "c"];
        assert!(move_item(&mut items, 1, Direction::Down));
        assert_eq!(items, vec!["a", "c", "b"]);
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut items = vec!["a", "b", "c"];
        assert!(!move_item(&mut items, 0, Direction::Up));
        assert!(!move_item(&mut items, 2, Direction::Down));
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn out_of_range_index_is_noop() {
        let mut items = vec!["a"];
        assert!(!move_item(&mut items, 5, Direction::Down));
        assert_eq!(items, vec!["a"]);
    }

    #[test]
    fn positions_stay_dense_after_move() {
        // After a move, position = list index, so indices are 0..N-1 by
        // construction. Assert the full expected sequence anyway.
        let mut items = vec!["a", "b", "c", "d"];
        move_item(&mut items, 2, Direction::Up);
        let indices: Vec<usize> = (0..items.len()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(items, vec!["a", "c", "b", "d"]);
    }
}
