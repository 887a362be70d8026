use crate::engine::Move;
use std::ops::Index;

// Every piece has at most one legal move per diagonal direction, so twelve
// kings give 48.
const MAX_MOVES: usize = 48;

#[derive(Clone)]
pub struct MoveList {
    pub moves: [Move; MAX_MOVES],
    pub count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            // In debug builds, we want to know if we are overflowing limits.
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.get(0..self.count).unwrap_or(&[]).iter()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m == mv)
    }

    /// Keeps the moves matching `f`, preserving generation order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut kept = 0;
        for i in 0..self.count {
            let Some(&mv) = self.moves.get(i) else {
                break;
            };
            if f(&mv) {
                if let Some(slot) = self.moves.get_mut(kept) {
                    *slot = mv;
                }
                kept += 1;
            }
        }
        self.count = kept;
    }

    pub fn extend_from(&mut self, other: &Self) {
        for &mv in other {
            self.push(mv);
        }
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.iter().copied().collect()
    }
}

// Implement IntoIterator for &MoveList
impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.count, "MoveList index {index} out of range");
        &self.moves[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(sr: u8, sc: u8, er: u8, ec: u8) -> Move {
        Move::new(sr, sc, er, ec)
    }

    #[test]
    fn test_retain_preserves_order() {
        let mut list = MoveList::new();
        list.push(mv(5, 0, 4, 1));
        list.push(mv(5, 2, 3, 4));
        list.push(mv(5, 4, 4, 3));
        list.push(mv(5, 6, 3, 4));

        list.retain(Move::is_jump);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], mv(5, 2, 3, 4));
        assert_eq!(list[1], mv(5, 6, 3, 4));
    }

    #[test]
    fn test_contains_and_to_vec() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(mv(2, 1, 3, 0));
        assert!(list.contains(&mv(2, 1, 3, 0)));
        assert!(!list.contains(&mv(2, 1, 3, 2)));
        assert_eq!(list.to_vec(), vec![mv(2, 1, 3, 0)]);
    }
}
