use crate::chess::{Bitboard, Board, Color, File, Piece, Rank, Role, Square};

const KNIGHT: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The square one step away from `whence`, if it is on the board.
fn offset(whence: Square, df: i8, dr: i8) -> Option<Square> {
    let f = whence.file().get() + df;
    let r = whence.rank().get() + dr;
    ((0..8).contains(&f) && (0..8).contains(&r)).then(|| Square::new(File::new(f), Rank::new(r)))
}

impl Board {
    /// The set of squares the piece on `whence` could relocate to, ignoring
    /// whether the move would expose its own king.
    ///
    /// Returns the empty set if the square is vacant.
    pub fn reachable(&self, whence: Square) -> Bitboard {
        let Some(Piece(color, role)) = self[whence] else {
            return Bitboard::empty();
        };

        match role {
            Role::Pawn => self.pawn_moves(whence, color),
            Role::Knight => self.leaps(whence, color, &KNIGHT),
            Role::Bishop => self.slides(whence, color, &BISHOP),
            Role::Rook => self.slides(whence, color, &ROOK),
            Role::Queen => self.slides(whence, color, &ROOK) | self.slides(whence, color, &BISHOP),
            Role::King => self.leaps(whence, color, &KING) | self.castles(whence, color),
        }
    }

    /// Whether the king of a [`Color`] is attacked by any hostile piece.
    pub fn in_check(&self, side: Color) -> bool {
        let king = self.king(side);
        self.iter()
            .filter(|(p, _)| p.color() != side)
            .any(|(_, sq)| self.reachable(sq).contains(king))
    }

    fn leaps(&self, whence: Square, color: Color, steps: &[(i8, i8)]) -> Bitboard {
        steps
            .iter()
            .filter_map(|&(df, dr)| offset(whence, df, dr))
            .fold(Bitboard::empty(), |bb, sq| bb.with(sq))
            & !self.by_color(color)
    }

    fn slides(&self, whence: Square, color: Color, rays: &[(i8, i8)]) -> Bitboard {
        let occupied = self.occupied();
        let mut bb = Bitboard::empty();
        for &(df, dr) in rays {
            let mut sq = whence;
            while let Some(next) = offset(sq, df, dr) {
                bb = bb.with(next);
                if occupied.contains(next) {
                    break;
                }

                sq = next;
            }
        }

        bb & !self.by_color(color)
    }

    fn pawn_moves(&self, whence: Square, color: Color) -> Bitboard {
        let dr = match color {
            Color::White => 1,
            Color::Black => -1,
        };

        let mut bb = Bitboard::empty();
        if let Some(ahead) = offset(whence, 0, dr) {
            if !self.is_occupied(ahead) {
                bb = bb.with(ahead);
                if self.move_count(whence) == Some(0) {
                    if let Some(jump) = offset(whence, 0, 2 * dr) {
                        if !self.is_occupied(jump) {
                            bb = bb.with(jump);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(diag) = offset(whence, df, dr) {
                if self.piece_on(diag).is_some_and(|p| p.color() != color) {
                    bb = bb.with(diag);
                }
            }
        }

        bb
    }

    /// Castling destinations for the king on `whence`.
    ///
    /// A two-file lateral step towards a rook of the same color, available
    /// while neither has moved and every square strictly between them is
    /// empty. The squares the king passes through are tested for occupancy
    /// only, not for attacks.
    fn castles(&self, whence: Square, color: Color) -> Bitboard {
        let mut bb = Bitboard::empty();
        if self.move_count(whence) != Some(0) {
            return bb;
        }

        for (home, dest, between) in [(3, 2, &[1, 2][..]), (-4, -2, &[-1, -2, -3][..])] {
            let Some(home) = offset(whence, home, 0) else {
                continue;
            };

            if self.piece_on(home) != Some(Piece(color, Role::Rook))
                || self.move_count(home) != Some(0)
            {
                continue;
            }

            let vacant = between
                .iter()
                .all(|&df| offset(whence, df, 0).is_some_and(|sq| !self.is_occupied(sq)));

            if vacant {
                if let Some(sq) = offset(whence, dest, 0) {
                    bb = bb.with(sq);
                }
            }
        }

        bb
    }
}
