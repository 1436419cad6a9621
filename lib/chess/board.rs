use crate::chess::{Bitboard, Color, File, Piece, Rank, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{Display, Error};

/// A handle into the board's piece store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PieceId(u8);

impl PieceId {
    #[inline(always)]
    fn index(self) -> usize {
        self.0 as _
    }
}

/// A piece tracked by the board.
///
/// The recorded square always mirrors the cell the piece occupies; `None`
/// means the piece is off the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct Slot {
    piece: Piece,
    square: Option<Square>,
    moves: u32,
}

/// The reason why a [`Piece`] could not be placed on a [`Square`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("square `{_0}` is already occupied")]
pub struct OccupiedSquare(#[error(not(source))] pub Square);

/// The chess board.
///
/// A mailbox grid of 64 cells backed by a single piece store; the cells hold
/// handles into the store, and the live and captured collections are derived
/// views over it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Option<PieceId>; 64],
    store: ArrayVec<Slot, 32>,
}

impl Default for Board {
    /// The standard 32-piece initial setup.
    fn default() -> Self {
        use Role::*;
        const BACK_RANK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (file, role) in File::iter().zip(BACK_RANK) {
            for (color, back, front) in [
                (Color::White, Rank::First, Rank::Second),
                (Color::Black, Rank::Eighth, Rank::Seventh),
            ] {
                let result = board.place(Piece(color, role), Square::new(file, back));
                debug_assert_eq!(result, Ok(()));
                let result = board.place(Piece(color, Pawn), Square::new(file, front));
                debug_assert_eq!(result, Ok(()));
            }
        }

        board
    }
}

impl Board {
    /// Constructs a [`Board`] with no pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board {
            cells: [None; 64],
            store: ArrayVec::new(),
        }
    }

    #[inline(always)]
    fn id_on(&self, sq: Square) -> Option<PieceId> {
        self.cells[sq.get() as usize]
    }

    /// Places a new [`Piece`] on a [`Square`].
    pub fn place(&mut self, piece: Piece, sq: Square) -> Result<(), OccupiedSquare> {
        if self.is_occupied(sq) {
            return Err(OccupiedSquare(sq));
        }

        let id = PieceId(self.store.len() as _);
        self.store.push(Slot {
            piece,
            square: Some(sq),
            moves: 0,
        });

        self.cells[sq.get() as usize] = Some(id);
        Ok(())
    }

    /// Removes the [`Piece`] on a [`Square`], if any.
    ///
    /// The cell is cleared and the piece joins the off-board view.
    pub fn lift(&mut self, sq: Square) -> Option<Piece> {
        let id = self.lift_id(sq)?;
        Some(self.store[id.index()].piece)
    }

    fn lift_id(&mut self, sq: Square) -> Option<PieceId> {
        let id = self.cells[sq.get() as usize].take()?;
        self.store[id.index()].square = None;
        Some(id)
    }

    fn put(&mut self, id: PieceId, sq: Square) {
        debug_assert!(!self.is_occupied(sq));
        self.cells[sq.get() as usize] = Some(id);
        self.store[id.index()].square = Some(sq);
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Some(self.store[self.id_on(sq)?.index()].piece)
    }

    /// Whether the given [`Square`] is occupied.
    #[inline(always)]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.id_on(sq).is_some()
    }

    /// How many times the [`Piece`] on the given [`Square`] has moved.
    #[inline(always)]
    pub fn move_count(&self, sq: Square) -> Option<u32> {
        Some(self.store[self.id_on(sq)?.index()].moves)
    }

    /// An iterator over the pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.store.iter().filter_map(|s| Some((s.piece, s.square?)))
    }

    /// An iterator over the captured pieces.
    #[inline(always)]
    pub fn captured(&self) -> impl Iterator<Item = Piece> + '_ {
        self.store
            .iter()
            .filter(|s| s.square.is_none())
            .map(|s| s.piece)
    }

    /// The [`Square`]s occupied by any piece.
    pub fn occupied(&self) -> Bitboard {
        self.iter().fold(Bitboard::empty(), |bb, (_, sq)| bb.with(sq))
    }

    /// The [`Square`]s occupied by pieces of a [`Color`].
    pub fn by_color(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(p, _)| p.color() == color)
            .fold(Bitboard::empty(), |bb, (_, sq)| bb.with(sq))
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    ///
    /// # Panics
    ///
    /// Panics if the king is not on the board; exactly one king per color
    /// exists at all times in a well-formed match.
    pub fn king(&self, side: Color) -> Square {
        self.iter()
            .find_map(|(p, sq)| (p == Piece(side, Role::King)).then_some(sq))
            .expect("expected king on the board")
    }

    /// Relocates the piece on `whence` to `whither` and returns the capture,
    /// if any.
    ///
    /// The caller is responsible for having validated the move against the
    /// piece's legality matrix. A king relocating by two files drags the
    /// corresponding rook along.
    pub(crate) fn execute(&mut self, whence: Square, whither: Square) -> Option<Piece> {
        let mover = self.lift_id(whence).expect("expected piece on source square");
        let captured = self.lift_id(whither);
        self.put(mover, whither);
        self.store[mover.index()].moves += 1;

        if self.store[mover.index()].piece.role() == Role::King {
            match whither.file() - whence.file() {
                2 => self.drag_rook(whence, 3, 1),
                -2 => self.drag_rook(whence, -4, -1),
                _ => {}
            }
        }

        captured.map(|id| self.store[id.index()].piece)
    }

    fn drag_rook(&mut self, whence: Square, home: i8, dest: i8) {
        let rank = whence.rank();
        let home = Square::new(File::new(whence.file().get() + home), rank);
        let dest = Square::new(File::new(whence.file().get() + dest), rank);
        let rook = self.lift_id(home).expect("expected castling rook on its home square");
        self.put(rook, dest);
        self.store[rook.index()].moves += 1;
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl std::ops::Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        use {Color::*, Role::*};
        match self.piece_on(sq) {
            Some(Piece(White, Pawn)) => &Some(Piece(White, Pawn)),
            Some(Piece(White, Knight)) => &Some(Piece(White, Knight)),
            Some(Piece(White, Bishop)) => &Some(Piece(White, Bishop)),
            Some(Piece(White, Rook)) => &Some(Piece(White, Rook)),
            Some(Piece(White, Queen)) => &Some(Piece(White, Queen)),
            Some(Piece(White, King)) => &Some(Piece(White, King)),
            Some(Piece(Black, Pawn)) => &Some(Piece(Black, Pawn)),
            Some(Piece(Black, Knight)) => &Some(Piece(Black, Knight)),
            Some(Piece(Black, Bishop)) => &Some(Piece(Black, Bishop)),
            Some(Piece(Black, Rook)) => &Some(Piece(Black, Rook)),
            Some(Piece(Black, Queen)) => &Some(Piece(Black, Queen)),
            Some(Piece(Black, King)) => &Some(Piece(Black, King)),
            None => &None,
        }
    }
}
