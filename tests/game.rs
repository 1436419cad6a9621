use lib::chess::{Color, Game, Piece, Role, RuleViolation, Square};

fn script(game: &mut Game, moves: &[(Square, Square)]) {
    for &(whence, whither) in moves {
        assert_eq!(game.play(whence, whither).err(), None);
    }
}

fn kings(game: &Game) -> usize {
    game.pieces()
        .filter(|(p, _)| p.role() == Role::King)
        .count()
}

#[test]
fn the_knight_can_develop_before_any_pawn_moves() {
    let game = Game::default();
    let moves = game.moves(Square::B1).unwrap();
    assert!(moves.contains(Square::C3));
}

#[test]
fn the_king_gains_a_step_once_the_pawn_in_front_moves() {
    let mut game = Game::default();
    assert_eq!(game.moves(Square::E1), Err(RuleViolation::NoLegalMoves));
    script(&mut game, &[(Square::E2, Square::E4), (Square::A7, Square::A6)]);
    assert!(game.moves(Square::E1).unwrap().contains(Square::E2));
}

#[test]
fn only_the_side_to_move_may_move_its_pieces() {
    let mut game = Game::default();
    assert_eq!(
        game.play(Square::E7, Square::E5),
        Err(RuleViolation::WrongOwner)
    );

    script(&mut game, &[(Square::E2, Square::E4)]);
    assert_eq!(
        game.play(Square::D2, Square::D4),
        Err(RuleViolation::WrongOwner)
    );
}

#[test]
fn the_rook_stops_at_the_first_hostile_piece_and_may_capture_it() {
    let mut game = Game::default();
    script(
        &mut game,
        &[
            (Square::A2, Square::A4),
            (Square::B7, Square::B5),
            (Square::A4, Square::B5),
            (Square::H7, Square::H6),
        ],
    );

    let moves = game.moves(Square::A1).unwrap();
    assert!(moves.contains(Square::A7));
    assert!(!moves.contains(Square::A8));

    assert_eq!(
        game.play(Square::A1, Square::A7),
        Ok(Some(Piece(Color::Black, Role::Pawn)))
    );
}

#[test]
fn fools_mate_flips_the_checkmate_flag_exactly_on_the_mating_move() {
    let mut game = Game::default();
    script(&mut game, &[(Square::F2, Square::F3), (Square::E7, Square::E5)]);
    assert!(!game.is_check());
    assert!(!game.is_checkmate());

    script(&mut game, &[(Square::G2, Square::G4)]);
    assert!(!game.is_checkmate());

    script(&mut game, &[(Square::D8, Square::H4)]);
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(kings(&game), 2);
}

#[test]
fn a_check_that_can_be_blocked_is_not_checkmate() {
    let mut game = Game::default();
    script(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::A2, Square::A3),
            (Square::D8, Square::H4),
        ],
    );

    assert!(game.is_check());
    assert!(!game.is_checkmate());

    // interposing the pawn on g3 clears the check
    script(&mut game, &[(Square::G2, Square::G3)]);
    assert!(!game.is_check());
}

#[test]
fn a_move_that_leaves_the_king_in_check_is_rejected_without_a_trace() {
    let mut game = Game::default();
    script(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::A2, Square::A3),
            (Square::D8, Square::H4),
        ],
    );

    let before = game.clone();
    assert_eq!(
        game.play(Square::B2, Square::B3),
        Err(RuleViolation::SelfCheck)
    );

    assert_eq!(game, before);
}

#[test]
fn both_sides_can_castle_short_once_the_wing_is_clear() {
    let mut game = Game::default();
    script(
        &mut game,
        &[
            (Square::G1, Square::F3),
            (Square::G8, Square::F6),
            (Square::G2, Square::G3),
            (Square::G7, Square::G6),
            (Square::F1, Square::G2),
            (Square::F8, Square::G7),
            (Square::E1, Square::G1),
        ],
    );

    assert_eq!(game[Square::G1], Some(Piece(Color::White, Role::King)));
    assert_eq!(game[Square::F1], Some(Piece(Color::White, Role::Rook)));
    assert_eq!(game[Square::H1], None);

    script(&mut game, &[(Square::E8, Square::G8)]);
    assert_eq!(game[Square::G8], Some(Piece(Color::Black, Role::King)));
    assert_eq!(game[Square::F8], Some(Piece(Color::Black, Role::Rook)));
    assert_eq!(game[Square::H8], None);
}

#[test]
fn the_mover_is_never_left_in_check_after_a_commit() {
    let mut game = Game::default();
    let moves = [
        (Square::E2, Square::E4),
        (Square::E7, Square::E5),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
        (Square::F1, Square::C4),
        (Square::G8, Square::F6),
        (Square::F3, Square::E5),
        (Square::C6, Square::E5),
    ];

    for &(whence, whither) in &moves {
        let side = game.side_to_move();
        assert_eq!(game.play(whence, whither).err(), None);
        assert_eq!(kings(&game), 2);
        assert_ne!(game.side_to_move(), side);
        assert!(!game.is_checkmate() || game.is_check());
    }
}

#[test]
fn captures_move_pieces_to_the_captured_collection_for_good() {
    let mut game = Game::default();
    script(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::D5),
            (Square::D8, Square::D5),
        ],
    );

    let captured: Vec<_> = game.captured().collect();
    assert_eq!(
        captured,
        vec![
            Piece(Color::Black, Role::Pawn),
            Piece(Color::White, Role::Pawn),
        ]
    );

    assert_eq!(game.pieces().count(), 30);
}
