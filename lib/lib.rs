/// Chess domain types and the match state machine.
pub mod chess;
