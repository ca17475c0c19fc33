//! Crate root module declarations for the Sentinel Chess rules engine.
//!
//! This file exposes the subsystems (position model, legality engine, check
//! detection, move generation, search, engines, and notation helpers) so
//! benches, tests, and embedding front-ends can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_record;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
    pub mod offsets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod minimax;
}

pub mod tables {
    pub mod opening_book;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod san;
}
