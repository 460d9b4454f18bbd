use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;
use thiserror::Error;

use crate::piece::{Piece, PieceColor, PieceKind};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const SIZE: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN string has no piece placement")]
    MissingPlacement,
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} covers {files} files instead of 8")]
    RankLength { rank: usize, files: usize },
    #[error("unknown piece character {0:?}")]
    UnknownPiece(char),
}

/// A field of the board. `rank` 0 is white's home rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < SIZE as u8 && rank < SIZE as u8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SIZE as u8).flat_map(|rank| (0..SIZE as u8).map(move |file| Self { file, rank }))
    }

    /// Fields alternate colors, a1 is dark.
    pub const fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), self.rank + 1)
    }
}

/// 8x8 grid of packed piece codes, stored rank 1 first.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    ranks: [[Piece; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            ranks: [[Piece::EMPTY; SIZE]; SIZE],
        }
    }

    pub fn starting_position() -> Self {
        // The constant is known to be well formed.
        Self::from_fen(STARTING_FEN).unwrap_or_default()
    }

    /// Decodes the piece placement field of a FEN string. Remaining fields are ignored.
    ///
    /// FEN lists rank 8 first; ranks are reversed so that `rank(0)` is rank 1.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(FenError::MissingPlacement)?;

        let fen_ranks: Vec<&str> = placement.split('/').collect();
        if fen_ranks.len() != SIZE {
            return Err(FenError::WrongRankCount(fen_ranks.len()));
        }

        let mut board = Self::empty();
        for (index, (target, fen_rank)) in board
            .ranks
            .iter_mut()
            .zip(fen_ranks.iter().rev())
            .enumerate()
        {
            let cells = decode_rank(fen_rank)?;
            if cells.len() != SIZE {
                return Err(FenError::RankLength {
                    rank: index + 1,
                    files: cells.len(),
                });
            }
            for (slot, piece) in target.iter_mut().zip(cells) {
                *slot = piece;
            }
        }
        Ok(board)
    }

    pub fn get(&self, square: Square) -> Piece {
        self.ranks
            .get(square.rank as usize)
            .and_then(|rank| rank.get(square.file as usize))
            .copied()
            .unwrap_or(Piece::EMPTY)
    }

    /// Files a..h of a rank, `index` 0 being rank 1.
    pub fn rank(&self, index: usize) -> Option<&[Piece; SIZE]> {
        self.ranks.get(index)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().map(|square| (square, self.get(square)))
    }

    pub fn count(&self, kind: PieceKind, color: PieceColor) -> usize {
        let wanted = Piece::new(kind, color);
        self.pieces().filter(|(_, piece)| *piece == wanted).count()
    }

    /// Encodes the board back into a FEN piece placement field.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::with_capacity(64 + 7);
        for (index, rank) in self.ranks.iter().rev().enumerate() {
            if index > 0 {
                fen.push('/');
            }
            let mut empty_run = 0u8;
            for piece in rank {
                match piece.fen_char() {
                    Some(letter) => {
                        if empty_run > 0 {
                            fen.push(char::from(b'0' + empty_run));
                            empty_run = 0;
                        }
                        fen.push(letter);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push(char::from(b'0' + empty_run));
            }
        }
        fen
    }
}

fn decode_rank(fen_rank: &str) -> Result<Vec<Piece>, FenError> {
    let mut cells = Vec::with_capacity(SIZE);
    for c in fen_rank.chars() {
        if let Some(run) = c.to_digit(10) {
            cells.extend(core::iter::repeat_n(Piece::EMPTY, run as usize));
        } else {
            let kind =
                PieceKind::from_letter(c.to_ascii_lowercase()).ok_or(FenError::UnknownPiece(c))?;
            let color = if c.is_ascii_lowercase() {
                PieceColor::Black
            } else {
                PieceColor::White
            };
            cells.push(Piece::new(kind, color));
        }
        if cells.len() > SIZE {
            break;
        }
    }
    Ok(cells)
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in self.ranks.iter().rev() {
            for piece in rank {
                write!(f, "{} ", piece.fen_char().unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
