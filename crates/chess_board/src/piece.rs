use std::fmt;

use strum::EnumIter;

/// Image drawn on fields that hold no piece.
pub const FALLBACK_IMAGE: &str = "p/test.svg";

const KIND_MASK: u8 = 0b00111;
const COLOR_MASK: u8 = 0b11000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Lowercase FEN letter to kind.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum PieceColor {
    White = 8,
    Black = 16,
}

impl PieceColor {
    /// Suffix of the piece image name, light or dark.
    pub const fn letter(self) -> char {
        match self {
            Self::White => 'l',
            Self::Black => 'd',
        }
    }
}

/// A board cell packed into one byte: kind in bits 0..=2, color in bits 3..=4.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Self = Self(0);

    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self(kind as u8 | color as u8)
    }

    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 & KIND_MASK == 0
    }

    pub const fn kind(self) -> Option<PieceKind> {
        match self.0 & KIND_MASK {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn color(self) -> Option<PieceColor> {
        match self.0 & COLOR_MASK {
            8 => Some(PieceColor::White),
            16 => Some(PieceColor::Black),
            _ => None,
        }
    }

    /// FEN letter, uppercase for white.
    pub const fn fen_char(self) -> Option<char> {
        let (Some(kind), Some(color)) = (self.kind(), self.color()) else {
            return None;
        };
        let letter = kind.letter();
        Some(match color {
            PieceColor::White => letter.to_ascii_uppercase(),
            PieceColor::Black => letter,
        })
    }

    /// `p/{kind}{color}.svg`, or `None` unless both kind and color are set.
    pub fn image_path(self) -> Option<String> {
        let kind = self.kind()?;
        let color = self.color()?;
        Some(format!("p/{}{}.svg", kind.letter(), color.letter()))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.color()) {
            (Some(kind), Some(color)) => write!(f, "{color:?} {kind:?}"),
            _ if self.0 == 0 => write!(f, "Empty"),
            _ => write!(f, "Piece({:#07b})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn codes_pack_kind_and_color() {
        assert_eq!(Piece::new(PieceKind::Pawn, PieceColor::White).code(), 9, "1 | 8");
        assert_eq!(Piece::new(PieceKind::King, PieceColor::Black).code(), 22, "6 | 16");
        for kind in PieceKind::iter() {
            for color in PieceColor::iter() {
                let piece = Piece::new(kind, color);
                assert_eq!(piece.kind(), Some(kind), "{piece:?} kind");
                assert_eq!(piece.color(), Some(color), "{piece:?} color");
                assert!(!piece.is_empty(), "{piece:?} is a piece");
            }
        }
    }

    #[test]
    fn image_paths() {
        assert_eq!(
            Piece::new(PieceKind::Rook, PieceColor::White).image_path().as_deref(),
            Some("p/rl.svg"),
            "white rook"
        );
        assert_eq!(
            Piece::new(PieceKind::Knight, PieceColor::Black).image_path().as_deref(),
            Some("p/nd.svg"),
            "black knight"
        );
    }

    #[test]
    fn missing_kind_or_color_has_no_image() {
        assert_eq!(Piece::EMPTY.image_path(), None, "empty field");
        assert_eq!(Piece::from_code(PieceColor::White as u8).image_path(), None, "color only");
        assert_eq!(Piece::from_code(PieceKind::Queen as u8).image_path(), None, "kind only");
        assert_eq!(Piece::from_code(7).image_path(), None, "kind 7 is unused");
    }

    #[test]
    fn letters_round_trip() {
        for kind in PieceKind::iter() {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind), "{kind:?}");
        }
        assert_eq!(PieceKind::from_letter('x'), None, "unknown letter");
        assert_eq!(PieceKind::from_letter('P'), None, "lookup is lowercase only");
    }

    #[test]
    fn fen_chars_follow_color() {
        assert_eq!(
            Piece::new(PieceKind::Queen, PieceColor::White).fen_char(),
            Some('Q'),
            "white is uppercase"
        );
        assert_eq!(
            Piece::new(PieceKind::Queen, PieceColor::Black).fen_char(),
            Some('q'),
            "black is lowercase"
        );
        assert_eq!(Piece::EMPTY.fen_char(), None, "empty has no letter");
    }
}
