use strum::{Display, EnumIter, EnumString};

/// Games this runner can start, parsed from the command line or the page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum GameName {
    Snake,
    Chess,
}

impl GameName {
    pub fn run(self) {
        match self {
            Self::Snake => snake::run(),
            Self::Chess => chess_board::run(),
        }
    }
}
