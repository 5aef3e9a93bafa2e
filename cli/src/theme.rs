use serde::Deserialize;

/// Glyph set used to draw the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Unicode,
    Ascii,
}

impl Theme {
    pub fn hidden(self) -> &'static str {
        match self {
            Self::Unicode => "■",
            Self::Ascii => "#",
        }
    }

    pub fn empty(self) -> &'static str {
        match self {
            Self::Unicode => "·",
            Self::Ascii => ".",
        }
    }

    pub fn mine(self) -> &'static str {
        match self {
            Self::Unicode => termlink_core::MINE_GLYPH,
            Self::Ascii => "*",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::Unicode => termlink_core::FLAG_GLYPH,
            Self::Ascii => "F",
        }
    }
}
