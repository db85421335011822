use std::fmt::{Display, Formatter};

/// Feed selector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Kind {
    Demand,
    Production,
}

impl Kind {
    #[must_use]
    pub const fn layout(self) -> &'static Layout {
        match self {
            Self::Demand => &Layout::DEMAND,
            Self::Production => &Layout::PRODUCTION,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demand => f.write_str("demand"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Maps a key under `valeurs` onto an output record field.
#[derive(Copy, Clone, Debug)]
pub struct Column {
    pub source: &'static str,
    pub output: &'static str,
}

impl Column {
    const fn new(source: &'static str, output: &'static str) -> Self {
        Self { source, output }
    }
}

/// Which values are extracted from a feed detail, and under which names they are emitted.
#[derive(Debug)]
pub struct Layout {
    pub kind: Kind,

    /// Detail gets emitted only if this value is present and non-empty.
    pub primary: Column,

    /// Passed through as is, including `null`s.
    pub secondary: &'static [Column],
}

impl Layout {
    pub const DEMAND: Self = Self {
        kind: Kind::Demand,
        primary: Column::new("demandeTotal", "demand"),
        secondary: &[],
    };

    pub const PRODUCTION: Self = Self {
        kind: Kind::Production,
        primary: Column::new("total", "total"),
        secondary: &[
            Column::new("hydraulique", "hydraulic"),
            Column::new("eolien", "wind"),
            Column::new("autres", "other"),
            Column::new("solaire", "solar"),
            Column::new("thermique", "thermal"),
        ],
    };

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        std::iter::once(&self.primary).chain(self.secondary)
    }
}
