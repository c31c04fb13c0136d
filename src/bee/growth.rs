use glam::Vec2;

/// Happiness at which a bee reaches [`SizeTier::Plump`].
pub const PLUMP_AT: u32 = 50;
/// Happiness a bee must exceed to reach [`SizeTier::Giant`].
pub const GIANT_ABOVE: u32 = 200;

/// Discrete body size, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SizeTier {
    #[default]
    Small,
    Plump,
    Giant,
}

impl SizeTier {
    pub fn for_happiness(happiness: u32) -> Self {
        if happiness > GIANT_ABOVE {
            Self::Giant
        } else if happiness >= PLUMP_AT {
            Self::Plump
        } else {
            Self::Small
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            Self::Small => Vec2::new(32.0, 12.0),
            Self::Plump => Vec2::new(48.0, 18.0),
            Self::Giant => Vec2::new(64.0, 24.0),
        }
    }
}
