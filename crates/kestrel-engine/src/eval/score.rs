use std::fmt;
use std::ops::Neg;

/// Evaluation score in centipawns from one side's perspective.
///
/// Positive favours the perspective side. The mate sentinel sits far above
/// anything material and placement can sum to, so ordinary scores never
/// collide with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i32);

/// Classification of a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    /// A material/placement score in centipawns.
    Ordinary(i32),
    /// The perspective side delivers mate.
    Mating,
    /// The perspective side is mated.
    Mated,
}

impl Score {
    pub const DRAW: Score = Score(0);
    pub const MATE: Score = Score(100_000_000);
    /// Root window bound. Strictly wider than [`Score::MATE`] so a mated
    /// line still improves on the initial best.
    pub const INFINITY: Score = Score(1_000_000_000);

    #[inline]
    pub const fn cp(centipawns: i32) -> Score {
        Score(centipawns)
    }

    #[inline]
    pub const fn centipawns(self) -> i32 {
        self.0
    }

    pub fn kind(self) -> ScoreKind {
        if self >= Score::MATE {
            ScoreKind::Mating
        } else if self <= -Score::MATE {
            ScoreKind::Mated
        } else {
            ScoreKind::Ordinary(self.0)
        }
    }

    #[inline]
    pub fn is_mate(self) -> bool {
        !matches!(self.kind(), ScoreKind::Ordinary(_))
    }
}

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ScoreKind::Ordinary(cp) => write!(f, "{cp}cp"),
            ScoreKind::Mating => f.write_str("mate"),
            ScoreKind::Mated => f.write_str("mated"),
        }
    }
}
