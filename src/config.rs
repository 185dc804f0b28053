use crate::{DEFAULT_GAP, DEFAULT_MATCH, DEFAULT_MISMATCH};

/// Linear scoring scheme. Any integers are accepted; a scheme where
/// `mismatch >= match_score` is unusual but well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            gap: DEFAULT_GAP,
        }
    }
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    /// Score of aligning `a` against `b` in one column.
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

/// How the traceback finds the predecessor of each cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracebackStrategy {
    /// Record a pointer per cell while filling, then follow the pointers.
    #[default]
    Pointers,
    /// Keep only the score matrix and recompute the candidates while walking back.
    Recompute,
}

impl std::str::FromStr for TracebackStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointers" => Ok(Self::Pointers),
            "recompute" => Ok(Self::Recompute),
            other => Err(format!("unknown traceback strategy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme() {
        let params = ScoreParams::default();
        assert_eq!(params, ScoreParams::new(2, -1, -2));
    }

    #[test]
    fn substitution_uses_match_and_mismatch() {
        let params = ScoreParams::new(5, -4, -1);
        assert_eq!(params.substitution(b'A', b'A'), 5);
        assert_eq!(params.substitution(b'A', b'C'), -4);
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("pointers".parse::<TracebackStrategy>(), Ok(TracebackStrategy::Pointers));
        assert_eq!("recompute".parse::<TracebackStrategy>(), Ok(TracebackStrategy::Recompute));
        assert!("banded".parse::<TracebackStrategy>().is_err());
    }
}
