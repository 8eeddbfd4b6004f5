use serde::{Deserialize, Serialize};

/// Scores a sequence pair at a column where at least one side is a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GapPolicy {
    /// Same penalty for every gap position.
    Fixed { penalty: f64, gap_gap: f64 },
    /// Run-length aware: `open` starts a run, `extend` continues one.
    Affine { open: f64, extend: f64, gap_gap: f64 },
}

impl Default for GapPolicy {
    fn default() -> Self {
        Self::fixed(-10.0)
    }
}

impl GapPolicy {
    /// One penalty for every pair with a gap, gap/gap included.
    pub fn fixed(penalty: f64) -> Self {
        Self::Fixed {
            penalty,
            gap_gap: penalty,
        }
    }

    pub fn gap_gap(&self) -> f64 {
        match *self {
            Self::Fixed { gap_gap, .. } | Self::Affine { gap_gap, .. } => gap_gap,
        }
    }

    /// Score for a gap position. `a_prev`/`b_prev` report whether each
    /// sequence was gapped in the preceding column.
    /// Returns `None` when neither side is a gap.
    #[inline(always)]
    pub fn score(&self, a_gap: bool, b_gap: bool, a_prev: bool, b_prev: bool) -> Option<f64> {
        match (a_gap, b_gap) {
            (false, false) => None,
            (true, true) => Some(self.gap_gap()),
            _ => Some(match *self {
                Self::Fixed { penalty, .. } => penalty,
                Self::Affine { open, extend, .. } => {
                    let continues = if a_gap { a_prev } else { b_prev };
                    if continues {
                        extend
                    } else {
                        open
                    }
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_run_length() {
        let p = GapPolicy::fixed(-2.0);
        assert_eq!(p.score(true, false, false, false), Some(-2.0));
        assert_eq!(p.score(false, true, true, true), Some(-2.0));
        assert_eq!(p.score(true, true, false, false), Some(-2.0));
        assert_eq!(p.score(false, false, true, true), None);
    }

    #[test]
    fn affine_extends_only_the_gapped_side() {
        let p = GapPolicy::Affine {
            open: -5.0,
            extend: -1.0,
            gap_gap: 0.0,
        };
        assert_eq!(p.score(true, false, false, false), Some(-5.0));
        assert_eq!(p.score(true, false, true, false), Some(-1.0));
        // The other sequence's earlier gap does not make this an extension.
        assert_eq!(p.score(true, false, false, true), Some(-5.0));
        assert_eq!(p.score(true, true, true, true), Some(0.0));
    }
}
