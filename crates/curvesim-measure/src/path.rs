//! Monotone alignments between two curves, recovered from a filled recurrence table.

/// One aligned pair: point `a` of the first curve with point `b` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStep {
    /// Index in the first curve.
    pub a: usize,
    /// Index in the second curve.
    pub b: usize,
}

/// An ordered sequence of aligned pairs from `(0, 0)` to `(m-1, p-1)`.
///
/// Each step advances `a`, `b`, or both by exactly one. For DTW this is the
/// warping path; for Fréchet it is an optimal coupling.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment(Vec<AlignmentStep>);

impl Alignment {
    /// Walk back from the last cell of a row-major `n x m` cumulative table,
    /// always stepping to the smallest predecessor (diagonal on ties, then above).
    pub(crate) fn traceback(table: &[f64], n: usize, m: usize) -> Self {
        debug_assert_eq!(table.len(), n * m);
        let mut steps = Vec::with_capacity(n + m - 1);
        let (mut i, mut j) = (n - 1, m - 1);

        loop {
            steps.push(AlignmentStep { a: i, b: j });
            match (i, j) {
                (0, 0) => break,
                (0, _) => j -= 1,
                (_, 0) => i -= 1,
                _ => {
                    let diag = table[(i - 1) * m + j - 1];
                    let above = table[(i - 1) * m + j];
                    let left = table[i * m + j - 1];
                    if diag <= above && diag <= left {
                        i -= 1;
                        j -= 1;
                    } else if above <= left {
                        i -= 1;
                    } else {
                        j -= 1;
                    }
                }
            }
        }

        steps.reverse();
        Self(steps)
    }

    /// Return the aligned pairs as a slice.
    #[must_use]
    pub fn steps(&self) -> &[AlignmentStep] {
        &self.0
    }

    /// Return the number of aligned pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the alignment contains no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a AlignmentStep;
    type IntoIter = std::slice::Iter<'a, AlignmentStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
