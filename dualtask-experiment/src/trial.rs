use dualtask_core::TrialPair;

/// Ordered, forward-only cursor over the configured trial pairs.
///
/// Once [`next_pair`](Self::next_pair) has returned `None` the sequence is
/// exhausted for good.
#[derive(Debug, Clone, Default)]
pub struct TrialSequence {
    pairs: Vec<TrialPair>,
    cursor: usize,
    exhausted: bool,
}

impl TrialSequence {
    pub fn new(pairs: Vec<TrialPair>) -> Self {
        Self {
            pairs,
            cursor: 0,
            exhausted: false,
        }
    }

    pub fn next_pair(&mut self) -> Option<TrialPair> {
        if self.exhausted {
            return None;
        }
        match self.pairs.get(self.cursor) {
            Some(pair) => {
                self.cursor += 1;
                Some(pair.clone())
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of pairs handed out so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pairs.len() - self.cursor
    }
}

impl From<Vec<TrialPair>> for TrialSequence {
    fn from(pairs: Vec<TrialPair>) -> Self {
        Self::new(pairs)
    }
}
