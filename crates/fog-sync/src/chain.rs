//! Append-only hash chains
//!
//! Every link records the hash a half-move started from and the hash it
//! produced. A new link is only accepted when its input equals the previous
//! link's output.

use fog_types::StateHash;

/// One half-move's input and output hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    pub input: StateHash,
    pub output: StateHash,
}

/// Continuity violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainMismatch {
    pub expected: StateHash,
    pub found: StateHash,
}

/// Ordered sequence of links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashChain {
    links: Vec<ChainLink>,
}

impl HashChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Output hashes in order
    pub fn outputs(&self) -> impl Iterator<Item = StateHash> + '_ {
        self.links.iter().map(|link| link.output)
    }

    pub fn last_output(&self) -> Option<StateHash> {
        self.links.last().map(|link| link.output)
    }

    /// Would a link starting from `input` continue this chain
    pub fn check_next(&self, input: StateHash) -> Result<(), ChainMismatch> {
        match self.last_output() {
            Some(expected) if expected != input => Err(ChainMismatch {
                expected,
                found: input,
            }),
            _ => Ok(()),
        }
    }

    /// Append a link after checking continuity
    pub fn append(&mut self, link: ChainLink) -> Result<(), ChainMismatch> {
        self.check_next(link.input)?;
        self.links.push(link);
        Ok(())
    }

    /// Continuity holds across every adjacent pair
    pub fn is_continuous(&self) -> bool {
        self.links
            .windows(2)
            .all(|pair| pair[0].output == pair[1].input)
    }
}
