use std::fmt;

/// Block selector for state queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockNumber {
    /// Specific block number
    Number(u64),
    /// Latest mined block
    #[default]
    Latest,
    /// Genesis block
    Earliest,
    /// Pending state
    Pending,
    /// Latest safe block
    Safe,
    /// Latest finalized block
    Finalized,
}

impl BlockNumber {
    /// Symbolic tag, or `None` for a numbered block
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            BlockNumber::Number(_) => None,
            BlockNumber::Latest => Some("latest"),
            BlockNumber::Earliest => Some("earliest"),
            BlockNumber::Pending => Some("pending"),
            BlockNumber::Safe => Some("safe"),
            BlockNumber::Finalized => Some("finalized"),
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(n: u64) -> Self {
        BlockNumber::Number(n)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumber::Number(n) => write!(f, "{n}"),
            other => f.write_str(other.tag().unwrap_or_default()),
        }
    }
}
