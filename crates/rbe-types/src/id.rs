use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a block within its owning assembly.
///
/// Allocated sequentially by the assembly; serializes as a bare number
/// inside the graph and as a decimal string key in the solver's
/// `blocks` map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(BlockId)
    }
}
