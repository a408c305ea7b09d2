//! Primitive chain types shared by requests and result views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type AccountId = String;
pub type BlockHash = String;
pub type BlockHeight = u64;
pub type CryptoHash = String;
pub type ChunkHash = String;
pub type PublicKey = String;
pub type Balance = String;
pub type Nonce = u64;
pub type ShardId = u64;
pub type Gas = u64;

// ─── Block selection ──────────────────────────────────────────────────────────

/// A block addressed by height or by hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Height(BlockHeight),
    Hash(BlockHash),
}

impl BlockId {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Height(h) => Value::from(*h),
            Self::Hash(h) => Value::from(h.as_str()),
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height(h) => write!(f, "{h}"),
            Self::Hash(h) => write!(f, "{h}"),
        }
    }
}

/// All-digit strings are heights, anything else is taken as a hash.
impl FromStr for BlockId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<BlockHeight> for BlockId {
    fn from(height: BlockHeight) -> Self {
        Self::Height(height)
    }
}

/// Same rule as [`FromStr`]: clap and other `From<&str>` users see heights.
impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        match s.parse::<BlockHeight>() {
            Ok(height) => Self::Height(height),
            Err(_) => Self::Hash(s.to_string()),
        }
    }
}

/// How final a block must be before the node answers against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Finality {
    Optimistic,
    NearFinal,
    #[default]
    Final,
}

impl Finality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::NearFinal => "near-final",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for Finality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Finality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimistic" => Ok(Self::Optimistic),
            "near-final" => Ok(Self::NearFinal),
            "final" => Ok(Self::Final),
            other => Err(format!("unknown finality `{other}`")),
        }
    }
}

/// Named points in chain history a node can answer against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncCheckpoint {
    Genesis,
    EarliestAvailable,
}

impl SyncCheckpoint {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Genesis => "genesis",
            Self::EarliestAvailable => "earliest_available",
        }
    }
}

/// Selects the point in chain history a state-reading call is evaluated at.
///
/// On the wire this is exactly one of `block_id`, `finality` or
/// `sync_checkpoint`, merged into the surrounding params object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReference {
    BlockId(BlockId),
    Finality(Finality),
    SyncCheckpoint(SyncCheckpoint),
}

impl BlockReference {
    /// Explicit block id if given, otherwise the finality level.
    pub fn from_parts(block_id: Option<BlockId>, finality: Finality) -> Self {
        match block_id {
            Some(id) => Self::BlockId(id),
            None => Self::Finality(finality),
        }
    }

    /// The single key/value pair this reference contributes to params.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            Self::BlockId(id) => map.insert("block_id".into(), id.to_value()),
            Self::Finality(f) => map.insert("finality".into(), f.as_str().into()),
            Self::SyncCheckpoint(c) => map.insert("sync_checkpoint".into(), c.as_str().into()),
        };
        map
    }
}

impl Default for BlockReference {
    fn default() -> Self {
        Self::Finality(Finality::Final)
    }
}

impl From<BlockId> for BlockReference {
    fn from(id: BlockId) -> Self {
        Self::BlockId(id)
    }
}

impl From<Finality> for BlockReference {
    fn from(finality: Finality) -> Self {
        Self::Finality(finality)
    }
}

impl From<SyncCheckpoint> for BlockReference {
    fn from(checkpoint: SyncCheckpoint) -> Self {
        Self::SyncCheckpoint(checkpoint)
    }
}

/// Addresses a chunk either by its own hash or by `(block, shard)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkId {
    Hash(ChunkHash),
    BlockShard { block_id: BlockId, shard_id: ShardId },
}

impl ChunkId {
    pub fn to_params(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Hash(hash) => {
                map.insert("chunk_id".into(), hash.as_str().into());
            }
            Self::BlockShard { block_id, shard_id } => {
                map.insert("block_id".into(), block_id.to_value());
                map.insert("shard_id".into(), (*shard_id).into());
            }
        }
        Value::Object(map)
    }
}
