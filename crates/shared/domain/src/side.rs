use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Execution context a feature belongs to.
///
/// Features are partitioned by side; the host runs each side independently,
/// so only the ordering *within* a side matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Logic shared by every process.
    Common,
    /// Client-only logic.
    Client,
    /// Server-only logic.
    Server,
}

impl Side {
    pub const ALL: [Self; 3] = [Self::Common, Self::Client, Self::Server];

    /// The lowercase name used in logs, file names and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|side| side.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown side '{s}', expected common, client or server"))
    }
}

bitflags! {
    /// A set of sides, e.g. everything a physical process has to run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Sides: u8 {
        const COMMON = 1 << 0;
        const CLIENT = 1 << 1;
        const SERVER = 1 << 2;

        /// A game client: shared logic plus client logic.
        const CLIENT_RUNTIME = Self::COMMON.bits() | Self::CLIENT.bits();
        /// A dedicated server: shared logic plus server logic.
        const SERVER_RUNTIME = Self::COMMON.bits() | Self::SERVER.bits();
        const ALL = Self::COMMON.bits() | Self::CLIENT.bits() | Self::SERVER.bits();
    }
}

impl Sides {
    /// Iterates the contained sides in `Common`, `Client`, `Server` order.
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |side| self.contains(Self::from(*side)))
    }
}

impl From<Side> for Sides {
    fn from(side: Side) -> Self {
        match side {
            Side::Common => Self::COMMON,
            Side::Client => Self::CLIENT,
            Side::Server => Self::SERVER,
        }
    }
}

impl FromIterator<Side> for Sides {
    fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, side| acc | Self::from(side))
    }
}

impl Default for Sides {
    fn default() -> Self {
        Self::CLIENT_RUNTIME
    }
}

impl Serialize for Sides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for side in self.sides() {
            seq.serialize_element(&side)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SidesVisitor;

        impl<'de> Visitor<'de> for SidesVisitor {
            type Value = Sides;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of sides")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Sides, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut sides = Sides::empty();
                while let Some(side) = seq.next_element::<Side>()? {
                    sides |= Sides::from(side);
                }
                Ok(sides)
            }
        }

        deserializer.deserialize_seq(SidesVisitor)
    }
}
