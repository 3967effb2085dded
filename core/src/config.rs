//! Search configuration (component H): the knobs that parameterize a DFS
//! or MTDFS walk, plus the small `FromStr`/`Display` value types the CLI
//! parses them from.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Which [`crate::cache::Cache`] backend a walk should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheImpl {
    #[default]
    Dense,
    Std,
    Trie,
}

impl FromStr for CacheImpl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(Self::Dense),
            "std" => Ok(Self::Std),
            "trie" => Ok(Self::Trie),
            other => Err(Error::UnknownCacheBackend(other.to_owned())),
        }
    }
}

impl fmt::Display for CacheImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dense => "dense",
            Self::Std => "std",
            Self::Trie => "trie",
        };
        f.write_str(s)
    }
}

/// A [`Duration`] parsed from a human-readable suffixed string:
/// `"<float>[unit]"` with unit in `us`, `ms`, `s`, `m`, `h`, `d`; a missing
/// unit defaults to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HumanDuration(pub Duration);

const UNITS: &[(&str, u64)] = &[
    ("us", 1),
    ("ms", 1_000),
    ("s", 1_000_000),
    ("m", 60_000_000),
    ("h", 3_600_000_000),
    ("d", 86_400_000_000),
];

impl FromStr for HumanDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unit_start = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(unit_start);
        let value: f64 = digits
            .parse()
            .map_err(|_| Error::InvalidDuration(s.to_owned()))?;
        let unit = if unit.is_empty() { "s" } else { unit };
        let micros_per_unit = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, micros)| *micros)
            .ok_or_else(|| Error::InvalidDuration(s.to_owned()))?;
        Ok(Self(Duration::from_micros(
            (value * micros_per_unit as f64) as u64,
        )))
    }
}

/// Always renders in seconds, the canonical unit for serialized output.
impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.as_secs_f64())
    }
}

/// Parameters for one DFS or MTDFS walk.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum ply depth to explore, or `None` for unlimited.
    pub max_depth: Option<u64>,
    /// Maximum number of successors to explore per node; `0` means
    /// unlimited. See [`crate::dfs::select_successors`] for the exact
    /// sampling policy this combines with `randomize` to produce.
    pub max_width: usize,
    /// Whether successor order/selection is randomized.
    pub randomize: bool,
    /// Wall-clock budget for the whole walk, or `None` for unlimited.
    pub timeout: Option<HumanDuration>,
    /// Whether a transposition cache is consulted at all. When `false`,
    /// the walk neither detects nor counts loops.
    pub cache_enabled: bool,
    /// Which transposition cache backend to use, when `cache_enabled`.
    pub cache_impl: CacheImpl,
    /// Number of worker threads for [`crate::mtdfs`]; ignored by
    /// single-threaded [`crate::dfs`].
    pub num_workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_width: 0,
            randomize: false,
            timeout: None,
            cache_enabled: false,
            cache_impl: CacheImpl::default(),
            num_workers: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_impl_roundtrip() {
        for s in ["dense", "std", "trie"] {
            let parsed: CacheImpl = s.parse().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn cache_impl_rejects_unknown() {
        assert!("bogus".parse::<CacheImpl>().is_err());
    }

    #[test]
    fn human_duration_parses_units() {
        assert_eq!(
            "500ms".parse::<HumanDuration>().unwrap().0,
            Duration::from_millis(500)
        );
        assert_eq!(
            "30s".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(30)
        );
        assert_eq!(
            "5m".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(300)
        );
        assert_eq!(
            "2h".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(7200)
        );
        assert_eq!(
            "90".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(90)
        );
        assert_eq!(
            "250us".parse::<HumanDuration>().unwrap().0,
            Duration::from_micros(250)
        );
        assert_eq!(
            "1d".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn human_duration_rejects_unknown_unit() {
        assert!("10x".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn human_duration_displays_in_seconds() {
        assert_eq!(HumanDuration(Duration::from_secs(7200)).to_string(), "7200s");
        assert_eq!(HumanDuration(Duration::from_millis(1500)).to_string(), "1.5s");
    }
}
