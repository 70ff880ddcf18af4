use std::fmt::Display;
use std::str::FromStr;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, eyre, Report, Result};

/// A user-supplied region of interest: either a whole contig or an explicit
/// `contig:start-end` window in 0-based, end-exclusive coordinates.
///
/// Contig names may themselves contain `:` (e.g. HLA haplotypes), so the
/// window part is split off at the last `:` and only kept when it parses as
/// a `start-end` pair.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct RegionSpec {
    contig: String,
    start: Option<u64>,
    end: Option<u64>,
}

impl RegionSpec {
    /// Whole-contig region.
    pub fn whole(contig: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            start: None,
            end: None,
        }
    }

    /// Fill unset bounds against the contig length and validate the window.
    pub fn resolve(&self, length: u64) -> Result<Region> {
        let start = self.start.unwrap_or(0);
        let end = self.end.unwrap_or(length);
        ensure!(
            start < end,
            "Empty or inverted region {}:{}-{}",
            self.contig,
            start,
            end
        );
        ensure!(
            end <= length,
            "Region {}:{}-{} ends past the contig ({} bp)",
            self.contig,
            start,
            end,
            length
        );
        Ok(Region::new(self.contig.clone(), start, end))
    }
}

impl FromStr for RegionSpec {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        ensure!(!s.is_empty(), "Empty region specification");

        if let Some((contig, window)) = s.rsplit_once(':') {
            if !contig.is_empty() {
                if let Some((start, end)) = window.split_once('-') {
                    if let (Ok(start), Ok(end)) = (start.parse(), end.parse()) {
                        return Ok(Self {
                            contig: contig.to_string(),
                            start: Some(start),
                            end: Some(end),
                        });
                    }
                }
            }
        }

        // No parseable window part => the whole string is a contig name
        if s.contains(|c: char| c.is_whitespace()) {
            return Err(eyre!("Whitespace in region specification: {:?}", s));
        }
        Ok(Self::whole(s))
    }
}

impl Display for RegionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{}:{}-{}", self.contig, start, end),
            _ => write!(f, "{}", self.contig),
        }
    }
}

/// A fully resolved half-open window `[start, end)` on a contig.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Constructor, Dissolve, Getters)]
pub struct Region {
    contig: String,
    start: u64,
    end: u64,
}

impl Region {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_contig() {
        for contig in ["chr1", "scaffold_12", "HLA-A*01:01"] {
            let spec: RegionSpec = contig.parse().unwrap();
            assert_eq!(spec, RegionSpec::whole(contig));
        }
    }

    #[test]
    fn test_parse_window() {
        let spec: RegionSpec = "chr2:100-250".parse().unwrap();
        assert_eq!(spec.contig(), "chr2");
        assert_eq!(spec.start(), &Some(100));
        assert_eq!(spec.end(), &Some(250));

        // Last-colon split keeps exotic contig names intact
        let spec: RegionSpec = "HLA:A:0-10".parse().unwrap();
        assert_eq!(spec.contig(), "HLA:A");
        assert_eq!(spec.start(), &Some(0));
        assert_eq!(spec.end(), &Some(10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<RegionSpec>().is_err());
        assert!("chr1 100 200".parse::<RegionSpec>().is_err());
    }

    #[test]
    fn test_resolve() {
        let spec: RegionSpec = "chr1".parse().unwrap();
        let region = spec.resolve(1000).unwrap();
        assert_eq!(region, Region::new("chr1".into(), 0, 1000));
        assert_eq!(region.len(), 1000);

        let spec: RegionSpec = "chr1:10-20".parse().unwrap();
        assert_eq!(spec.resolve(1000).unwrap(), Region::new("chr1".into(), 10, 20));

        // Out of bounds and empty windows are rejected, not clamped
        assert!(spec.resolve(15).is_err());
        assert!("chr1:5-5".parse::<RegionSpec>().unwrap().resolve(1000).is_err());
        assert!("chr1:20-10".parse::<RegionSpec>().unwrap().resolve(1000).is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for spec in ["chr1", "chr2:100-250"] {
            assert_eq!(spec.parse::<RegionSpec>().unwrap().to_string(), spec);
        }
    }
}
