use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use ssrseek_core_rs::loc::Strand;
use ssrseek_core_rs::motif::Motif;

use super::workload::ScanRequest;

/// Statistics of one stitched repeat region, in absolute genomic
/// coordinates. Built hit by hit inside a single stitcher pass; immutable
/// once emitted.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct RepeatRegion {
    contig: String,
    strand: Strand,
    motif: Motif,
    start: u64,
    end: u64,
    /// Motif occurrences absorbed into the region.
    motifs: usize,
    /// Strictly positive gaps between consecutive occurrences.
    inserts: usize,
    /// Total length of those gaps.
    insert_len: u64,
}

impl RepeatRegion {
    /// A fresh region seeded with its first hit. The seed contributes no
    /// insert, whatever precedes it.
    pub(crate) fn seeded(
        contig: String,
        strand: Strand,
        motif: Motif,
        start: u64,
        end: u64,
    ) -> Self {
        Self {
            contig,
            strand,
            motif,
            start,
            end,
            motifs: 1,
            inserts: 0,
            insert_len: 0,
        }
    }

    /// Absorb the next hit. The gap may be negative under overlapped
    /// matching; it still folds into `end` (`end += gap + len`) but only
    /// strictly positive gaps count as inserts.
    pub(crate) fn absorb(&mut self, start: u64, end: u64) {
        let gap = start as i64 - self.end as i64;
        let len = (end - start) as i64;
        self.end = (self.end as i64 + gap + len) as u64;
        self.motifs += 1;
        if gap > 0 {
            self.inserts += 1;
            self.insert_len += gap as u64;
        }
    }

    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A qualifying repeat region paired with its genomic sequence, already
/// oriented to the requested strand.
#[derive(Clone, PartialEq, Eq, Debug, Constructor, Dissolve, Getters)]
pub struct Site {
    region: RepeatRegion,
    sequence: String,
}

/// Everything one scan unit produced: the request it answers, its sites in
/// ascending genomic order, and the site count.
#[derive(Clone, PartialEq, Eq, Debug, Constructor, Dissolve, Getters)]
pub struct Findings {
    request: ScanRequest,
    sites: Vec<Site>,
    total: usize,
}

#[cfg(test)]
mod tests {
    use ssrseek_core_rs::motif::Molecule;

    use super::*;

    fn region() -> RepeatRegion {
        RepeatRegion::seeded(
            "chr1".into(),
            Strand::Forward,
            Motif::new("AT", Molecule::Dna).unwrap(),
            10,
            12,
        )
    }

    #[test]
    fn test_seeded() {
        let region = region();
        assert_eq!((region.start, region.end), (10, 12));
        assert_eq!((region.motifs, region.inserts, region.insert_len), (1, 0, 0));
        assert_eq!(region.len(), 2);
    }

    #[test]
    fn test_absorb_adjacent_and_gapped() {
        let mut region = region();

        // Adjacent hit: no insert
        region.absorb(12, 14);
        assert_eq!(region.end, 14);
        assert_eq!((region.motifs, region.inserts, region.insert_len), (2, 0, 0));

        // Gapped hit: one insert of length 3
        region.absorb(17, 19);
        assert_eq!(region.end, 19);
        assert_eq!((region.motifs, region.inserts, region.insert_len), (3, 1, 3));
    }

    #[test]
    fn test_absorb_overlapping_hit() {
        let mut region = region();

        // Negative gap folds into `end` without counting as an insert
        region.absorb(11, 13);
        assert_eq!(region.end, 13);
        assert_eq!((region.motifs, region.inserts, region.insert_len), (2, 0, 0));
    }
}
