use ssrseek_core_rs::loc::Strand;
use ssrseek_core_rs::motif::Motif;

use super::result::RepeatRegion;
use super::workload::ScanRequest;

/// Merges an ordered stream of motif hits into repeat regions. A hit within
/// `max_gap` of the current region extends it; anything further away
/// finalizes the region (emitted only with at least `min_motifs`
/// occurrences) and seeds a new one. Single forward pass, no backtracking.
pub struct Stitcher {
    contig: String,
    strand: Strand,
    motif: Motif,
    max_gap: u64,
    min_motifs: usize,
    current: Option<RepeatRegion>,
    emitted: Vec<RepeatRegion>,
}

impl Stitcher {
    pub fn new(
        contig: String,
        strand: Strand,
        motif: Motif,
        max_gap: u64,
        min_motifs: usize,
    ) -> Self {
        Self {
            contig,
            strand,
            motif,
            max_gap,
            min_motifs,
            current: None,
            emitted: Vec::new(),
        }
    }

    pub fn for_request(request: &ScanRequest) -> Self {
        Self::new(
            request.contig().clone(),
            *request.strand(),
            request.motif().clone(),
            *request.max_gap(),
            *request.min_motifs(),
        )
    }

    /// Feed the next hit, in absolute coordinates. Hits must arrive in
    /// ascending start order.
    pub fn push(&mut self, start: u64, end: u64) {
        match self.current.as_mut() {
            // The gap is signed: overlapped matching can step backwards
            Some(region) if start as i64 - *region.end() as i64 <= self.max_gap as i64 => {
                region.absorb(start, end);
            }
            _ => {
                self.flush();
                self.current = Some(RepeatRegion::seeded(
                    self.contig.clone(),
                    self.strand,
                    self.motif.clone(),
                    start,
                    end,
                ));
            }
        }
    }

    /// Finalize the trailing region and return every qualifying one, in
    /// ascending start order.
    pub fn finish(mut self) -> Vec<RepeatRegion> {
        self.flush();
        self.emitted
    }

    fn flush(&mut self) {
        if let Some(region) = self.current.take() {
            if *region.motifs() >= self.min_motifs {
                self.emitted.push(region);
            }
        }
    }
}
