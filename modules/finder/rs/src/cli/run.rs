use eyre::{ensure, Context, Result};
use itertools::Itertools;
use log::{debug, info};

use ssrseek_core_rs::loc::{Region, RegionSpec, Strand};
use ssrseek_core_rs::motif::{Molecule, Motif};
use ssrseek_core_rs::parallelism;
use ssrseek_io_rs::{fasta, motifs, table};

use crate::{Finder, ScanConfig, ScanRequest};

use super::Cli;

fn collect_motifs(cli: &Cli, molecule: Molecule) -> Result<Vec<Motif>> {
    let mut raw = cli.motifs.clone();
    for path in &cli.motif_files {
        raw.extend(motifs::read(path)?);
    }
    ensure!(
        !raw.is_empty(),
        "Must specify at least one --motif or path to a --motif-file"
    );

    // De-duplicate case-insensitively before dispatch; validation happens
    // up front so a bad motif aborts before any scanning starts
    raw.iter()
        .map(|motif| motif.to_ascii_uppercase())
        .unique()
        .map(|motif| {
            if cli.pattern_ready {
                Ok(Motif::pattern(&motif))
            } else {
                Ok(Motif::new(&motif, molecule)?)
            }
        })
        .collect()
}

fn resolve_regions(cli: &Cli) -> Result<Vec<Region>> {
    // This open builds a missing index once, before any worker needs it
    let reader = fasta::open(&cli.fasta)?;

    let specs: Vec<RegionSpec> = if cli.regions.is_empty() {
        reader.ids().iter().map(|id| RegionSpec::whole(id.as_str())).collect()
    } else {
        cli.regions
            .iter()
            .map(|region| region.parse())
            .collect::<Result<_>>()?
    };

    specs
        .iter()
        .map(|spec| spec.resolve(reader.length(spec.contig())?))
        .collect()
}

pub fn run(cli: Cli) -> Result<()> {
    env_logger::Builder::new()
        .parse_filters(&cli.loglevel)
        .init();

    ensure!(cli.min_motifs >= 1, "--min-motifs must be at least 1");

    let molecule = Molecule::try_from(cli.molecule.as_str())?;
    let strands: &[Strand] = match cli.strand.as_str() {
        "+" => &[Strand::Forward],
        "-" => &[Strand::Reverse],
        _ => &[Strand::Forward, Strand::Reverse],
    };

    let motifs = collect_motifs(&cli, molecule)?;
    let regions = resolve_regions(&cli)?;
    let threads = parallelism::workers(cli.threads)?;

    info!(
        "\n{} v{}\n\nOptions\n=======\n\
         FASTA: {}\n\
         Motifs to search: [{}]\n\
         Strands to search: [{}]\n\
         Max distance between motifs: {}\n\
         Min number of motifs in SSR: {}\n\
         Output files: {prefix}.bed {prefix}_full.bed\n\
         Regions: [{}]\n\
         Motifs are ready-made patterns: {}\n\
         Allow overlapping motifs: {}\n\
         Molecule: {}\n\
         Threads: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        cli.fasta.display(),
        motifs.iter().join(", "),
        strands.iter().join(", "),
        cli.max_gap,
        cli.min_motifs,
        regions.iter().join(", "),
        cli.pattern_ready,
        cli.overlaps,
        molecule,
        threads,
        prefix = cli.output_prefix,
    );

    let mut finder = Finder::new(&cli.fasta, threads)?;
    finder.set_config(ScanConfig::new(molecule, cli.overlaps, cli.pattern_ready));

    for region in &regions {
        for motif in &motifs {
            for strand in strands {
                let request = ScanRequest::new(
                    motif.clone(),
                    region.contig().clone(),
                    *region.start(),
                    *region.end(),
                    *strand,
                    cli.max_gap,
                    cli.min_motifs,
                );
                debug!("Queued {}", request);
                finder.add_request(request);
            }
        }
    }

    let findings = finder.run()?;

    // Tables are only created once the whole scan has succeeded, so a
    // failed run leaves no partial output behind
    let (mut summary, mut full, (summary_path, full_path)) =
        table::from_prefix(&cli.output_prefix)?;

    let mut total = 0;
    for unit in &findings {
        for site in unit.sites() {
            let region = site.region();
            let row = table::SiteRow::new(
                region.contig(),
                *region.start(),
                *region.end(),
                region.motif().as_str(),
                region.strand().symbol(),
                *region.motifs(),
                *region.inserts(),
                *region.insert_len(),
                site.sequence(),
            );
            summary.write_row(&row)?;
            full.write_row(&row)?;
        }
        total += unit.total();
    }

    summary
        .finish()
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    full.finish()
        .with_context(|| format!("Failed to write {}", full_path.display()))?;

    info!("{} total sites found", total);
    Ok(())
}
