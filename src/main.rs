//! Region Packing Solver
//!
//! Reads a catalogue of shape diagrams and a list of rectangular regions, and
//! reports how many regions can hold their required pieces without overlap.
//! Pieces may be rotated and mirrored.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn, Level};

use tilefit::grid::{format_packing, format_variant};
use tilefit::parser::read_input;
use tilefit::{
    count_packable, count_packable_parallel, Catalogue, Packer, ParseError, Region, SearchOptions,
};

/// Checks which regions can be packed with their required shapes.
#[derive(Parser)]
#[command(name = "tilefit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input file with shape diagrams followed by region lines.
    #[arg(short, long, default_value = "input.txt", global = true)]
    input: PathBuf,

    /// Disable ordering of interchangeable pieces (slower, same verdicts).
    #[arg(long, global = true)]
    no_pruning: bool,

    /// Evaluate regions on all cores.
    #[arg(long, global = true)]
    parallel: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print the number of packable regions.
    Count,
    /// Print every region's verdict and a packing for the packable ones.
    Show,
    /// Print the distinct orientations of every shape.
    Variants,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn run(cli: &Cli) -> Result<(), ParseError> {
    let options = SearchOptions {
        ordering_pruning: !cli.no_pruning,
    };
    let (catalogue, regions) = load(&cli.input)?;

    match cli.command.as_ref().unwrap_or(&Command::Count) {
        Command::Count => {
            let start = Instant::now();
            let packable = if cli.parallel {
                count_packable_parallel(&catalogue, &regions, options)
            } else {
                count_packable(&catalogue, &regions, options)
            };
            info!(elapsed = ?start.elapsed(), regions = regions.len(), "search finished");
            println!("{packable}");
        }
        Command::Show => print!("{}", render_regions(&catalogue, &regions, options)),
        Command::Variants => print!("{}", render_variants(&catalogue)),
    }

    Ok(())
}

/// Parses the input file and builds the variant cache, logging both timings.
fn load(path: &Path) -> Result<(Catalogue, Vec<Region>), ParseError> {
    let start = Instant::now();
    let input = read_input(path)?;
    info!(
        elapsed = ?start.elapsed(),
        shapes = input.shapes.len(),
        regions = input.regions.len(),
        "parsed {}",
        path.display()
    );

    let start = Instant::now();
    let catalogue = Catalogue::new(input.shapes);
    info!(elapsed = ?start.elapsed(), "generated shape variants");
    if catalogue.is_empty() {
        warn!("no shapes defined, only regions that require nothing are packable");
    }

    Ok((catalogue, input.regions))
}

/// Formats each region's verdict, followed by its packing when one exists.
fn render_regions(catalogue: &Catalogue, regions: &[Region], options: SearchOptions) -> String {
    let packer = Packer::with_options(catalogue, options);
    let mut output = String::new();
    let mut packable = 0;

    for (i, region) in regions.iter().enumerate() {
        let header = format!("Region {} ({}x{})", i + 1, region.width, region.height);
        match packer.find_packing(region) {
            Some(packing) => {
                packable += 1;
                output.push_str(&format!("{header}: packable\n"));
                output.push_str(&format_packing(&packing));
            }
            None => output.push_str(&format!("{header}: not packable\n")),
        }
        output.push('\n');
    }

    output.push_str(&format!("{packable} of {} regions packable\n", regions.len()));
    output
}

/// Formats every shape's orientations, in generation order.
fn render_variants(catalogue: &Catalogue) -> String {
    let mut output = String::new();
    for shape in catalogue.shapes() {
        let variants = catalogue.variants(shape.index);
        output.push_str(&format!(
            "Shape {} ({} cells, {} variants)\n",
            shape.index,
            shape.cell_count,
            variants.len()
        ));
        for variant in variants {
            output.push_str(&format_variant(variant));
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilefit::Shape;

    #[test]
    fn test_variants_snapshot() {
        let catalogue = Catalogue::new([
            Shape::from_rows(0, &["#.", "##"]).unwrap(),
            Shape::from_rows(2, &["##", "##"]).unwrap(),
        ]);

        insta::assert_snapshot!(render_variants(&catalogue), @r"
        Shape 0 (3 cells, 4 variants)
        #.
        ##

        ##
        #.

        ##
        .#

        .#
        ##

        Shape 2 (4 cells, 1 variants)
        ##
        ##
        ");
    }

    #[test]
    fn test_regions_snapshot() {
        let catalogue = Catalogue::new([Shape::from_rows(0, &["##", "##"]).unwrap()]);
        let regions = [Region::new(4, 4, vec![4]), Region::new(4, 3, vec![4])];

        insta::assert_snapshot!(render_regions(&catalogue, &regions, SearchOptions::default()), @r"
        Region 1 (4x4): packable
        AABB
        AABB
        CCDD
        CCDD

        Region 2 (4x3): not packable

        1 of 2 regions packable
        ");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tilefit"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.input, PathBuf::from("input.txt"));
        assert!(!cli.no_pruning && !cli.parallel);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tilefit", "show", "-i", "regions.txt", "--no-pruning", "-vv"]);
        assert!(matches!(cli.command, Some(Command::Show)));
        assert_eq!(cli.input, PathBuf::from("regions.txt"));
        assert!(cli.no_pruning);
        assert_eq!(cli.verbose, 2);
    }
}
