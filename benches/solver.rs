//! Benchmarks for the region packer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilefit::geometry::all_variants;
use tilefit::parser::parse_input;
use tilefit::{Catalogue, Packer, Region, Shape};

const SHAPES: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###
";

fn sample_catalogue() -> Catalogue {
    Catalogue::new(parse_input(SHAPES).unwrap().shapes)
}

/// Benchmark generating the orientations of an asymmetric shape.
fn bench_variants(c: &mut Criterion) {
    let shape = Shape::from_rows(0, &[".##", "##.", ".#."]).unwrap();

    c.bench_function("all_variants", |b| b.iter(|| all_variants(black_box(&shape))));
}

/// Benchmark a packable region from the sample input.
fn bench_packable_region(c: &mut Criterion) {
    let catalogue = sample_catalogue();
    let region = Region::new(12, 5, vec![1, 0, 1, 0, 2, 2]);
    let packer = Packer::new(&catalogue);

    c.bench_function("packable_12x5", |b| b.iter(|| packer.fits(black_box(&region))));
}

/// Benchmark a region rejected by the area pre-check.
fn bench_area_rejection(c: &mut Criterion) {
    let catalogue = sample_catalogue();
    let region = Region::new(10, 10, vec![3, 3, 3, 3, 3, 3]);
    let packer = Packer::new(&catalogue);

    c.bench_function("area_rejected_10x10", |b| {
        b.iter(|| packer.fits(black_box(&region)))
    });
}

/// Benchmark exhausting a small region that cannot be tiled.
fn bench_exhausted_region(c: &mut Criterion) {
    let catalogue = Catalogue::new([Shape::from_rows(0, &["#.", "##"]).unwrap()]);
    let region = Region::new(3, 3, vec![3]);
    let packer = Packer::new(&catalogue);

    c.bench_function("exhausted_3x3", |b| b.iter(|| packer.fits(black_box(&region))));
}

criterion_group!(
    benches,
    bench_variants,
    bench_packable_region,
    bench_area_rejection,
    bench_exhausted_region
);
criterion_main!(benches);
