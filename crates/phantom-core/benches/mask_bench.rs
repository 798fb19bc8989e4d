// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — ROI Mask Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use phantom_core::mask::generate_mask;
use phantom_core::phantom::Phantom;
use phantom_types::config::RoiScales;
use phantom_types::logging::{init_logging, LogConfig};
use phantom_types::state::{CylinderAxis, CylinderRoi, GridSpec, PlacementRequest};
use std::hint::black_box;

fn bench_single_mask(c: &mut Criterion) {
    init_logging(&LogConfig::quiet()).expect("quiet logging config is valid");
    let mut group = c.benchmark_group("cylinder_mask");

    for &(n, nz) in &[(64, 16), (128, 32), (256, 32)] {
        let grid = GridSpec::new([n, n, nz], [0.9375, 0.9375, 2.5]).expect("valid grid");
        let roi = CylinderRoi::new(grid.center(), 23.8, 3.375, CylinderAxis::Z).expect("valid ROI");
        let label = format!("{}x{}x{}", n, n, nz);
        group.bench_function(&label, |b| {
            b.iter(|| {
                let mask = generate_mask(black_box(&roi), &grid).expect("mask should succeed");
                black_box(mask[[n / 2, n / 2, nz / 2]]);
            })
        });
    }

    group.finish();
}

fn bench_phantom_rois(c: &mut Criterion) {
    let labels: Vec<String> = (0..19).map(|i| format!("sample-{i}")).collect();
    let grid = GridSpec::new([256, 256, 24], [0.5, 0.5, 2.0]).expect("valid grid");
    let request = PlacementRequest::new(grid);

    c.bench_function("mk4_compute_rois_256x256x24", |b| {
        b.iter(|| {
            let mut phantom = Phantom::new("MP-Mk4", "bench", &labels, RoiScales::default())
                .expect("catalog design");
            phantom.compute_rois(black_box(&request)).expect("rois should succeed");
            black_box(phantom.centers().expect("computed").len());
        })
    });
}

criterion_group!(benches, bench_single_mask, bench_phantom_rois);
criterion_main!(benches);
