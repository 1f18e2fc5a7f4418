//! Scene building and eye-pass benchmarks.
#![allow(missing_docs, unused_results)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;
use stereomol::camera::StereoCamera;
use stereomol::elements::ElementTable;
use stereomol::engine::ViewState;
use stereomol::molecule::{Atom, BondOrder, Molecule};
use stereomol::options::Options;
use stereomol::scene::{DetailLevel, SceneBuilder, SceneParams};

/// Carbon chain zig-zagging along X with alternating single/double bonds.
fn chain(atoms: usize) -> Molecule {
    let mut builder = Molecule::builder("chain", "bench");
    for i in 0..atoms {
        let y = if i % 2 == 0 { 0.0 } else { 0.8 };
        builder.add_atom(Atom::new(DVec3::new(i as f64 * 1.25, y, 0.0), "C"));
    }
    for i in 1..atoms {
        let order = if i % 2 == 0 { BondOrder::Double } else { BondOrder::Single };
        let _ = builder.add_bond(i - 1, i, order);
    }
    builder.build()
}

fn scene_build_benchmark(c: &mut Criterion) {
    let elements = ElementTable::standard();
    let options = Options::default();
    let mut group = c.benchmark_group("scene_build");

    for count in [10, 100, 1000, 5000] {
        let molecule = chain(count);
        let builder = SceneBuilder::new(&molecule, &elements, &options);
        for detail in [DetailLevel::Compact, DetailLevel::Standard, DetailLevel::Wire] {
            let params = SceneParams {
                detail,
                ..SceneParams::default()
            };
            group.bench_function(format!("{}_{count}_atoms", detail.name()), |b| {
                b.iter(|| black_box(builder.build(black_box(params))))
            });
        }
    }
    group.finish();
}

fn eye_pass_benchmark(c: &mut Criterion) {
    let camera = StereoCamera::default();
    let mut view = ViewState::default();
    view.set_anaglyph(true);
    c.bench_function("anaglyph_eye_passes", |b| {
        b.iter(|| black_box(camera.eye_passes(&view, black_box(DVec3::ONE))))
    });
}

criterion_group!(benches, scene_build_benchmark, eye_pass_benchmark);
criterion_main!(benches);
