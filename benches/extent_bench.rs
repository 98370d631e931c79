use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;

use _rust::affine::Affine;
use _rust::error::ExtentError;
use _rust::extent::{boundary_extent, projected_extent, ExtentSolver};
use _rust::proj::pipeline::Pipeline;
use _rust::search::{GridSearch, SearchConfig, SearchWindow};
use _rust::transform::PointTransform;

fn bench_grid_search(c: &mut Criterion) {
    let window = SearchWindow::region(-10.0, 10.0, -10.0, 10.0).unwrap();
    let bowl = |xs: &Array2<f64>, ys: &Array2<f64>| {
        Ok::<_, ExtentError>(ndarray::Zip::from(xs).and(ys).map_collect(|&x, &y| {
            (x - 1.234).powi(2) + (y + 5.678).powi(2)
        }))
    };

    for &n in &[11, 33, 77] {
        let search = GridSearch::new(SearchConfig::default().with_samples(n, n)).unwrap();
        c.bench_function(&format!("grid_search_bowl_{n}x{n}"), |b| {
            b.iter(|| black_box(search.minimize(window, &bowl).unwrap()));
        });
    }
}

fn bench_extent_affine(c: &mut Criterion) {
    let rot = std::f64::consts::FRAC_PI_6;
    let aff = Affine::new(rot.cos(), -rot.sin(), 100.0, rot.sin(), rot.cos(), -50.0);
    let solver = ExtentSolver::new(SearchConfig::default()).unwrap();

    c.bench_function("extent_affine_rotated", |b| {
        b.iter(|| black_box(solver.solve(&aff, (0.0, 10.0, 0.0, 5.0)).unwrap()));
    });
}

fn bench_extent_web_mercator(c: &mut Criterion) {
    let region = (-30.0, 40.0, -60.0, 70.0);

    c.bench_function("extent_4326_to_3857", |b| {
        b.iter(|| {
            black_box(projected_extent("EPSG:4326", region, "EPSG:3857", (77, 77)).unwrap())
        });
    });

    let pipeline = Pipeline::new("EPSG:4326", "EPSG:3857").unwrap();
    let sequential = ExtentSolver::new(SearchConfig::default()).unwrap().sequential();
    c.bench_function("extent_4326_to_3857_sequential", |b| {
        b.iter(|| black_box(sequential.solve(&pipeline, region).unwrap()));
    });
}

fn bench_extent_thread_scaling(c: &mut Criterion) {
    let pipeline = Pipeline::new("EPSG:4326", "EPSG:4087").unwrap();
    let solver = ExtentSolver::new(SearchConfig::default()).unwrap();

    for &threads in &[1, 2, 4] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();

        c.bench_function(&format!("extent_threads_{threads}_4087"), |b| {
            b.iter(|| {
                black_box(pool.install(|| solver.solve(&pipeline, (-170.0, 170.0, -80.0, 80.0))))
                    .unwrap()
            });
        });
    }
}

fn bench_boundary_extent(c: &mut Criterion) {
    let pipeline = Pipeline::new("EPSG:4326", "EPSG:3857").unwrap();

    for &pts in &[21, 101] {
        c.bench_function(&format!("boundary_extent_3857_{pts}"), |b| {
            b.iter(|| {
                black_box(boundary_extent(&pipeline, (-30.0, 40.0, -60.0, 70.0), pts).unwrap())
            });
        });
    }
}

fn bench_projection_throughput(c: &mut Criterion) {
    let n = 1_000_000_usize;
    let pipe_wm = Pipeline::new("EPSG:4326", "EPSG:3857").unwrap();
    let mut coords: Vec<(f64, f64)> = vec![(0.0, 0.0); n];

    c.bench_function("proj_webmerc_1M", |b| {
        b.iter(|| {
            for (i, c) in coords.iter_mut().enumerate() {
                *c = (
                    -170.0 + (i as f64 / n as f64) * 340.0,
                    -80.0 + (i as f64 / n as f64) * 160.0,
                );
            }
            pipe_wm.transform_batch(&mut coords).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_grid_search,
    bench_extent_affine,
    bench_extent_web_mercator,
    bench_extent_thread_scaling,
    bench_boundary_extent,
    bench_projection_throughput
);
criterion_main!(benches);
