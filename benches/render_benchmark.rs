use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shortreel::SceneRenderer;

fn bench_render_scene(c: &mut Criterion) {
    let renderer = SceneRenderer::new(1080, 1920);

    c.bench_function("render_scene_1080x1920", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| renderer.render(black_box(0), &mut rng));
    });
}

criterion_group!(benches, bench_render_scene);
criterion_main!(benches);
