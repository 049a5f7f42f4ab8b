use criterion::{criterion_group, criterion_main, Criterion};
use orient_core::math::{AffineTransform, EulerAngles, Quaternion, RotationMatrix, Vec3};
use std::hint::black_box;

fn bench_conversions(c: &mut Criterion) {
    let angles = EulerAngles::new(0.7, -0.3, 1.9);

    let mut group = c.benchmark_group("Conversions");

    group.bench_function("Euler -> Quaternion -> Euler", |b| {
        b.iter(|| {
            let q = Quaternion::from_object_to_inertial_euler(black_box(&angles));
            black_box(EulerAngles::from_object_to_inertial_quat(&q))
        });
    });

    group.bench_function("Euler -> RotationMatrix", |b| {
        b.iter(|| black_box(RotationMatrix::from_euler(black_box(&angles))));
    });

    group.bench_function("Canonize (gimbal lock)", |b| {
        let raw = EulerAngles::new(7.0, 1.5707, -4.0);
        b.iter(|| black_box(black_box(raw).canonized()));
    });

    group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
    let q0 = Quaternion::from_object_to_inertial_euler(&EulerAngles::new(0.1, 0.2, 0.3));
    let q1 = Quaternion::from_object_to_inertial_euler(&EulerAngles::new(2.0, -0.8, 1.1));

    let mut group = c.benchmark_group("Interpolation");

    group.bench_function("Slerp 100 steps", |b| {
        b.iter(|| {
            for i in 0..100 {
                let t = i as f32 / 99.0;
                black_box(Quaternion::slerp(black_box(q0), black_box(q1), t));
            }
        });
    });

    group.bench_function("Pow", |b| {
        b.iter(|| black_box(black_box(q1).pow(0.25)));
    });

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let m = AffineTransform::local_to_parent(
        Vec3::new(10.0, -2.0, 4.5),
        &EulerAngles::new(0.4, 0.9, -0.6),
    );

    let mut group = c.benchmark_group("AffineTransform");

    group.bench_function("Inverse", |b| {
        b.iter(|| black_box(black_box(m).inverse()));
    });

    group.bench_function("Compose", |b| {
        b.iter(|| black_box(black_box(m) * black_box(m)));
    });

    group.bench_function("Transform 1000 points", |b| {
        b.iter(|| {
            let mut p = Vec3::ONE;
            for _ in 0..1000 {
                p *= m;
            }
            black_box(p)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_conversions, bench_interpolation, bench_transforms);
criterion_main!(benches);
