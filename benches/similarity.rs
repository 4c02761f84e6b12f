use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use semejanza::pipeline::ItemSimilarity;
use semejanza::ratings::RatingRecord;

/// Deterministic synthetic rating matrix: `n_users` users rating around
/// `ratings_per_user` of `n_items` items.
fn generate_ratings(n_users: u64, n_items: u64, ratings_per_user: u64) -> Vec<RatingRecord> {
    let mut ratings = Vec::with_capacity((n_users * ratings_per_user) as usize);
    for user in 0..n_users {
        for k in 0..ratings_per_user {
            let item = (user * 31 + k * 17) % n_items;
            let rating = ((user * 13 + item * 7) % 5 + 1) as f64;
            ratings.push(RatingRecord::new(user, item, rating));
        }
    }
    // The pipeline assumes one rating per (user, item); the strides above
    // can collide for small n_items, so dedupe.
    ratings.sort_by_key(|r| (r.user, r.item));
    ratings.dedup_by_key(|r| (r.user, r.item));
    ratings
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_fit");

    for n_users in [100u64, 1_000, 5_000] {
        let ratings = generate_ratings(n_users, 500, 20);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_users),
            &ratings,
            |b, ratings| {
                b.iter(|| {
                    let mut model = ItemSimilarity::new()
                        .with_min_raters(2)
                        .with_min_intersection(2)
                        .with_prior(10.0, 0.0);
                    model.fit(black_box(ratings)).expect("valid config");
                    model
                });
            },
        );
    }

    group.finish();
}

fn bench_fit_capped(c: &mut Criterion) {
    // The per-user cap bounds the quadratic pair expansion.
    let ratings = generate_ratings(1_000, 200, 60);

    let mut group = c.benchmark_group("similarity_fit_capped");
    for cap in [20usize, 40, 60] {
        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, &cap| {
            b.iter(|| {
                let mut model = ItemSimilarity::new()
                    .with_min_intersection(2)
                    .with_max_ratings_per_user(cap);
                model.fit(black_box(&ratings)).expect("valid config");
                model
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fit, bench_fit_capped);
criterion_main!(benches);
