//! Finds the heaviest keys of a skewed stream without storing the stream.
use countmin::{suggest_depth, suggest_width, CountMinSketch};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let width = suggest_width(0.001).unwrap();
    let depth = suggest_depth(0.99).unwrap();
    let sketch: CountMinSketch<String> = CountMinSketch::new(width, depth).unwrap();
    println!("sketch: {} buckets x {} rows", width, depth);

    // page p is requested roughly 1/p as often as page 1
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100_000 {
        let page = (1.0 / rng.gen_range(0.001f64..1.0)) as u32;
        sketch.insert(&format!("/page/{}", page));
    }

    let candidates: Vec<String> = (1..=200).map(|p| format!("/page/{}", p)).collect();
    println!("Top pages:");
    for (page, estimate) in sketch.top_k(5, &candidates) {
        println!("  {:<12} -> {}", page, estimate);
    }
}
