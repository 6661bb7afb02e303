//! Counts a stream on several threads, one sketch per shard, then merges the
//! shards into a single sketch without replaying the stream.
use countmin::CountMinSketch;
use std::thread;

const SHARDS: u64 = 4;

fn main() {
    let shards: Vec<CountMinSketch<u64>> = (0..SHARDS)
        .map(|shard| {
            thread::spawn(move || {
                let sketch = CountMinSketch::new(4096, 5).unwrap();
                (0..100_000u64)
                    .filter(|id| id % SHARDS == shard)
                    .for_each(|id| sketch.insert(&(id % 128)));
                sketch
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let aggregate = CountMinSketch::<u64>::new(4096, 5).unwrap();
    for shard in shards.iter() {
        aggregate.merge(shard).unwrap();
    }
    println!("estimate for tenant 7: {}", aggregate.count(&7));

    // shapes must match
    let other = CountMinSketch::<u64>::new(2048, 5).unwrap();
    match aggregate.merge(&other) {
        Ok(()) => println!("unexpected merge"),
        Err(e) => println!("rejected: {}", e),
    }

    // ownership can be handed over without copying counters
    let mut aggregate = aggregate;
    let moved = aggregate.take();
    println!(
        "moved estimate for tenant 7: {}, source empty: {}",
        moved.count(&7),
        aggregate.is_empty()
    );
}
