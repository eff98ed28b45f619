// Common test utilities.

use rand::Rng;

use crate::queue::Queue;

/// Builds a queue holding `items` in order.
pub fn queue_of(items: &[&str]) -> Queue {
    Queue::try_from_iter(items).expect("queue allocation")
}

/// Snapshot of the payloads, head to tail.
pub fn values(q: &Queue) -> Vec<String> {
    q.iter().map(str::to_owned).collect()
}

/// Zero-padded decimal labels `000`, `001`, ...
pub fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{:03}", i)).collect()
}

/// Short lowercase words; the small alphabet makes duplicates likely.
pub fn random_words<R: Rng>(rng: &mut R, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            let len = rng.gen_range(0..4);
            (0..len).map(|_| rng.gen_range(b'a'..=b'd') as char).collect()
        })
        .collect()
}
