use crate::{
    Error, FactoryConfig, Identifier, IdentifierQueue, PrefetchFactory, REFILL_BATCH,
    SeedRegistry, SeededSource, new_seeded_factory,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::scope;

fn stream(seed: i64, n: usize) -> Vec<Identifier> {
    let mut source = SeededSource::new(seed);
    (0..n).map(|_| source.next_identifier()).collect()
}

fn factory(seed: i64, queue_min: usize, queue_max: usize) -> PrefetchFactory {
    PrefetchFactory::new(Arc::new(SeedRegistry::new()), seed, queue_min, queue_max).unwrap()
}

#[test]
fn queue_is_fifo() {
    let ids = stream(1, 3);
    let mut queue = IdentifierQueue::new();
    queue.extend(ids.iter().copied());
    queue.push_front(ids[2]);
    assert_eq!(queue.len(), 4);
    assert_eq!(queue.dequeue(), Some(ids[2]));
    assert_eq!(queue.dequeue(), Some(ids[0]));
    assert_eq!(queue.dequeue(), Some(ids[1]));
    assert_eq!(queue.dequeue(), Some(ids[2]));
    assert_eq!(queue.dequeue(), None);
    assert!(queue.is_empty());
}

#[test]
fn construction_prefills_to_queue_max() {
    let registry = Arc::new(SeedRegistry::new());
    let factory = PrefetchFactory::new(Arc::clone(&registry), 42, 2, 5).unwrap();
    assert_eq!(factory.len().unwrap(), 5);
    assert_eq!(factory.seed(), 42);
    assert_eq!((factory.queue_min(), factory.queue_max()), (2, 5));
    assert!(registry.contains(42).unwrap());
}

#[test]
fn third_dequeue_crosses_low_water_and_refills() {
    let factory = factory(42, 2, 5);
    let expected = stream(42, 8);

    assert_eq!(factory.dequeue().unwrap(), expected[0]);
    assert_eq!(factory.len().unwrap(), 4);
    assert_eq!(factory.dequeue().unwrap(), expected[1]);
    assert_eq!(factory.len().unwrap(), 3);

    // Leaves 2 (== queue_min) behind, so it tops up to 5 before returning.
    assert_eq!(factory.dequeue().unwrap(), expected[2]);
    assert_eq!(factory.len().unwrap(), 5);

    // Refilled identifiers continue the stream in order.
    assert_eq!(factory.dequeue_n(5).unwrap(), expected[3..8]);
}

#[test]
fn length_never_stays_at_or_below_queue_min() {
    let factory = factory(3, 4, 10);
    for _ in 0..200 {
        factory.dequeue().unwrap();
        let len = factory.len().unwrap();
        assert!(len > factory.queue_min(), "len {len} left at or below low water");
        assert!(len <= factory.queue_max());
    }
}

#[test]
fn equal_watermarks_refill_after_every_dequeue() {
    let factory = factory(9, 3, 3);
    for _ in 0..10 {
        factory.dequeue().unwrap();
        assert_eq!(factory.len().unwrap(), 3);
    }
}

#[test]
fn dequeue_n_matches_sequential_dequeues() {
    let batched = factory(77, 3, 7).dequeue_n(50).unwrap();
    let single = factory(77, 3, 7);
    let sequential: Vec<_> = (0..50).map(|_| single.dequeue().unwrap()).collect();
    assert_eq!(batched.len(), 50);
    assert_eq!(batched, sequential);
    assert_eq!(batched, stream(77, 50));
}

#[test]
fn dequeue_n_zero_is_empty() {
    let factory = factory(1, 1, 2);
    assert!(factory.dequeue_n(0).unwrap().is_empty());
    assert_eq!(factory.len().unwrap(), 2);
}

#[test]
fn inverted_watermarks_are_rejected_without_deriving() {
    let registry = Arc::new(SeedRegistry::new());
    let err = PrefetchFactory::new(Arc::clone(&registry), 1, 6, 5).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidWatermarks {
            queue_min: 6,
            queue_max: 5
        }
    );
    assert!(registry.is_empty().unwrap());
}

#[test]
fn zero_capacity_factory_reports_exhaustion() {
    let factory = factory(1, 0, 0);
    assert!(factory.is_empty().unwrap());
    assert_eq!(factory.dequeue().unwrap_err(), Error::QueueExhausted);
    assert_eq!(factory.dequeue_n(1).unwrap_err(), Error::QueueExhausted);
}

#[test]
fn oversized_dequeue_n_reports_exhaustion() {
    let factory = factory(1, 0, 0);
    assert_eq!(factory.dequeue_n(usize::MAX).unwrap_err(), Error::QueueExhausted);

    let id = stream(1, 1)[0];
    factory.enqueue(id).unwrap();
    assert_eq!(factory.dequeue_n(usize::MAX).unwrap_err(), Error::QueueExhausted);
    assert_eq!(factory.dequeue_n(1).unwrap(), [id]);
}

#[test]
fn refill_larger_than_a_batch_continues_the_stream() {
    let queue_max = REFILL_BATCH * 2 + 5;
    let registry = Arc::new(SeedRegistry::new());
    let factory = PrefetchFactory::new(Arc::clone(&registry), 6, 0, queue_max).unwrap();
    assert_eq!(factory.len().unwrap(), queue_max);

    let expected = stream(6, queue_max * 2);
    assert_eq!(factory.dequeue_n(queue_max * 2).unwrap(), expected);
    // The registry lock is free between batches and after the refill.
    assert_eq!(registry.derive(6).unwrap(), stream(6, queue_max * 3 + 1)[queue_max * 3]);
}

#[test]
fn failed_dequeue_n_returns_nothing_and_keeps_the_queue() {
    let factory = factory(1, 0, 0);
    let ids = stream(99, 2);
    factory.enqueue(ids[0]).unwrap();
    factory.enqueue(ids[1]).unwrap();

    assert_eq!(factory.dequeue_n(3).unwrap_err(), Error::QueueExhausted);
    assert_eq!(factory.len().unwrap(), 2);
    assert_eq!(factory.dequeue_n(2).unwrap(), ids);
}

#[test]
fn enqueue_hands_back_at_the_tail() {
    let factory = factory(5, 1, 3);
    let returned = factory.dequeue().unwrap();
    factory.enqueue(returned).unwrap();
    let drained = factory.dequeue_n(3).unwrap();
    assert_eq!(drained[2], returned);
}

#[test]
fn factories_sharing_a_seed_interleave_the_stream() {
    let registry = Arc::new(SeedRegistry::new());
    let a = PrefetchFactory::new(Arc::clone(&registry), 21, 1, 4).unwrap();
    let b = PrefetchFactory::new(Arc::clone(&registry), 21, 1, 4).unwrap();

    let expected = stream(21, 8);
    assert_eq!(a.dequeue_n(2).unwrap(), expected[0..2]);
    assert_eq!(b.dequeue_n(2).unwrap(), expected[4..6]);
}

#[test]
fn concurrent_consumers_of_one_factory_get_distinct_ids() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 300;
    let factory = factory(8, 16, 64);

    let ids: Vec<Identifier> = scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|| factory.dequeue_n(PER_THREAD).unwrap()))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    let expected: HashSet<_> = stream(8, THREADS * PER_THREAD).into_iter().collect();
    assert!(ids.iter().all(|id| expected.contains(id)));
}

#[test]
fn config_defaults_and_validation() {
    let config = FactoryConfig::default();
    assert_eq!(config.queue_min, FactoryConfig::DEFAULT_QUEUE_MIN);
    assert_eq!(config.queue_max, FactoryConfig::DEFAULT_QUEUE_MAX);
    assert!(config.validate().is_ok());
    assert!(FactoryConfig::new(4, 4).is_ok());
    assert!(matches!(
        FactoryConfig::new(5, 4),
        Err(Error::InvalidWatermarks { .. })
    ));

    let factory =
        PrefetchFactory::with_config(Arc::new(SeedRegistry::new()), 2, config).unwrap();
    assert_eq!(factory.len().unwrap(), config.queue_max);
    assert_eq!(factory.config(), config);
}

#[cfg(feature = "serde")]
#[test]
fn config_deserializes_with_defaults() {
    let config: FactoryConfig = serde_json::from_str(r#"{"queue_min": 3}"#).unwrap();
    assert_eq!(config.queue_min, 3);
    assert_eq!(config.queue_max, FactoryConfig::DEFAULT_QUEUE_MAX);
}

#[test]
fn global_factory_draws_from_the_global_registry() {
    // A seed no other test uses, since the global registry is shared.
    const SEED: i64 = -0x5eed;
    let factory = new_seeded_factory(SEED, 1, 3).unwrap();
    assert!(crate::registry().unwrap().contains(SEED).unwrap());
    assert_eq!(factory.dequeue().unwrap(), stream(SEED, 1)[0]);
    assert!(crate::delete_seed(SEED).unwrap());
    assert!(!crate::delete_seed(SEED).unwrap());
}
