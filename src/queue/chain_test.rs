//! Tests for queue chains and k-way merge.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::queue::{merge, PartialBlock, Queue, QueueChain, QueueContext, Settings};
    use crate::support::{queue_of, random_words, values};

    #[test]
    fn test_merge_two_ascending() {
        let mut chain = QueueChain::new();
        chain.push(queue_of(&["a", "c", "e"]));
        chain.push(queue_of(&["b", "d"]));
        assert_eq!(chain.total_size(), 5);

        assert_eq!(chain.merge(false), 5);
        let first = chain.first().unwrap();
        assert_eq!(values(first.queue()), ["a", "b", "c", "d", "e"]);
        assert_eq!(first.size(), 5);
        assert!(first.queue().is_consistent());

        let second = chain.get(1).unwrap();
        assert!(second.queue().is_empty());
        assert_eq!(second.size(), 0);
        assert_eq!(chain.total_size(), 5);
    }

    #[test]
    fn test_merge_descending() {
        let mut chain = QueueChain::new();
        chain.push(queue_of(&["z", "m", "a"]));
        chain.push(queue_of(&["y", "b"]));
        chain.push(queue_of(&["n"]));
        assert_eq!(chain.merge(true), 6);
        assert_eq!(
            values(chain.first().unwrap().queue()),
            ["z", "y", "n", "m", "b", "a"]
        );
    }

    #[test]
    fn test_merge_with_duplicates_across_queues() {
        let mut contexts = vec![
            QueueContext::new(0, queue_of(&["j", "k", "k"])),
            QueueContext::new(1, queue_of(&["k", "l"])),
        ];
        assert_eq!(contexts[0].size(), 3);

        assert_eq!(merge(&mut contexts, false), 5);
        assert_eq!(values(contexts[0].queue()), ["j", "k", "k", "k", "l"]);
        assert_eq!(contexts[0].size(), 5);
        assert_eq!(contexts[1].size(), 0);
        assert!(contexts[1].queue().is_empty());
    }

    #[test]
    fn test_merge_with_empty_queues() {
        let mut chain = QueueChain::new();
        chain.push_new().unwrap();
        chain.push(queue_of(&["a", "b"]));
        chain.push_new().unwrap();
        chain.push(queue_of(&["c"]));
        assert_eq!(chain.merge(false), 3);
        assert_eq!(values(chain.first().unwrap().queue()), ["a", "b", "c"]);
        for ctx in chain.iter().skip(1) {
            assert!(ctx.queue().is_empty());
            assert!(ctx.queue().is_consistent());
        }
    }

    #[test]
    fn test_merge_empty_and_single_chain() {
        let mut chain = QueueChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.merge(false), 0);

        chain.push(queue_of(&["b", "a"]));
        // A lone queue is left as is.
        assert_eq!(chain.merge(false), 2);
        assert_eq!(values(chain.first().unwrap().queue()), ["b", "a"]);

        let mut none: Vec<QueueContext> = Vec::new();
        assert_eq!(merge(&mut none, true), 0);
    }

    #[test]
    fn test_merge_conserves_size_and_sorts() {
        let mut rng = StdRng::seed_from_u64(17);
        for descending in [false, true] {
            let mut chain = QueueChain::new();
            let mut all = Vec::new();
            for _ in 0..6 {
                let n = rng.gen_range(0..40);
                let words = random_words(&mut rng, n);
                let mut q = Queue::try_from_iter(&words).unwrap();
                q.sort(descending);
                all.extend(words);
                chain.push(q);
            }
            let total = chain.total_size();
            assert_eq!(total, all.len());
            assert_eq!(chain.merge(descending), total);

            all.sort();
            if descending {
                all.reverse();
            }
            let first = chain.first().unwrap();
            assert_eq!(values(first.queue()), all);
            assert!(first.queue().is_consistent());
        }
    }

    #[test]
    fn test_chain_ids_and_settings() {
        let settings = Settings {
            partial_block: PartialBlock::Reverse,
        };
        let mut chain = QueueChain::with_settings(settings);
        let a = chain.push_new().unwrap().id();
        let b = chain.push_new().unwrap().id();
        assert_eq!((a, b), (0, 1));
        assert_eq!(chain.len(), 2);

        let ctx = chain.get_mut(b).unwrap();
        assert_eq!(ctx.queue().settings(), settings);
        ctx.queue_mut().insert_tail("x").unwrap();
        assert_eq!(ctx.size(), 1);
        assert!(chain.get(7).is_none());
    }

    #[test]
    fn test_total_size_follows_queue_mut() {
        let mut chain = QueueChain::new();
        let a = chain.push(queue_of(&["a", "b"])).id();
        let b = chain.push_new().unwrap().id();
        assert_eq!(chain.total_size(), 2);

        {
            let mut q = chain.get_mut(b).unwrap().queue_mut();
            q.insert_tail("c").unwrap();
            q.insert_tail("d").unwrap();
        }
        chain.get_mut(a).unwrap().queue_mut().remove_head();
        assert_eq!(chain.total_size(), 3);
        assert_eq!(chain.get(b).unwrap().size(), 2);

        assert_eq!(chain.merge(false), 3);
        assert_eq!(chain.total_size(), 3);
    }
}
