use super::{Config, Logs, QueueBox, ReverseK, Shuffle};
use crate::queue::PartialBlock;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        queue: QueueBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("warn".to_string()),
            }),
            reverse_k: Some(ReverseK {
                partial_block: Some(PartialBlock::Reverse),
            }),
            shuffle: Some(Shuffle { seed: Some(0x5eed) }),
        },
    }
}
