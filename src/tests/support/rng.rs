// Scripted random source for deterministic shuffle tests.

use crate::random::RandomSource;

/// Replays a fixed list of draws and records every bound it was asked for.
/// Panics when the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    draws: Vec<usize>,
    next: usize,
    bounds: Vec<usize>,
}

impl ScriptedRng {
    pub fn new(draws: Vec<usize>) -> Self {
        ScriptedRng {
            draws,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }
}

impl RandomSource for ScriptedRng {
    fn below(&mut self, bound: usize) -> usize {
        self.bounds.push(bound);
        let v = self.draws[self.next];
        self.next += 1;
        assert!(v < bound, "scripted draw {} out of range {}", v, bound);
        v
    }
}
