//! Basic correctness scenario on a two-slot cache

use anyhow::{bail, Result};
use lrupool::LruCache;
use tracing::debug;

/// One scripted cache call
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Update(&'static str, &'static str),
    /// Resolve and compare; `None` means the key must miss
    Resolve(&'static str, Option<&'static str>),
}

/// Capacity the scenario is written for
pub const CAPACITY: usize = 2;

pub const SCENARIO: &[Step] = &[
    Step::Update("abc", "ABC"),
    Step::Update("def", "DEF"),
    Step::Resolve("abc", Some("ABC")),
    Step::Resolve("def", Some("DEF")),
    Step::Update("abc", "ABC!"),
    Step::Resolve("def", Some("DEF")),
    Step::Resolve("abc", Some("ABC!")),
    // "def" is least recently used
    Step::Update("qwe", "QWE"),
    Step::Resolve("abc", Some("ABC!")),
    Step::Resolve("qwe", Some("QWE")),
    Step::Resolve("def", None),
    // now "abc"
    Step::Update("iop", "IOP"),
    Step::Resolve("qwe", Some("QWE")),
    Step::Resolve("iop", Some("IOP")),
    Step::Resolve("abc", None),
];

/// Run [`SCENARIO`] on a fresh cache
pub fn run() -> Result<()> {
    let mut cache = LruCache::new(CAPACITY)?;
    run_steps(&mut cache, SCENARIO)
}

pub fn run_steps(cache: &mut LruCache<String, String>, steps: &[Step]) -> Result<()> {
    for (n, step) in steps.iter().enumerate() {
        debug!(step = n + 1, ?step, "smoke");
        match *step {
            Step::Update(key, value) => {
                cache.update(key.to_string(), value.to_string());
            }
            Step::Resolve(key, expected) => {
                let got = cache.resolve(key).map(String::as_str);
                if got != expected {
                    bail!(
                        "step {}: resolve({:?}) returned {:?}, expected {:?}",
                        n + 1,
                        key,
                        got,
                        expected
                    );
                }
            }
        }
    }

    Ok(())
}
