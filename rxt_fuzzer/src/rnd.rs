/**
 * Seeded randomness for the generators, and the alphabets of the pattern
 * grammar they draw characters from.
 */

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::time::SystemTime;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

/// Character pools, one per place in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// Stands for itself outside of a set.
    Literal,
    /// Stands for itself inside a set body, even though most are meta outside.
    SetBody,
    /// Range endpoints, ascending.
    RangeEndpoint,
    /// Everything the dialect treats specially, plus a few plain characters.
    Noise,
}

impl Alphabet {
    pub fn chars(self) -> &'static [char] {
        match self {
            Alphabet::Literal =>
                &['a', 'b', 'c', 'x', 'y', 'z', '0', '1', '9', ' ', '_', '=', '/', '#', '@'],
            Alphabet::SetBody =>
                &['a', 'k', 'z', '0', '5', '.', '*', '+', '?', '(', ')', '{', '}', '|', '$', ' '],
            Alphabet::RangeEndpoint =>
                &['0', '9', 'a', 'c', 'f', 'm', 'q', 'z'],
            Alphabet::Noise =>
                &['a', 'b', 'c', '0', '1', '9', '.', '[', ']', '(', ')', '|', '*', '+', '?',
                  '{', '}', '^', '$', '\\', ':', ',', '-', 'u', 't'],
        }
    }
}

thread_local! {
    static RNG: RefCell<Mcg128Xsl64> = RefCell::new(Mcg128Xsl64::seed_from_u64(0));
    static SEED: Cell<u64> = Cell::new(0);
}

pub fn seed_from_system_time() -> u64 {
    SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn current_seed() -> u64 {
    SEED.with(Cell::get)
}

/// Restarts the sequence, so a failing run can be replayed from its seed.
pub fn set_seed(seed: u64) {
    RNG.with(|rng| rng.replace(Mcg128Xsl64::seed_from_u64(seed)));
    SEED.with(|s| s.set(seed));
}

fn with_rng<T>(f: impl FnOnce(&mut Mcg128Xsl64) -> T) -> T {
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// A random value in `r`, which must not be empty.
pub fn rand_range(r: &Range<usize>) -> usize {
    with_rng(|rng| rng.gen_range(r.start, r.end))
}

/// True with a probability of `1 / n`.
pub fn one_in(n: u32) -> bool {
    with_rng(|rng| rng.gen_ratio(1, n))
}

pub fn sample<T>(s: &[T]) -> &T {
    assert!(!s.is_empty());
    &s[rand_range(&(0..s.len()))]
}

pub fn rand_char(alphabet: Alphabet) -> char {
    *sample(alphabet.chars())
}

/// Two distinct range endpoints, the lower one first.
pub fn rand_endpoints() -> (char, char) {
    let chars = Alphabet::RangeEndpoint.chars();
    let low = rand_range(&(0..(chars.len() - 1)));
    let high = rand_range(&((low + 1)..chars.len()));
    (chars[low], chars[high])
}

pub fn rand_string(len: &Range<usize>, chars: &[char]) -> String {
    (0..rand_range(len)).map(|_| *sample(chars)).collect()
}
