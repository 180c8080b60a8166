use rand::Rng;

/// Uppercase letters and digits without the look-alikes 0, O, 1 and I.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const CODE_LENGTH: usize = 6;

/// Source of alphabet positions. Swapped for a scripted source in tests.
pub trait SymbolSource: Send {
    /// Returns a position in `0..len`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform draws from the thread-local generator.
#[derive(Debug, Default)]
pub struct RandomSymbols;

impl SymbolSource for RandomSymbols {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

pub fn draw_code(source: &mut dyn SymbolSource) -> String {
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = source.pick(CODE_ALPHABET.len()) % CODE_ALPHABET.len();
            CODE_ALPHABET[idx] as char
        })
        .collect()
}
