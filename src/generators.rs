use rand::Rng;

use crate::errors::GenerationError;

/// A named, fixed set of characters that can be toggled on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    /// Order in which enabled classes are concatenated into an alphabet.
    pub const CANONICAL_ORDER: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Symbols,
        CharacterClass::Digits,
    ];

    pub const fn chars(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Digits => "1234567890",
            CharacterClass::Symbols => "!@#$%^&*()_+",
        }
    }
}

/// Source of uniformly distributed indices.
///
/// Implementations must return a value in `0..bound`. `bound` is never zero.
pub trait IndexSource {
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Concatenates the literals of every enabled class in canonical order.
///
/// Duplicates in `enabled` are ignored and the input order does not matter.
pub fn build_alphabet(enabled: &[CharacterClass]) -> String {
    CharacterClass::CANONICAL_ORDER
        .iter()
        .filter(|class| enabled.contains(class))
        .map(|class| class.chars())
        .collect()
}

/// Samples `length` characters uniformly from `alphabet`.
///
/// A zero length always succeeds with an empty string, even for an empty alphabet.
pub fn generate<S>(alphabet: &str, length: usize, source: &mut S) -> Result<String, GenerationError>
where
    S: IndexSource + ?Sized,
{
    if length == 0 {
        return Ok(String::new());
    }

    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(GenerationError::EmptyAlphabet { length });
    }

    log::debug!("sampling {} characters from an alphabet of {}", length, chars.len());

    let password = (0..length)
        .map(|_| chars[source.next_index(chars.len())])
        .collect();

    Ok(password)
}
