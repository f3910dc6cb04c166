use std::fmt;
use std::ops::RangeInclusive;

use crate::errors::GenerationError;
use crate::generators::{CharacterClass, IndexSource, build_alphabet, generate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequest {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl PasswordRequest {
    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        let toggles = [
            (self.lowercase, CharacterClass::Lowercase),
            (self.uppercase, CharacterClass::Uppercase),
            (self.symbols, CharacterClass::Symbols),
            (self.numbers, CharacterClass::Digits),
        ];

        toggles
            .into_iter()
            .filter_map(|(enabled, class)| enabled.then_some(class))
            .collect()
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        let flag = match class {
            CharacterClass::Lowercase => &mut self.lowercase,
            CharacterClass::Uppercase => &mut self.uppercase,
            CharacterClass::Digits => &mut self.numbers,
            CharacterClass::Symbols => &mut self.symbols,
        };
        *flag = !*flag;
    }
}

impl Default for PasswordRequest {
    fn default() -> Self {
        Self {
            length: 8,
            lowercase: true,
            uppercase: false,
            numbers: false,
            symbols: false,
        }
    }
}

/// A generated password. Immutable once produced.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedPassword {
    value: String,
}

impl GeneratedPassword {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Display for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GeneratedPassword({} chars)", self.char_count())
    }
}

pub fn generate_password<S>(
    request: &PasswordRequest,
    source: &mut S,
) -> Result<GeneratedPassword, GenerationError>
where
    S: IndexSource + ?Sized,
{
    let alphabet = build_alphabet(&request.enabled_classes());
    let value = generate(&alphabet, request.length, source)?;

    Ok(GeneratedPassword { value })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    Generated(GeneratedPassword),
}

/// Form-level state kept by a front end: the current toggles and whatever
/// password is on display.
pub struct Session {
    defaults: PasswordRequest,
    request: PasswordRequest,
    bounds: RangeInclusive<usize>,
    state: State,
}

impl Session {
    pub fn new(defaults: PasswordRequest, bounds: RangeInclusive<usize>) -> Self {
        Self {
            defaults,
            request: defaults,
            bounds,
            state: State::Idle,
        }
    }

    pub fn request(&self) -> &PasswordRequest {
        &self.request
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn password(&self) -> Option<&GeneratedPassword> {
        match &self.state {
            State::Generated(password) => Some(password),
            State::Idle => None,
        }
    }

    pub fn set_length(&mut self, length: usize) -> Result<(), GenerationError> {
        self.check_length(length)?;
        self.request.length = length;
        Ok(())
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        self.request.toggle(class);
    }

    /// Generates with the current toggles. On failure the previous state is kept.
    pub fn submit<S>(&mut self, source: &mut S) -> Result<GeneratedPassword, GenerationError>
    where
        S: IndexSource + ?Sized,
    {
        self.check_length(self.request.length)?;
        let password = generate_password(&self.request, source)?;
        self.state = State::Generated(password.clone());

        Ok(password)
    }

    /// Drops the displayed password and restores the default toggles.
    pub fn reset(&mut self) {
        self.request = self.defaults;
        self.state = State::Idle;
    }

    fn check_length(&self, length: usize) -> Result<(), GenerationError> {
        if self.bounds.contains(&length) {
            Ok(())
        } else {
            Err(GenerationError::InvalidLength {
                length,
                min: *self.bounds.start(),
                max: *self.bounds.end(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn request(length: usize, lowercase: bool, uppercase: bool, numbers: bool, symbols: bool) -> PasswordRequest {
        PasswordRequest { length, lowercase, uppercase, numbers, symbols }
    }

    #[test]
    fn enabled_classes_follow_toggles() {
        let req = request(8, false, true, true, false);
        assert_eq!(
            req.enabled_classes(),
            vec![CharacterClass::Uppercase, CharacterClass::Digits]
        );

        assert!(request(8, false, false, false, false).enabled_classes().is_empty());
    }

    #[test]
    fn length_matches_request() {
        let mut rng = StdRng::seed_from_u64(3);
        for length in 1..=1000 {
            let password = generate_password(&request(length, true, true, true, true), &mut rng).unwrap();
            assert_eq!(password.char_count(), length);
        }
    }

    #[test]
    fn disabled_classes_never_appear() {
        let mut rng = StdRng::seed_from_u64(11);
        let password = generate_password(&request(500, false, true, true, false), &mut rng).unwrap();

        assert!(password.as_str().chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn seeded_requests_are_deterministic() {
        let req = request(16, true, true, true, true);
        let first = generate_password(&req, &mut StdRng::seed_from_u64(2024)).unwrap();
        let second = generate_password(&req, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn no_classes_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_password(&request(8, false, false, false, false), &mut rng).unwrap_err();
        assert_eq!(err, GenerationError::EmptyAlphabet { length: 8 });
    }

    #[test]
    fn debug_hides_value() {
        let mut rng = StdRng::seed_from_u64(5);
        let password = generate_password(&request(6, true, false, false, false), &mut rng).unwrap();
        assert_eq!(format!("{:?}", password), "GeneratedPassword(6 chars)");
    }

    #[test]
    fn session_starts_idle_and_generates() {
        let mut session = Session::new(PasswordRequest::default(), 4..=16);
        assert_eq!(session.state(), &State::Idle);

        let mut rng = StdRng::seed_from_u64(8);
        session.submit(&mut rng).unwrap();

        let password = session.password().unwrap();
        assert_eq!(password.char_count(), 8);
        assert!(password.as_str().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn session_rejects_out_of_range_length() {
        let mut session = Session::new(PasswordRequest::default(), 4..=16);

        assert_eq!(
            session.set_length(3),
            Err(GenerationError::InvalidLength { length: 3, min: 4, max: 16 })
        );
        assert!(session.set_length(17).is_err());
        assert_eq!(session.request().length, 8);

        session.set_length(16).unwrap();
        assert_eq!(session.request().length, 16);
    }

    #[test]
    fn failed_submit_keeps_previous_password() {
        let mut session = Session::new(PasswordRequest::default(), 4..=16);
        let mut rng = StdRng::seed_from_u64(13);

        let first = session.submit(&mut rng).unwrap();

        session.toggle(CharacterClass::Lowercase);
        assert!(session.submit(&mut rng).is_err());
        assert_eq!(session.password(), Some(&first));
    }

    #[test]
    fn failed_submit_from_idle_stays_idle() {
        let mut defaults = PasswordRequest::default();
        defaults.lowercase = false;
        let mut session = Session::new(defaults, 4..=16);

        let mut rng = StdRng::seed_from_u64(13);
        assert!(session.submit(&mut rng).is_err());
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = Session::new(PasswordRequest::default(), 4..=16);
        let mut rng = StdRng::seed_from_u64(21);

        session.toggle(CharacterClass::Symbols);
        session.set_length(12).unwrap();
        session.submit(&mut rng).unwrap();

        session.reset();

        assert_eq!(session.state(), &State::Idle);
        assert_eq!(session.request(), &PasswordRequest::default());
    }

    #[test]
    fn reset_leaks_no_state_into_next_generation() {
        let req = PasswordRequest::default();

        let mut session = Session::new(req, 4..=16);
        session.submit(&mut StdRng::seed_from_u64(77)).unwrap();
        session.reset();
        let after_reset = session.submit(&mut StdRng::seed_from_u64(77)).unwrap();

        let fresh = generate_password(&req, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(after_reset, fresh);
    }
}
