//! Field-level validation rules shared by the wizard and the auth forms.

use std::collections::BTreeMap;

/// Field key -> user-facing message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Present after trimming whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Exactly ten ASCII digits, nothing else.
pub fn is_ten_digits(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parses as a finite number once surrounding whitespace is removed.
pub fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Accumulates errors for one validation pass.
#[derive(Debug, Default)]
pub struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: &'static str) -> &mut Self {
        if !is_present(value) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn require_some<T>(&mut self, field: &'static str, value: &Option<T>, message: &'static str) -> &mut Self {
        if value.is_none() {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn ten_digits(&mut self, field: &'static str, value: &str, message: &'static str) -> &mut Self {
        if !is_ten_digits(value) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn numeric(&mut self, field: &'static str, value: &str, message: &'static str) -> &mut Self {
        if !is_numeric(value) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digits() {
        assert!(is_ten_digits("9876543210"));
        assert!(!is_ten_digits("987654321"));
        assert!(!is_ten_digits("98765432100"));
        assert!(!is_ten_digits("98765 4321"));
        assert!(!is_ten_digits("+919876543"));
        assert!(!is_ten_digits("९८७६५४३२१०"));
    }

    #[test]
    fn test_numeric() {
        assert!(is_numeric("120"));
        assert!(is_numeric(" 99.5 "));
        assert!(is_numeric("-3"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12 sq ft"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("inf"));
    }

    #[test]
    fn test_checker_collects_each_field_once() {
        let mut checker = Checker::new();
        checker
            .require("name", "  ", "Name is required.")
            .ten_digits("phone", "123", "Phone must be a 10-digit number.")
            .numeric("rent", "5000", "Rent must be a number.");
        let errors = checker.finish();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["name"], "Name is required.");
        assert!(!errors.contains_key("rent"));
    }
}
