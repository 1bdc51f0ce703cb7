//! Per-step extraction outcome.

/// Outcome of extracting one field (or one row of a field) from a page.
///
/// Extractors never fail a page. Each step reports whether its value was
/// found, structurally missing, or present but unparseable, so callers and
/// tests can tell the three apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The value was found and parsed.
    Present(T),
    /// An expected anchor or element does not exist on the page.
    Absent(String),
    /// The element exists but its content could not be interpreted.
    Malformed(String),
}

impl<T> Field<T> {
    pub fn absent(reason: impl Into<String>) -> Self {
        Field::Absent(reason.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Field::Malformed(reason.into())
    }

    /// The value, if present.
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Reason the value is missing, if it is.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Field::Present(_) => None,
            Field::Absent(reason) | Field::Malformed(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Present(value) => Field::Present(f(value)),
            Field::Absent(reason) => Field::Absent(reason),
            Field::Malformed(reason) => Field::Malformed(reason),
        }
    }
}

impl<T: Default> Field<T> {
    /// Degrade a missing value to its empty default, logging why.
    pub fn or_empty(self, field: &str, url: &str) -> T {
        match self {
            Field::Present(value) => value,
            Field::Absent(reason) => {
                log::debug!("{} absent on {}: {}", field, url, reason);
                T::default()
            }
            Field::Malformed(reason) => {
                log::debug!("{} malformed on {}: {}", field, url, reason);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_empty_degrades_missing_values() {
        let absent: Field<Vec<u8>> = Field::absent("no anchor");
        assert_eq!(absent.or_empty("enemies", "u"), Vec::<u8>::new());

        let present = Field::Present(vec![1u8]);
        assert_eq!(present.or_empty("enemies", "u"), vec![1]);
    }

    #[test]
    fn reason_distinguishes_outcomes() {
        let malformed: Field<i64> = Field::malformed("not a number");
        assert_eq!(malformed.reason(), Some("not a number"));
        assert!(Field::Present(1).reason().is_none());
        assert_eq!(Field::Present(2).map(|n| n * 2).present(), Some(4));
    }
}
