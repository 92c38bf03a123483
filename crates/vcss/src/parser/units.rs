//! Number and unit splitting for CSS words.
//!
//! A word such as `1.5rem` is split into the number `1.5` and the unit `rem`.
//! The grammar follows CSS numbers: an optional sign, digits with an optional
//! fraction (or a bare fraction like `.5`), and an optional exponent. An `e`
//! only starts an exponent when digits follow, so `2em` stays `2` + `em`.

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
};

/// A numeric word split into its magnitude and unit suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension<'a> {
    /// The number exactly as written, e.g. `.5` or `+1e2`.
    pub number: &'a str,
    pub value: f64,
    /// Everything after the number. Empty for unitless numbers.
    pub unit: &'a str,
}

impl Dimension<'_> {
    pub fn is_unit(&self, unit: &str) -> bool {
        self.unit == unit
    }
}

fn parse_exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

/// Recognizes a CSS number at the start of `input`.
pub fn parse_number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(parse_exponent),
    )))(input)
}

/// Splits `word` into a number and a unit.
///
/// Returns `None` when the word does not start with a number.
///
/// ```rust
/// use vcss::parser::units::unit;
///
/// let dim = unit("0.5rem").unwrap();
/// assert_eq!(dim.value, 0.5);
/// assert_eq!(dim.unit, "rem");
/// assert!(unit("auto").is_none());
/// ```
pub fn unit(word: &str) -> Option<Dimension<'_>> {
    let (rest, number) = parse_number(word).ok()?;
    let value = number.parse::<f64>().ok()?;
    Some(Dimension {
        number,
        value,
        unit: rest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_integer_and_unit() {
        let dim = unit("16px").unwrap();
        assert_eq!(dim.number, "16");
        assert_eq!(dim.value, 16.0);
        assert_eq!(dim.unit, "px");
    }

    #[test]
    fn em_is_not_an_exponent() {
        let dim = unit("2em").unwrap();
        assert_eq!(dim.value, 2.0);
        assert_eq!(dim.unit, "em");
    }

    #[test]
    fn exponent_with_unit() {
        let dim = unit("1e1rem").unwrap();
        assert_eq!(dim.number, "1e1");
        assert_eq!(dim.value, 10.0);
        assert_eq!(dim.unit, "rem");
    }

    #[test]
    fn signed_and_bare_fractions() {
        assert_eq!(unit("-0.25rem").unwrap().value, -0.25);
        assert_eq!(unit("+1rem").unwrap().value, 1.0);
        let dim = unit(".5rem").unwrap();
        assert_eq!(dim.value, 0.5);
        assert_eq!(dim.unit, "rem");
    }

    #[test]
    fn trailing_dot_belongs_to_unit() {
        let dim = unit("1.rem").unwrap();
        assert_eq!(dim.number, "1");
        assert_eq!(dim.unit, ".rem");
    }

    #[test]
    fn unitless_number() {
        let dim = unit("42").unwrap();
        assert_eq!(dim.unit, "");
    }

    #[test]
    fn words_without_numbers() {
        assert!(unit("rem").is_none());
        assert!(unit("-").is_none());
        assert!(unit("").is_none());
        assert!(unit("calc").is_none());
    }
}
