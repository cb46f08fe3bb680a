//! The Converter Set: byte-range-to-typed-value destinations. `Destination`
//! is the single trait every sink implements; `scan`/`scan_with_callouts`
//! take a slice of `&mut dyn Destination` and bind one capture group to
//! each, left to right, the way spec.md §4.5 describes positional binding.

use crate::config::{BoolWords, IntBase};
use crate::error::ConversionError;
use std::str::FromStr;

/// Something a captured byte range can be converted into and stored.
pub trait Destination {
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError>;
}

/// Captures the matched bytes verbatim, no parsing.
pub struct BytesDest(pub Vec<u8>);

impl BytesDest {
    pub fn new() -> Self {
        BytesDest(Vec::new())
    }
}

impl Default for BytesDest {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for BytesDest {
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError> {
        self.0.clear();
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

fn to_str(bytes: &[u8]) -> Result<&str, ConversionError> {
    std::str::from_utf8(bytes).map_err(|_| ConversionError::invalid("utf-8"))
}

/// Parsing support for one integer type, honoring `IntBase`. Signed and
/// unsigned types diverge only on what a leading `-` means: a signed type
/// negates the magnitude, an unsigned type rejects anything but `-0`.
trait ParseInt: Sized {
    fn from_digits(text: &str, radix: u32) -> Result<Self, ConversionError>;
    fn apply_sign(self, negative: bool) -> Result<Self, ConversionError>;
}

macro_rules! impl_parse_int_digits {
    ($t:ty) => {
        fn from_digits(text: &str, radix: u32) -> Result<Self, ConversionError> {
            <$t>::from_str_radix(text, radix).map_err(|e| match e.kind() {
                std::num::IntErrorKind::Empty => ConversionError::empty(),
                std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                    ConversionError::overflow()
                }
                _ => ConversionError::invalid("integer"),
            })
        }
    };
}

macro_rules! impl_parse_int_signed {
    ($($t:ty),+) => {
        $(
            impl ParseInt for $t {
                impl_parse_int_digits!($t);

                fn apply_sign(self, negative: bool) -> Result<Self, ConversionError> {
                    if negative {
                        self.checked_neg().ok_or_else(ConversionError::overflow)
                    } else {
                        Ok(self)
                    }
                }
            }
        )+
    };
}

macro_rules! impl_parse_int_unsigned {
    ($($t:ty),+) => {
        $(
            impl ParseInt for $t {
                impl_parse_int_digits!($t);

                fn apply_sign(self, negative: bool) -> Result<Self, ConversionError> {
                    if negative && self != 0 {
                        Err(ConversionError::invalid("negative value for an unsigned destination"))
                    } else {
                        Ok(self)
                    }
                }
            }
        )+
    };
}

impl_parse_int_signed!(i8, i16, i32, i64, i128, isize);
impl_parse_int_unsigned!(u8, u16, u32, u64, u128, usize);

/// Splits an optional sign from a digit run and, in `IntBase::Auto` mode,
/// sniffs a `0x`/`0o`/`0b` prefix the way C's `%i` conversion does.
fn split_sign_and_base(text: &str, base: IntBase) -> (&str, &str, u32) {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    if matches!(base, IntBase::Auto) {
        for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
            if let Some(digits) = rest.strip_prefix(prefix) {
                return (sign, digits, radix);
            }
        }
    }
    (sign, rest, 10)
}

/// An integer destination for one of Rust's fixed-width integer types.
pub struct IntDest<T> {
    pub value: T,
    base: IntBase,
}

impl<T: Default> IntDest<T> {
    pub fn new(base: IntBase) -> Self {
        IntDest {
            value: T::default(),
            base,
        }
    }
}

impl<T> Destination for IntDest<T>
where
    T: ParseInt + Copy,
{
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError> {
        let text = to_str(bytes)?;
        let (sign, digits, radix) = split_sign_and_base(text, self.base);
        if digits.is_empty() {
            return Err(ConversionError::empty());
        }
        let magnitude = T::from_digits(digits, radix)?;
        self.value = magnitude.apply_sign(sign == "-")?;
        Ok(())
    }
}

/// A floating-point destination. NaN/Inf parsing is simply
/// `core::str::FromStr`'s native grammar, which already accepts
/// case-insensitive `nan`/`inf`/`infinity` with an optional sign.
pub struct FloatDest<T> {
    pub value: T,
}

impl<T: Default> FloatDest<T> {
    pub fn new() -> Self {
        FloatDest { value: T::default() }
    }
}

impl<T: Default> Default for FloatDest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Destination for FloatDest<T>
where
    T: FromStr,
{
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError> {
        let text = to_str(bytes)?;
        if text.is_empty() {
            return Err(ConversionError::empty());
        }
        self.value = text.parse().map_err(|_| ConversionError::invalid("float"))?;
        Ok(())
    }
}

/// A boolean destination: `0`/`1`, or `true`/`false` per `BoolWords`.
pub struct BoolDest {
    pub value: bool,
    words: BoolWords,
}

impl BoolDest {
    pub fn new(words: BoolWords) -> Self {
        BoolDest { value: false, words }
    }
}

impl Destination for BoolDest {
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError> {
        let text = to_str(bytes)?;
        let normalized = if self.words.case_sensitive {
            text.to_string()
        } else {
            text.to_ascii_lowercase()
        };
        self.value = match normalized.as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => return Err(ConversionError::invalid("boolean")),
        };
        Ok(())
    }
}

/// A destination that hands the matched bytes to a closure, which returns
/// whether the capture was acceptable. Matches spec.md §9's "first class
/// function value" guidance for arbitrary sink behavior.
pub struct SinkDest<'a> {
    callback: &'a mut dyn FnMut(&[u8]) -> bool,
}

impl<'a> SinkDest<'a> {
    pub fn new(callback: &'a mut dyn FnMut(&[u8]) -> bool) -> Self {
        SinkDest { callback }
    }
}

impl<'a> Destination for SinkDest<'a> {
    fn convert(&mut self, bytes: &[u8]) -> Result<(), ConversionError> {
        if (self.callback)(bytes) {
            Ok(())
        } else {
            Err(ConversionError::invalid("sink-rejected value"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_dest_copies_verbatim() {
        let mut dest = BytesDest::new();
        dest.convert(b"hello").unwrap();
        assert_eq!(dest.0, b"hello");
    }

    #[test]
    fn int_dest_parses_decimal_by_default_auto_base() {
        let mut dest: IntDest<i32> = IntDest::new(IntBase::Auto);
        dest.convert(b"-42").unwrap();
        assert_eq!(dest.value, -42);
    }

    #[test]
    fn int_dest_auto_sniffs_hex_prefix() {
        let mut dest: IntDest<u32> = IntDest::new(IntBase::Auto);
        dest.convert(b"0x2A").unwrap();
        assert_eq!(dest.value, 42);
    }

    #[test]
    fn int_dest_decimal_mode_ignores_prefix_sniffing() {
        let mut dest: IntDest<u32> = IntDest::new(IntBase::Decimal);
        let result = dest.convert(b"0x2A");
        assert!(result.is_err());
    }

    #[test]
    fn int_dest_reports_overflow() {
        let mut dest: IntDest<i8> = IntDest::new(IntBase::Decimal);
        let result = dest.convert(b"1000");
        assert_eq!(result, Err(ConversionError::overflow()));
    }

    #[test]
    fn int_dest_reports_empty_digit_run() {
        let mut dest: IntDest<i32> = IntDest::new(IntBase::Decimal);
        let result = dest.convert(b"");
        assert_eq!(result, Err(ConversionError::empty()));
    }

    #[test]
    fn float_dest_parses_nan_and_infinity_case_insensitively() {
        let mut dest: FloatDest<f64> = FloatDest::new();
        dest.convert(b"NaN").unwrap();
        assert!(dest.value.is_nan());
        dest.convert(b"-inf").unwrap();
        assert_eq!(dest.value, f64::NEG_INFINITY);
        dest.convert(b"Infinity").unwrap();
        assert_eq!(dest.value, f64::INFINITY);
    }

    #[test]
    fn bool_dest_accepts_digits_and_words_case_insensitively() {
        let mut dest = BoolDest::new(BoolWords { case_sensitive: false });
        dest.convert(b"1").unwrap();
        assert!(dest.value);
        dest.convert(b"FALSE").unwrap();
        assert!(!dest.value);
    }

    #[test]
    fn bool_dest_case_sensitive_rejects_mismatched_case() {
        let mut dest = BoolDest::new(BoolWords { case_sensitive: true });
        let result = dest.convert(b"True");
        assert!(result.is_err());
    }

    #[test]
    fn sink_dest_forwards_bytes_and_honors_rejection() {
        let mut seen = Vec::new();
        let mut callback = |bytes: &[u8]| {
            seen.extend_from_slice(bytes);
            bytes != b"reject"
        };
        let mut dest = SinkDest::new(&mut callback);
        dest.convert(b"ok").unwrap();
        assert!(dest.convert(b"reject").is_err());
        assert_eq!(seen, b"okreject");
    }
}
