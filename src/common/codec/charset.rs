use std::borrow::Cow;

use encoding_rs::mem::{encode_latin1_lossy, str_latin1_up_to};

use crate::common::error::{QRError, QRResult};

// ISO-8859-1 payload conversion
//------------------------------------------------------------------------------

/// Converts text to the single-byte charset byte mode assumes when no ECI is present.
/// Fails on the first character outside U+0000..=U+00FF instead of substituting it.
pub fn to_latin1(text: &str) -> QRResult<Cow<'_, [u8]>> {
    let valid_up_to = str_latin1_up_to(text);
    if let Some(c) = text[valid_up_to..].chars().next() {
        return Err(QRError::InvalidChar(c));
    }
    Ok(encode_latin1_lossy(text))
}

#[cfg(test)]
mod charset_tests {
    use std::borrow::Cow;

    use super::to_latin1;
    use crate::common::error::QRError;

    #[test]
    fn test_ascii_is_borrowed() {
        let bytes = to_latin1("Hello, world!").unwrap();
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(&*bytes, b"Hello, world!");
    }

    #[test]
    fn test_latin1_supplement() {
        let bytes = to_latin1("café ÿ").unwrap();
        assert_eq!(&*bytes, b"caf\xe9 \xff");
    }

    #[test]
    fn test_empty() {
        assert!(to_latin1("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_char() {
        assert_eq!(to_latin1("price: 5€").unwrap_err(), QRError::InvalidChar('€'));
        assert_eq!(to_latin1("Hello, world!🌎").unwrap_err(), QRError::InvalidChar('🌎'));
    }
}
