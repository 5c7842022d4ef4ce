use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Encoder
    DataTooLong,
    InvalidChar(char),
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskPattern,

    // Export
    ExportFailed,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::DataTooLong => f.write_str("Data too long"),
            Self::InvalidChar(c) => write!(f, "Character {c:?} cannot be encoded in ISO-8859-1"),
            Self::InvalidVersion => f.write_str("Invalid version"),
            Self::InvalidECLevel => f.write_str("Invalid error correction level"),
            Self::InvalidMaskPattern => f.write_str("Invalid masking pattern"),
            Self::ExportFailed => f.write_str("Failed to export image"),
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        assert_eq!(QRError::DataTooLong.to_string(), "Data too long");
        assert_eq!(
            QRError::InvalidChar('€').to_string(),
            "Character '€' cannot be encoded in ISO-8859-1"
        );
    }
}
