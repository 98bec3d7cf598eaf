//! Error types for frame decoding and probe updates.

use crate::sensor::Sensor;

/// A single field could not be read from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field's bytes lie (partly) past the end of the frame.
    #[error("offset {offset} out of range for a {len}-byte frame")]
    OutOfRange {
        /// Offset of the field's first byte.
        offset: usize,
        /// Length of the frame that was read.
        len: usize,
    },
}

/// Decoding a descrambled frame into sensor readings failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A sensor's word lies past the end of the frame (strict decoding).
    #[error("{sensor:?} at offset {offset} out of range for a {len}-byte frame")]
    FieldOutOfRange {
        /// The sensor that could not be read.
        sensor: Sensor,
        /// Offset of the sensor's word.
        offset: usize,
        /// Length of the frame that was read.
        len: usize,
    },

    /// Not a single sensor could be read from the frame (lenient decoding).
    #[error("frame too short: got {len} bytes, need {min}")]
    FrameTooShort {
        /// Length of the frame that was read.
        len: usize,
        /// Length needed for every known field.
        min: usize,
    },

    /// The frame does not fit the decode buffer.
    #[error("frame too long: got {len} bytes, buffer holds {max}")]
    FrameTooLong {
        /// Length the source reported.
        len: usize,
        /// Capacity of the decode buffer.
        max: usize,
    },
}

/// Battery calibration constants cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    /// The empty and full reference values are equal, so the battery
    /// percentage would divide by zero.
    #[error("battery calibration is degenerate: empty and full are both {raw}")]
    Degenerate {
        /// The shared reference value.
        raw: i16,
    },
}

/// One probe update cycle failed.
///
/// `Transport` means the characteristic could not be read and the read may be
/// retried. `Decode` means the frame itself was malformed.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError<E>
where
    E: core::fmt::Debug,
{
    /// Underlying error from the frame source.
    #[error("transport error: {0:?}")]
    Transport(E),

    /// The frame was read but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl<E: core::fmt::Debug> UpdateError<E> {
    /// Returns `true` if the failure came from the transport and a re-read may succeed.
    pub fn is_transport(&self) -> bool {
        matches!(self, UpdateError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockLinkError;

    #[test]
    fn test_messages_name_field_and_offset() {
        let err = DecodeError::FieldOutOfRange { sensor: Sensor::Battery, offset: 15, len: 10 };
        assert_eq!(err.to_string(), "Battery at offset 15 out of range for a 10-byte frame");

        let err = FieldError::OutOfRange { offset: 3, len: 2 };
        assert_eq!(err.to_string(), "offset 3 out of range for a 2-byte frame");
    }

    #[test]
    fn test_update_error_kinds() {
        let transport: UpdateError<MockLinkError> = UpdateError::Transport(MockLinkError);
        assert!(transport.is_transport());
        assert_eq!(transport.to_string(), "transport error: MockLinkError");

        let decode: UpdateError<MockLinkError> =
            DecodeError::FrameTooShort { len: 3, min: 18 }.into();
        assert!(!decode.is_transport());
        assert_eq!(decode.to_string(), "frame too short: got 3 bytes, need 18");
    }
}
