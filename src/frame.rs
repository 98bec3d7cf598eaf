//! Field extraction from descrambled frames.
//!
//! A [`DescrambledFrame`] is a read-only view over a caller-owned buffer
//! that has already been passed through the descrambler. Fields are read at
//! fixed offsets (see [`crate::consts`]) as signed big-endian words or single
//! bytes. A read past the end of the frame is reported, never panics.

use crate::consts::{MIN_FRAME_LEN, PRODUCT_CODE_OFFSET, PROTOCOL_OFFSET, STATUS_OFFSET};
use crate::descramble::descramble_in_place;
use crate::error::FieldError;

/// Reads a signed 16-bit big-endian word at `offset`.
///
/// Fails with [`FieldError::OutOfRange`] if `offset + 1` is not a valid
/// index into `frame`.
pub fn read_i16(frame: &[u8], offset: usize) -> Result<i16, FieldError> {
    match frame.get(offset..).and_then(|rest| rest.get(..2)) {
        Some(&[hi, lo]) => Ok(i16::from_be_bytes([hi, lo])),
        _ => Err(FieldError::OutOfRange {
            offset,
            len: frame.len(),
        }),
    }
}

/// Reads a single byte at `offset`.
pub fn read_u8(frame: &[u8], offset: usize) -> Result<u8, FieldError> {
    frame.get(offset).copied().ok_or(FieldError::OutOfRange {
        offset,
        len: frame.len(),
    })
}

/// A descrambled telemetry frame.
///
/// Borrows the buffer it was built from, so its length always equals the
/// length of the raw frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescrambledFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> DescrambledFrame<'a> {
    /// Descrambles a raw frame in place and returns a view over the result.
    ///
    /// The buffer holds plain bytes afterwards; the raw bytes are gone.
    pub fn descramble(raw: &'a mut [u8]) -> Self {
        descramble_in_place(raw);
        Self { bytes: raw }
    }

    /// Wraps bytes that are already descrambled.
    pub const fn from_descrambled(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The descrambled bytes.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Frame length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the frame holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if every known field lies inside the frame.
    pub const fn is_complete(&self) -> bool {
        self.bytes.len() >= MIN_FRAME_LEN
    }

    /// See [`read_i16`].
    pub fn read_i16(&self, offset: usize) -> Result<i16, FieldError> {
        read_i16(self.bytes, offset)
    }

    /// See [`read_u8`].
    pub fn read_u8(&self, offset: usize) -> Result<u8, FieldError> {
        read_u8(self.bytes, offset)
    }
}

/// The packed status byte at the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct StatusFlags(pub u8);

impl StatusFlags {
    /// The display is holding its last reading (high nibble set).
    pub const fn hold_reading(&self) -> bool {
        self.0 >> 4 != 0
    }

    /// The backlight is on.
    pub const fn backlight_on(&self) -> bool {
        (self.0 & 0x0F) >> 3 != 0
    }

    /// The raw status byte.
    pub const fn raw(&self) -> u8 {
        self.0
    }
}

/// Header fields carried by the frame that are not sensor readings.
///
/// Each field is `None` when the frame is too short to contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct FrameHeader {
    /// Protocol constant byte.
    pub protocol: Option<u8>,
    /// Product-name code byte.
    pub product_code: Option<u8>,
    /// Packed status flags.
    pub status: Option<StatusFlags>,
}

impl FrameHeader {
    /// Reads the header fields from a descrambled frame.
    pub fn parse(frame: &DescrambledFrame<'_>) -> Self {
        Self {
            protocol: frame.read_u8(PROTOCOL_OFFSET).ok(),
            product_code: frame.read_u8(PRODUCT_CODE_OFFSET).ok(),
            status: frame.read_u8(STATUS_OFFSET).ok().map(StatusFlags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descramble::scramble_in_place;

    #[test]
    fn test_read_i16_signed() {
        assert_eq!(read_i16(&[0x00, 0x0A], 0), Ok(10));
        assert_eq!(read_i16(&[0xFF, 0xFF], 0), Ok(-1));
        assert_eq!(read_i16(&[0x80, 0x00], 0), Ok(-32768));
        assert_eq!(read_i16(&[0x7F, 0xFF], 0), Ok(i16::MAX));
        assert_eq!(read_i16(&[0x00, 0x01, 0x2C], 1), Ok(300));
    }

    #[test]
    fn test_read_i16_out_of_range() {
        let frame = [0x01, 0x02, 0x03];
        assert_eq!(read_i16(&frame, 2), Err(FieldError::OutOfRange { offset: 2, len: 3 }));
        assert_eq!(read_i16(&frame, 3), Err(FieldError::OutOfRange { offset: 3, len: 3 }));
        assert_eq!(read_i16(&[], 0), Err(FieldError::OutOfRange { offset: 0, len: 0 }));
        assert_eq!(
            read_i16(&frame, usize::MAX),
            Err(FieldError::OutOfRange { offset: usize::MAX, len: 3 })
        );
    }

    #[test]
    fn test_read_u8() {
        assert_eq!(read_u8(&[0x10, 0x20], 1), Ok(0x20));
        assert_eq!(read_u8(&[0x10, 0x20], 2), Err(FieldError::OutOfRange { offset: 2, len: 2 }));
    }

    #[test]
    fn test_descramble_preserves_length() {
        let mut raw = [0x00, 0xFF, 0x0F, 0xF0];
        let frame = DescrambledFrame::descramble(&mut raw);
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.as_bytes(), &[0xFF, 0xF5, 0xA0, 0x5A]);
        assert_eq!(frame.read_i16(1), Ok(i16::from_be_bytes([0xF5, 0xA0])));
        assert!(!frame.is_complete());
    }

    #[test]
    fn test_header_from_scrambled_frame() {
        let mut buf = [0u8; 18];
        buf[1] = 0x02;
        buf[2] = 0x11;
        buf[17] = 0x18;
        scramble_in_place(&mut buf);

        let frame = DescrambledFrame::descramble(&mut buf);
        assert!(frame.is_complete());
        let header = FrameHeader::parse(&frame);
        assert_eq!(header.protocol, Some(0x02));
        assert_eq!(header.product_code, Some(0x11));
        let status = header.status.unwrap();
        assert!(status.hold_reading());
        assert!(status.backlight_on());
    }

    #[test]
    fn test_status_flags() {
        assert!(!StatusFlags(0x00).hold_reading());
        assert!(!StatusFlags(0x07).backlight_on());
        assert!(StatusFlags(0x08).backlight_on());
        assert!(StatusFlags(0x10).hold_reading());
        assert!(!StatusFlags(0x10).backlight_on());
        assert_eq!(StatusFlags(0xA5).raw(), 0xA5);
    }

    #[test]
    fn test_header_short_frame() {
        let bytes = [0xAA, 0x01, 0x05];
        let header = FrameHeader::parse(&DescrambledFrame::from_descrambled(&bytes));
        assert_eq!(header.protocol, Some(0x01));
        assert_eq!(header.product_code, Some(0x05));
        assert_eq!(header.status, None);
    }
}
