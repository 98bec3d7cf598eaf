//! Descrambling of raw C600 telemetry frames.
//!
//! The probe obfuscates its characteristic payload before sending it. Each
//! adjacent byte pair `(lo, hi)` has its even and odd bit lanes exchanged
//! between the two bytes and the result complemented:
//!
//! ```text
//! new_hi = !( (hi & 0x55) << 1 | (lo & 0xAA) >> 1 )
//! new_lo = !( (lo & 0x55) << 1 | (hi & 0xAA) >> 1 )
//! ```
//!
//! The pair transform is applied from the end of the frame toward the
//! start, and each step sees the byte the previous step just wrote. The
//! result therefore depends on iteration order and cannot be computed per
//! pair in parallel.
//!
//! ## Functions
//!
//! - [`descramble_in_place`]: Reverses the obfuscation inside a caller-owned buffer
//! - [`descramble_buffer`]: Copies a raw frame into an output buffer and descrambles it there
//! - [`scramble_in_place`]: Applies the obfuscation, the exact inverse of [`descramble_in_place`]
//!
//! ## Limitations
//!
//! - Frames of length 0 or 1 have no pair to process and are left untouched

/// Descrambles one adjacent pair, returning the new `(lo, hi)` bytes.
#[inline]
fn descramble_pair(lo: u8, hi: u8) -> (u8, u8) {
    let hibit1 = (hi & 0x55) << 1;
    let lobit1 = (hi & 0xAA) >> 1;
    let hibit = (lo & 0x55) << 1;
    let lobit = (lo & 0xAA) >> 1;
    (0xFF - (hibit | lobit1), 0xFF - (hibit1 | lobit))
}

/// Inverse of [`descramble_pair`].
#[inline]
fn scramble_pair(lo: u8, hi: u8) -> (u8, u8) {
    let hi = !hi;
    let lo = !lo;
    (
        ((hi & 0x55) << 1) | ((lo & 0xAA) >> 1),
        ((hi & 0xAA) >> 1) | ((lo & 0x55) << 1),
    )
}

/// Reverses the probe's obfuscation in place.
///
/// Pairs are processed from index `len - 1` down to `1`. The length of the
/// buffer is preserved, and buffers shorter than two bytes are unchanged.
pub fn descramble_in_place(frame: &mut [u8]) {
    for i in (1..frame.len()).rev() {
        let (lo, hi) = descramble_pair(frame[i - 1], frame[i]);
        frame[i - 1] = lo;
        frame[i] = hi;
    }
}

/// Applies the probe's obfuscation in place.
///
/// Undoes [`descramble_in_place`] by running the inverse pair transform in
/// ascending order. Useful for building frames as the device would send them.
pub fn scramble_in_place(frame: &mut [u8]) {
    for i in 1..frame.len() {
        let (lo, hi) = scramble_pair(frame[i - 1], frame[i]);
        frame[i - 1] = lo;
        frame[i] = hi;
    }
}

/// Copies the raw frame `input` into `output` and descrambles it there.
///
/// # Arguments
/// - `&[u8]` : The raw frame as read from the characteristic
/// - `&mut [u8]` : The output buffer
///
/// # Returns
/// The number of bytes written (always `input.len()`), or `None` if
/// `output` is too short to hold the frame.
pub fn descramble_buffer(input: &[u8], output: &mut [u8]) -> Option<usize> {
    let out = output.get_mut(..input.len())?;
    out.copy_from_slice(input);
    descramble_in_place(out);
    Some(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_vector() {
        let mut frame = [0x00, 0xFF, 0x0F, 0xF0];
        descramble_in_place(&mut frame);
        assert_eq!(frame, [0xFF, 0xF5, 0xA0, 0x5A]);
    }

    #[test]
    fn test_single_pair() {
        let mut zeros = [0x00, 0x00];
        descramble_in_place(&mut zeros);
        assert_eq!(zeros, [0xFF, 0xFF]);

        let mut lanes = [0xAA, 0x55];
        descramble_in_place(&mut lanes);
        assert_eq!(lanes, [0xFF, 0x00]);
    }

    #[test]
    fn test_short_frames_untouched() {
        let mut empty: [u8; 0] = [];
        descramble_in_place(&mut empty);
        assert!(empty.is_empty());

        let mut one = [0x12];
        descramble_in_place(&mut one);
        assert_eq!(one, [0x12]);
    }

    #[test]
    fn test_length_preserved_and_deterministic() {
        for len in 2..40usize {
            let raw: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(37) ^ 0x5C).collect();
            let mut a = raw.clone();
            let mut b = raw.clone();
            descramble_in_place(&mut a);
            descramble_in_place(&mut b);
            assert_eq!(a.len(), raw.len());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_scramble_is_inverse() {
        let plain = [0x01, 0x02, 0x02, 0xEE, 0x04, 0xB0, 0x03, 0x20, 0x01, 0xC2];
        let mut wire = plain;
        scramble_in_place(&mut wire);
        assert_ne!(wire, plain);
        descramble_in_place(&mut wire);
        assert_eq!(wire, plain);

        let mut scrambled = [0xFF, 0xF5, 0xA0, 0x5A];
        scramble_in_place(&mut scrambled);
        assert_eq!(scrambled, [0x00, 0xFF, 0x0F, 0xF0]);
    }

    #[test]
    fn test_descramble_buffer() {
        let raw = [0x00, 0xFF, 0x0F, 0xF0];
        let mut out = [0u8; 8];
        assert_eq!(descramble_buffer(&raw, &mut out), Some(4));
        assert_eq!(&out[..4], &[0xFF, 0xF5, 0xA0, 0x5A]);
        assert_eq!(&out[4..], &[0u8; 4]);

        let mut small = [0u8; 3];
        assert_eq!(descramble_buffer(&raw, &mut small), None);
    }
}
