//! # Two's-Complement Bit Strings
//!
//! Converts signed integers into fixed-width strings of `'0'`/`'1'` characters,
//! the format consumed by `$readmemb`-style testbench loaders.
//!
//! A value that does not fit the target width is clamped to the nearest
//! representable bound by default ([`OverflowMode::Saturate`]). This matches
//! the behavior of saturating fixed-point hardware, so products that exceed
//! 16 bits are emitted as `0x7FFF` / `0x8000` rather than wrapped.
//! [`OverflowMode::Strict`] turns such values into an error instead.

use crate::error::{bit_string_error, GenError, Result};

/// Width of an encoded two's-complement integer, in bits (`1..=64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    /// 8-bit width used for generated operands.
    pub const BYTE: BitWidth = BitWidth(8);

    /// 16-bit width used for products.
    pub const HALF_WORD: BitWidth = BitWidth(16);

    /// Largest supported width.
    pub const MAX_BITS: u32 = 64;

    /// Creates a width, rejecting `0` and anything above [`BitWidth::MAX_BITS`].
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(GenError::InvalidWidth { width: bits });
        }
        Ok(BitWidth(bits))
    }

    /// Number of bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Smallest representable value, `-2^(bits-1)`.
    pub const fn min_value(self) -> i64 {
        i64::MIN >> (Self::MAX_BITS - self.0)
    }

    /// Largest representable value, `2^(bits-1) - 1`.
    pub const fn max_value(self) -> i64 {
        i64::MAX >> (Self::MAX_BITS - self.0)
    }

    /// Returns `true` if `value` fits without clamping.
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    const fn mask(self) -> u64 {
        u64::MAX >> (Self::MAX_BITS - self.0)
    }
}

/// How to treat values outside the representable range of a [`BitWidth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowMode {
    /// Clamp to the nearest bound.
    #[default]
    Saturate,
    /// Fail with [`GenError::Overflow`].
    Strict,
}

/// Clamps `value` into the signed range of `width`.
///
/// Both bounds are inclusive, so a value equal to a bound is returned unchanged.
pub fn saturate(value: i64, width: BitWidth) -> i64 {
    value.clamp(width.min_value(), width.max_value())
}

/// Encodes `value` as exactly `width` two's-complement bits, saturating on overflow.
///
/// Non-negative values are written as plain binary, zero-padded on the left.
/// Negative values are written as `(1 << width) + value`, which is what masking
/// the 64-bit two's-complement pattern down to `width` bits yields.
///
/// # Examples
///
/// ```
/// use rtlvec::encode::{to_signed_binary, BitWidth};
///
/// assert_eq!(to_signed_binary(5, BitWidth::BYTE), "00000101");
/// assert_eq!(to_signed_binary(-5, BitWidth::BYTE), "11111011");
/// assert_eq!(to_signed_binary(128, BitWidth::BYTE), "01111111");
/// assert_eq!(to_signed_binary(-129, BitWidth::BYTE), "10000000");
/// ```
pub fn to_signed_binary(value: i64, width: BitWidth) -> String {
    let clamped = saturate(value, width);
    let pattern = (clamped as u64) & width.mask();
    format!("{:0w$b}", pattern, w = width.bits() as usize)
}

/// Encodes `value` according to `mode`.
///
/// With [`OverflowMode::Saturate`] this never fails and is identical to
/// [`to_signed_binary`].
pub fn encode(value: i64, width: BitWidth, mode: OverflowMode) -> Result<String> {
    if mode == OverflowMode::Strict && !width.contains(value) {
        return Err(GenError::Overflow {
            value,
            width: width.bits(),
        });
    }
    Ok(to_signed_binary(value, width))
}

/// Decodes a two's-complement bit string; its length is the width.
///
/// # Errors
///
/// Returns [`GenError::InvalidBitString`] if `bits` is empty, longer than 64
/// characters, or contains anything other than `'0'` and `'1'`.
pub fn from_signed_binary(bits: &str) -> Result<i64> {
    let len = bits.len();
    if len == 0 {
        return Err(bit_string_error(bits, "empty bit string"));
    }
    if len > BitWidth::MAX_BITS as usize {
        return Err(bit_string_error(
            bits,
            format!("{len} bits exceed the 64-bit limit"),
        ));
    }
    if let Some(c) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(bit_string_error(bits, format!("unexpected character {c:?}")));
    }

    let raw = u64::from_str_radix(bits, 2).map_err(|e| bit_string_error(bits, e.to_string()))?;

    // Sign-extend from `len` bits.
    let shift = BitWidth::MAX_BITS - len as u32;
    Ok(((raw << shift) as i64) >> shift)
}
