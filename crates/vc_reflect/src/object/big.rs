use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

// -----------------------------------------------------------------------------
// BigInteger

/// An arbitrary-precision integer in minimal two's-complement big-endian form.
///
/// The representation is normalized on construction, so structural equality
/// is numeric equality.
///
/// # Examples
///
/// ```
/// use vc_reflect::object::BigInteger;
///
/// let n = BigInteger::from(-129_i64);
/// assert_eq!(n.to_bytes_be(), &[0xFF, 0x7F]);
/// assert_eq!(n.to_i128(), Some(-129));
///
/// let padded = BigInteger::from_bytes_be(&[0xFF, 0xFF, 0x7F]);
/// assert_eq!(padded, n);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    bytes: Box<[u8]>,
}

impl BigInteger {
    /// Zero.
    #[inline]
    pub fn zero() -> Self {
        Self {
            bytes: Box::new([0]),
        }
    }

    /// Parse two's-complement big-endian bytes.
    ///
    /// An empty slice is zero.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }
        let negative = bytes[0] & 0x80 != 0;
        let fill = if negative { 0xFF } else { 0x00 };
        let mut start = 0;
        // Drop redundant sign bytes.
        while start + 1 < bytes.len()
            && bytes[start] == fill
            && (bytes[start + 1] & 0x80 != 0) == negative
        {
            start += 1;
        }
        Self {
            bytes: Box::from(&bytes[start..]),
        }
    }

    /// Minimal two's-complement big-endian bytes, never empty.
    #[inline]
    pub fn to_bytes_be(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.bytes[0] & 0x80 != 0
    }

    /// Returns the value if it fits in an `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        if self.bytes.len() > 16 {
            return None;
        }
        let fill = if self.is_negative() { 0xFF } else { 0x00 };
        let mut buf = [fill; 16];
        buf[16 - self.bytes.len()..].copy_from_slice(&self.bytes);
        Some(i128::from_be_bytes(buf))
    }
}

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        Self::from_bytes_be(&value.to_be_bytes())
    }
}

impl From<i64> for BigInteger {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from(value as i128)
    }
}

impl From<i32> for BigInteger {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from(value as i128)
    }
}

impl Default for BigInteger {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        // Same sign: a longer minimal encoding has a larger magnitude.
        let by_len = self.bytes.len().cmp(&other.bytes.len());
        let by_len = if self.is_negative() {
            by_len.reverse()
        } else {
            by_len
        };
        by_len.then_with(|| self.bytes.cmp(&other.bytes))
    }
}

impl PartialOrd for BigInteger {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = self.to_i128() {
            return write!(f, "{v}");
        }
        f.write_str("0x")?;
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BigDecimal

/// An arbitrary-precision decimal, `unscaled * 10^-scale`.
///
/// Equality is representational: `1.0` and `1.00` differ.
///
/// # Examples
///
/// ```
/// use vc_reflect::object::{BigDecimal, BigInteger};
///
/// let d = BigDecimal::new(BigInteger::from(-12345_i64), 2);
/// assert_eq!(d.to_string(), "-123.45");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BigDecimal {
    pub unscaled: BigInteger,
    pub scale: i32,
}

impl BigDecimal {
    #[inline]
    pub fn new(unscaled: BigInteger, scale: i32) -> Self {
        Self { unscaled, scale }
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(v) = self.unscaled.to_i128() else {
            return write!(f, "{}E{}", self.unscaled, -(self.scale as i64));
        };
        if self.scale == 0 {
            return write!(f, "{v}");
        }
        if self.scale < 0 {
            return write!(f, "{v}E{}", -(self.scale as i64));
        }
        let negative = v < 0;
        let digits: Vec<u8> = alloc::format!("{}", v.unsigned_abs()).into_bytes();
        let scale = self.scale as usize;
        if negative {
            f.write_str("-")?;
        }
        if digits.len() <= scale {
            f.write_str("0.")?;
            for _ in digits.len()..scale {
                f.write_str("0")?;
            }
            f.write_str(core::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
        } else {
            let (int, frac) = digits.split_at(digits.len() - scale);
            f.write_str(core::str::from_utf8(int).map_err(|_| fmt::Error)?)?;
            f.write_str(".")?;
            f.write_str(core::str::from_utf8(frac).map_err(|_| fmt::Error)?)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn normalizes_sign_extension() {
        assert_eq!(BigInteger::from(0_i64).to_bytes_be(), &[0]);
        assert_eq!(BigInteger::from(127_i64).to_bytes_be(), &[0x7F]);
        assert_eq!(BigInteger::from(128_i64).to_bytes_be(), &[0x00, 0x80]);
        assert_eq!(BigInteger::from(-1_i64).to_bytes_be(), &[0xFF]);
        assert_eq!(BigInteger::from(-128_i64).to_bytes_be(), &[0x80]);
        assert_eq!(BigInteger::from_bytes_be(&[]), BigInteger::zero());
    }

    #[test]
    fn ordering_follows_value() {
        let mut values = [300_i64, -2, 0, -300, 5, i64::MIN, i64::MAX];
        let mut big: Vec<BigInteger> = values.iter().map(|v| BigInteger::from(*v)).collect();
        values.sort();
        big.sort();
        let back: Vec<i128> = big.iter().map(|b| b.to_i128().unwrap()).collect();
        let expected: Vec<i128> = values.iter().map(|v| *v as i128).collect();
        assert_eq!(back, expected);
    }

    #[test]
    fn decimal_display() {
        let d = |v: i64, s: i32| BigDecimal::new(BigInteger::from(v), s).to_string();
        assert_eq!(d(5, 3), "0.005");
        assert_eq!(d(12345, 2), "123.45");
        assert_eq!(d(7, 0), "7");
        assert_eq!(d(7, -2), "7E2");
        assert_eq!(d(-5, 1), "-0.5");
    }
}
