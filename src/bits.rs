use std::fmt;
use std::io::{self, Cursor};
use std::str::FromStr;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{HuffmanError, Result};

/// A sequence of binary digits, `false` = 0 and `true` = 1.
///
/// Displays and parses as a string of `'0'` and `'1'` characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitStringError(char);

impl fmt::Display for ParseBitStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid binary digit {:?}", self.0)
    }
}

impl std::error::Error for ParseBitStringError {}

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseBitStringError(other)),
            })
            .collect()
    }
}

/// Pack bits into bytes, most significant bit first. Unused low bits of the
/// last byte are zero.
pub fn pack(bits: &BitString) -> io::Result<Vec<u8>> {
    let mut packed = Vec::with_capacity(bits.len().div_ceil(8));
    {
        let mut writer = BitWriter::endian(&mut packed, BigEndian);
        for bit in bits.iter() {
            writer.write_bit(bit)?;
        }
        writer.byte_align()?;
    }
    Ok(packed)
}

/// Unpack the first `bit_count` bits of `packed`, most significant bit first.
pub fn unpack(packed: &[u8], bit_count: u64) -> Result<BitString> {
    let available = packed.len() as u64 * 8;
    if bit_count > available {
        return Err(HuffmanError::BitCountOverflow {
            bits: bit_count,
            bytes: packed.len(),
        });
    }

    let mut reader = BitReader::endian(Cursor::new(packed), BigEndian);
    let mut bits = BitString::with_capacity(bit_count as usize);
    for _ in 0..bit_count {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn display_and_parse_agree() {
        let b = bits("0110100");
        assert_eq!(b.len(), 7);
        assert_eq!(b.to_string(), "0110100");
        assert!("01x".parse::<BitString>().is_err());
    }

    #[test]
    fn pack_is_msb_first() {
        assert_eq!(pack(&bits("10000000")).unwrap(), vec![0x80]);
        assert_eq!(pack(&bits("1")).unwrap(), vec![0x80]);
        assert_eq!(pack(&bits("000000011")).unwrap(), vec![0x01, 0x80]);
        assert_eq!(pack(&BitString::new()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn unpack_trims_to_bit_count() {
        let original = bits("1011001110");
        let packed = pack(&original).unwrap();
        assert_eq!(packed.len(), 2);
        assert_eq!(unpack(&packed, 10).unwrap(), original);
        assert_eq!(unpack(&packed, 3).unwrap(), bits("101"));
    }

    #[test]
    fn unpack_rejects_bit_count_past_payload() {
        let err = unpack(&[0xff], 9).unwrap_err();
        assert!(matches!(err, HuffmanError::BitCountOverflow { bits: 9, bytes: 1 }));
    }

    #[test]
    fn starts_with_checks_prefix() {
        assert!(bits("0110").starts_with(&bits("01")));
        assert!(!bits("0110").starts_with(&bits("1")));
    }
}
