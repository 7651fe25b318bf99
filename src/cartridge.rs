/*!
Cartridge image with iNES (v1) header parsing.

Features:
- Parse the 16-byte iNES header from raw bytes
- Extract PRG ROM (16 KiB banks) and CHR ROM (8 KiB banks)
- Determine mirroring, region, and the mapper id split across bytes 6 and 7
- Validate declared sizes against the data actually present

Notes:
- A 512-byte trainer (byte 6, bit 2) is skipped.
- Trailing bytes past the declared CHR data are ignored.
- The image is immutable once built; the mapper takes ownership of it.
*/

use std::fmt;

use crate::config::Region;

/// Size of the iNES header.
pub const HEADER_LEN: usize = 16;
/// Program-ROM bank size (16 KiB).
pub const PRG_BANK_SIZE: usize = 0x4000;
/// Character-ROM bank size (8 KiB).
pub const CHR_BANK_SIZE: usize = 0x2000;

const MAGIC: &[u8; 4] = b"NES\x1A";
const TRAINER_LEN: usize = 512;

/// Failures raised while parsing or configuring a cartridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    HeaderTooShort { len: usize },
    BadMagic,
    NoProgramBanks,
    UnsupportedBankCount { mapper: u8, banks: u8 },
    UnknownMapper(u8),
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::HeaderTooShort { len } => {
                write!(f, "image is {len} bytes, shorter than the {HEADER_LEN}-byte iNES header")
            }
            CartridgeError::BadMagic => write!(f, "invalid iNES header magic (expected NES<1A>)"),
            CartridgeError::NoProgramBanks => write!(f, "cartridge declares no program-ROM banks"),
            CartridgeError::UnsupportedBankCount { mapper, banks } => {
                write!(f, "mapper {mapper} cannot map {banks} program-ROM banks")
            }
            CartridgeError::UnknownMapper(id) => write!(f, "unsupported mapper id: {id}"),
            CartridgeError::Truncated {
                section,
                expected,
                actual,
            } => write!(
                f,
                "{section} data truncated: expected {expected} bytes, found {actual}"
            ),
        }
    }
}

impl std::error::Error for CartridgeError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

impl Mirroring {
    /// Decode from header byte 6 (bit 0 set means vertical).
    pub const fn from_flags6(flags6: u8) -> Self {
        if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Cartridge {
    prg: Vec<u8>,
    chr: Vec<u8>,
    prg_banks: u8,
    chr_banks: u8,
    mapper_id: u8,
    flags6: u8,
    region: Region,
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("prg_banks", &self.prg_banks)
            .field("chr_banks", &self.chr_banks)
            .field("mirroring", &self.mirroring())
            .field("region", &self.region)
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Build from already-split ROM sections. `prg` must hold at least
    /// `prg_banks` 16 KiB banks and `chr` at least `chr_banks` 8 KiB banks;
    /// any excess is dropped.
    pub fn new(
        prg_banks: u8,
        mapper_id: u8,
        prg: &[u8],
        chr_banks: u8,
        chr: &[u8],
    ) -> Result<Self, CartridgeError> {
        if prg_banks == 0 {
            return Err(CartridgeError::NoProgramBanks);
        }
        let prg_len = prg_banks as usize * PRG_BANK_SIZE;
        if prg.len() < prg_len {
            return Err(CartridgeError::Truncated {
                section: "PRG ROM",
                expected: prg_len,
                actual: prg.len(),
            });
        }
        let chr_len = chr_banks as usize * CHR_BANK_SIZE;
        if chr.len() < chr_len {
            return Err(CartridgeError::Truncated {
                section: "CHR ROM",
                expected: chr_len,
                actual: chr.len(),
            });
        }

        Ok(Self {
            prg: prg[..prg_len].to_vec(),
            chr: chr[..chr_len].to_vec(),
            prg_banks,
            chr_banks,
            mapper_id,
            flags6: 0,
            region: Region::Ntsc,
        })
    }

    /// Parse a complete iNES image (header followed by ROM data).
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::HeaderTooShort { len: data.len() });
        }
        if &data[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_banks = data[4];
        let chr_banks = data[5];
        let flags6 = data[6];
        let flags7 = data[7];

        // Mapper ID: high nibble from flags7, low nibble from flags6
        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);

        let mut offset = HEADER_LEN;
        if flags6 & 0x04 != 0 {
            offset += TRAINER_LEN;
        }
        let body = data.get(offset..).unwrap_or(&[]);
        let prg_len = (prg_banks as usize * PRG_BANK_SIZE).min(body.len());
        let (prg, chr) = body.split_at(prg_len);

        let mut cart = Self::new(prg_banks, mapper_id, prg, chr_banks, chr)?;
        cart.flags6 = flags6;
        cart.region = Region::from_header_byte(data[9]);
        Ok(cart)
    }

    // -------------- Accessors --------------

    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    /// Header byte 6, handed to the video unit on power-on.
    pub fn flags6(&self) -> u8 {
        self.flags6
    }

    pub fn mirroring(&self) -> Mirroring {
        Mirroring::from_flags6(self.flags6)
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_ines;

    #[test]
    fn parses_header_fields() {
        let mut img = build_ines(2, 1, 0x10, 0x10, 0, None);
        img[9] = 0x01;
        let cart = Cartridge::from_ines_bytes(&img).unwrap();
        assert_eq!(cart.prg_banks(), 2);
        assert_eq!(cart.chr_banks(), 1);
        assert_eq!(cart.mapper_id(), 0x11);
        assert_eq!(cart.prg().len(), 2 * PRG_BANK_SIZE);
        assert_eq!(cart.chr().len(), CHR_BANK_SIZE);
        assert_eq!(cart.region(), Region::Pal);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn mapper_id_nibbles() {
        // low nibble from byte 6 high nibble, high nibble from byte 7
        let img = build_ines(1, 0, 0x41, 0x20, 0, None);
        let cart = Cartridge::from_ines_bytes(&img).unwrap();
        assert_eq!(cart.mapper_id(), 0x24);
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        assert_eq!(cart.flags6(), 0x41);
    }

    #[test]
    fn rejects_short_and_bad_magic() {
        assert_eq!(
            Cartridge::from_ines_bytes(&[0u8; 10]),
            Err(CartridgeError::HeaderTooShort { len: 10 })
        );
        let mut img = build_ines(1, 0, 0, 0, 0, None);
        img[0] = b'X';
        assert_eq!(Cartridge::from_ines_bytes(&img), Err(CartridgeError::BadMagic));
    }

    #[test]
    fn rejects_zero_banks() {
        let img = build_ines(0, 0, 0, 0, 0, None);
        assert_eq!(
            Cartridge::from_ines_bytes(&img),
            Err(CartridgeError::NoProgramBanks)
        );
    }

    #[test]
    fn rejects_truncated_sections() {
        let mut img = build_ines(2, 0, 0, 0, 0, None);
        img.truncate(HEADER_LEN + PRG_BANK_SIZE);
        assert!(matches!(
            Cartridge::from_ines_bytes(&img),
            Err(CartridgeError::Truncated { section: "PRG ROM", .. })
        ));

        let mut img = build_ines(1, 1, 0, 0, 0, None);
        img.truncate(HEADER_LEN + PRG_BANK_SIZE + 100);
        assert_eq!(
            Cartridge::from_ines_bytes(&img),
            Err(CartridgeError::Truncated {
                section: "CHR ROM",
                expected: CHR_BANK_SIZE,
                actual: 100,
            })
        );
    }

    #[test]
    fn trainer_is_skipped() {
        let mut img = build_ines(1, 0, 0x04, 0, 0, None);
        // build_ines does not add a trainer; insert one and mark the first PRG byte.
        img.splice(HEADER_LEN..HEADER_LEN, std::iter::repeat_n(0xEEu8, TRAINER_LEN));
        img[HEADER_LEN + TRAINER_LEN] = 0x5A;
        let cart = Cartridge::from_ines_bytes(&img).unwrap();
        assert_eq!(cart.prg()[0], 0x5A);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let msg = CartridgeError::UnsupportedBankCount { mapper: 0, banks: 3 }.to_string();
        assert!(msg.contains("mapper 0"));
        assert!(msg.contains('3'));
        assert_eq!(
            CartridgeError::UnknownMapper(4).to_string(),
            "unsupported mapper id: 4"
        );
    }
}
