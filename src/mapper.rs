/*!
Mapper subsystem: the bank-switch seam and the direct-mapped (no mapper) mode.

Purpose:
- Own the cartridge image for the lifetime of emulation.
- Perform the initial bank mapping into the CPU address space and the video
  unit's pattern memory, and react to CPU writes in 0x8000..=0xFFFF.

Model:
- Program ROM is copied into the flat 64 KiB store; a bank switch is a copy.
  CPU reads of 0x8000..=0xFFFF are therefore plain memory reads and never
  reach a mapper.
- Character ROM is pushed into the video unit with `set_pattern_memory`.

`Mapper` is a closed tagged variant over the supported boards; each board
implements `BankSwitch`.
*/

use crate::bus::Ram;
use crate::cartridge::{CHR_BANK_SIZE, Cartridge, CartridgeError, PRG_BANK_SIZE};
use crate::mappers::Mmc1;
use crate::video::VideoUnit;

/// Size of the video unit's pattern window (two 4 KiB tables).
pub const PATTERN_WINDOW: usize = CHR_BANK_SIZE;

/// Behaviour every cartridge board provides.
///
/// Semantics:
/// - `load` runs once when the mapper is installed and sets up the power-on banks.
/// - `write` receives every CPU write with bit 15 set (full address, unmasked).
/// - Neither may fail; out-of-range bank requests are resolved by the board.
pub trait BankSwitch {
    /// iNES mapper number.
    fn id(&self) -> u8;

    fn load(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit);

    fn write(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit, addr: u16, value: u8);
}

/// Installed cartridge board.
#[derive(Debug, Clone)]
pub enum Mapper {
    NoMapper(NoMapper),
    Mmc1(Mmc1),
}

impl Mapper {
    /// Select a board for `cart` from its mapper id.
    pub fn new(cart: Cartridge) -> Result<Self, CartridgeError> {
        match cart.mapper_id() {
            0 => Ok(Mapper::NoMapper(NoMapper::new(cart)?)),
            1 => Ok(Mapper::Mmc1(Mmc1::new(cart))),
            id => Err(CartridgeError::UnknownMapper(id)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mapper::NoMapper(_) => "NoMapper",
            Mapper::Mmc1(_) => "MMC1",
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        match self {
            Mapper::NoMapper(m) => &m.cart,
            Mapper::Mmc1(m) => m.cartridge(),
        }
    }

    fn board(&mut self) -> &mut dyn BankSwitch {
        match self {
            Mapper::NoMapper(m) => m,
            Mapper::Mmc1(m) => m,
        }
    }
}

impl BankSwitch for Mapper {
    fn id(&self) -> u8 {
        match self {
            Mapper::NoMapper(m) => m.id(),
            Mapper::Mmc1(m) => m.id(),
        }
    }

    fn load(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit) {
        self.board().load(ram, video);
    }

    fn write(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit, addr: u16, value: u8) {
        self.board().write(ram, video, addr, value);
    }
}

/// Copy up to one pattern window of character data to `offset`. Data past
/// the end of the window is dropped.
pub(crate) fn load_pattern_memory(video: &mut dyn VideoUnit, offset: u16, chr: &[u8]) {
    let room = PATTERN_WINDOW.saturating_sub(offset as usize);
    let len = chr.len().min(room);
    if len == 0 {
        return;
    }
    video.set_pattern_memory(offset, &chr[..len]);
}

/// Direct-mapped board (mapper 0).
///
/// - 1 bank: mirrored at 0x8000 and 0xC000.
/// - 2 banks: 32 KiB at 0x8000.
/// - CPU writes are ignored.
#[derive(Clone, Debug)]
pub struct NoMapper {
    cart: Cartridge,
}

impl NoMapper {
    pub fn new(cart: Cartridge) -> Result<Self, CartridgeError> {
        match cart.prg_banks() {
            1 | 2 => Ok(Self { cart }),
            banks => Err(CartridgeError::UnsupportedBankCount { mapper: 0, banks }),
        }
    }
}

impl BankSwitch for NoMapper {
    fn id(&self) -> u8 {
        0
    }

    fn load(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit) {
        let prg = self.cart.prg();
        ram.load(0x8000, prg);
        if self.cart.prg_banks() == 1 {
            ram.load(0xC000, &prg[..PRG_BANK_SIZE]);
        }
        load_pattern_memory(video, 0x0000, self.cart.chr());
    }

    fn write(&mut self, _ram: &mut Ram, _video: &mut dyn VideoUnit, addr: u16, value: u8) {
        log::trace!("NoMapper: write ${value:02X} to ${addr:04X} ignored");
    }
}
