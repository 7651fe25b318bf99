//! MMC1 (Mapper 1) implementation.
//!
//! Implements:
//! - Serial shift register writes (5-bit), one independent accumulator per
//!   register (control / CHR0 / CHR1 / PRG), selected by `addr & 0xE000`
//! - PRG banking modes (32K switch, or 16K with fixed low or high)
//! - CHR banking (8K or 4K+4K)
//!
//! Deferred / Simplified:
//! - Mirroring bits of the control register are stored but not forwarded;
//!   the video interface has no mirroring hook.
//! - PRG RAM enable bit (PRG bit 4) is ignored.
//! - Consecutive-cycle write filtering is not modelled.

use crate::bus::Ram;
use crate::cartridge::{Cartridge, PRG_BANK_SIZE};
use crate::mapper::{BankSwitch, load_pattern_memory};
use crate::video::VideoUnit;

const CHR_UNIT: usize = 0x1000;

/// The four serially-loaded registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mmc1Register {
    Control = 0,
    Chr0 = 1,
    Chr1 = 2,
    Prg = 3,
}

impl Mmc1Register {
    #[inline]
    pub fn from_address(addr: u16) -> Self {
        match addr & 0xE000 {
            0x8000 => Mmc1Register::Control,
            0xA000 => Mmc1Register::Chr0,
            0xC000 => Mmc1Register::Chr1,
            _ => Mmc1Register::Prg,
        }
    }
}

/// 5-bit serial accumulator. Bits enter at bit 4 and shift right, so after
/// five writes the first bit sits in bit 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftRegister {
    value: u8,
    count: u8,
}

impl ShiftRegister {
    /// Shift in bit 0 of `bit`. Returns the committed value on the fifth write.
    pub fn push(&mut self, bit: u8) -> Option<u8> {
        self.value = (self.value >> 1) | ((bit & 1) << 4);
        self.count += 1;
        if self.count == 5 {
            let committed = self.value;
            self.reset();
            Some(committed)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

/// MMC1 mapper core state.
#[derive(Debug, Clone)]
pub struct Mmc1 {
    cart: Cartridge,

    // One accumulator per register
    shifters: [ShiftRegister; 4],

    // Committed 5-bit registers
    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,

    // Start of each 16 KiB bank within PRG ROM
    bank_offsets: Vec<usize>,
}

impl Mmc1 {
    pub fn new(cart: Cartridge) -> Self {
        let bank_offsets = (0..cart.prg_banks() as usize)
            .map(|i| i * PRG_BANK_SIZE)
            .collect();
        Self {
            cart,
            shifters: [ShiftRegister::default(); 4],
            // Power-on: PRG mode 3 (last bank fixed), 8K CHR.
            control: 0x0C,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
            bank_offsets,
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cart
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn chr_bank0(&self) -> u8 {
        self.chr_bank0
    }

    pub fn chr_bank1(&self) -> u8 {
        self.chr_bank1
    }

    pub fn prg_bank(&self) -> u8 {
        self.prg_bank
    }

    /// Serial writes accumulated so far for `reg`.
    pub fn pending_writes(&self, reg: Mmc1Register) -> u8 {
        self.shifters[reg as usize].count()
    }

    pub fn bank_offsets(&self) -> &[usize] {
        &self.bank_offsets
    }

    /// PRG mode (control bits 2-3).
    #[inline]
    pub fn prg_mode(&self) -> u8 {
        (self.control >> 2) & 0x03
    }

    /// True when CHR is switched as two independent 4 KiB halves (control bit 4).
    #[inline]
    pub fn chr_4k_mode(&self) -> bool {
        self.control & 0x10 != 0
    }

    // -------------- Bank mapping --------------

    fn wrap_prg_bank(&self, bank: usize) -> usize {
        let count = self.bank_offsets.len();
        if bank >= count {
            log::warn!("MMC1: PRG bank {bank} outside {count}-bank image, wrapping");
        }
        bank % count
    }

    fn map_prg(&self, ram: &mut Ram, dest: u16, bank: usize) {
        let offset = self.bank_offsets[self.wrap_prg_bank(bank)];
        ram.load(dest, &self.cart.prg()[offset..offset + PRG_BANK_SIZE]);
    }

    fn remap_prg(&self, ram: &mut Ram) {
        let bank = (self.prg_bank & 0x0F) as usize;
        let last = self.bank_offsets.len() - 1;
        match self.prg_mode() {
            0 | 1 => {
                let base = bank & 0x0E;
                self.map_prg(ram, 0x8000, base);
                self.map_prg(ram, 0xC000, base + 1);
            }
            2 => {
                self.map_prg(ram, 0x8000, 0);
                self.map_prg(ram, 0xC000, bank);
            }
            _ => {
                self.map_prg(ram, 0x8000, bank);
                self.map_prg(ram, 0xC000, last);
            }
        }
        log::debug!(
            "MMC1: PRG mode {} bank {} mapped",
            self.prg_mode(),
            self.prg_bank & 0x0F
        );
    }

    /// Copy the 4 KiB CHR unit `bank` to pattern offset `dest`.
    fn map_chr(&self, video: &mut dyn VideoUnit, dest: u16, bank: u8) {
        let chr = self.cart.chr();
        let units = chr.len() / CHR_UNIT;
        if units == 0 {
            return;
        }
        let mut bank = bank as usize;
        if bank >= units {
            log::warn!("MMC1: CHR bank {bank} outside {units}-unit image, wrapping");
            bank %= units;
        }
        let start = bank * CHR_UNIT;
        load_pattern_memory(video, dest, &chr[start..start + CHR_UNIT]);
    }

    fn remap_chr_low(&self, video: &mut dyn VideoUnit) {
        if self.chr_4k_mode() {
            self.map_chr(video, 0x0000, self.chr_bank0);
        } else {
            let base = self.chr_bank0 & 0x1E;
            self.map_chr(video, 0x0000, base);
            self.map_chr(video, 0x1000, base + 1);
        }
    }

    fn remap_chr(&self, video: &mut dyn VideoUnit) {
        self.remap_chr_low(video);
        if self.chr_4k_mode() {
            self.map_chr(video, 0x1000, self.chr_bank1);
        }
    }

    fn commit(&mut self, reg: Mmc1Register, value: u8, ram: &mut Ram, video: &mut dyn VideoUnit) {
        log::debug!("MMC1: {reg:?} <- {value:#04x}");
        match reg {
            Mmc1Register::Control => {
                self.control = value;
                self.remap_prg(ram);
                self.remap_chr(video);
            }
            Mmc1Register::Chr0 => {
                self.chr_bank0 = value;
                self.remap_chr_low(video);
            }
            Mmc1Register::Chr1 => {
                self.chr_bank1 = value;
                if self.chr_4k_mode() {
                    self.map_chr(video, 0x1000, value);
                }
            }
            Mmc1Register::Prg => {
                self.prg_bank = value;
                self.remap_prg(ram);
            }
        }
    }
}

impl BankSwitch for Mmc1 {
    fn id(&self) -> u8 {
        1
    }

    /// Map the last two banks and copy the first 8 KiB of CHR.
    fn load(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit) {
        let count = self.bank_offsets.len();
        self.map_prg(ram, 0x8000, count.saturating_sub(2));
        self.map_prg(ram, 0xC000, count - 1);
        load_pattern_memory(video, 0x0000, self.cart.chr());
    }

    fn write(&mut self, ram: &mut Ram, video: &mut dyn VideoUnit, addr: u16, value: u8) {
        let reg = Mmc1Register::from_address(addr);
        let shifter = &mut self.shifters[reg as usize];
        if value & 0x80 != 0 {
            shifter.reset();
            return;
        }
        if let Some(committed) = shifter.push(value) {
            self.commit(reg, committed, ram, video);
        }
    }
}
