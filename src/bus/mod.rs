#![doc = r#"
Bus module: the CPU-visible 64 KiB address space.

Overview
- `Bus` owns the flat backing store (`ram`), the video unit and the installed
  cartridge mapper, and routes every CPU access to one of them.

Address decoding
- 0x2000..=0x2007: video registers, forwarded verbatim (`ppu_registers`).
- 0x4014 (write): sprite-memory DMA of page `value * 0x100` (`dma`).
- 0x8000..=0xFFFF (write): the mapper's write hook; a no-op with no mapper.
- Everything else: the flat array.

Word reads
- `read16` reproduces the page-wrap quirk: when the low byte sits at $xxFF
  the high byte comes from $xx00 of the same page.

Modules and responsibilities
- ram: flat 64 KiB store, also holding the banked program-ROM window.
- dma: the $4014 transfer.
- ppu_registers: the video register window.
"#]

pub mod dma;
pub mod ppu_registers;
pub mod ram;

#[cfg(test)]
mod tests;

pub use dma::OAM_DMA;
pub use ppu_registers::PpuRegisters;
pub use ram::Ram;

use crate::mapper::{BankSwitch, Mapper};
use crate::video::VideoUnit;

/// Start of the cartridge window; any write with bit 15 set goes to the mapper.
pub const CARTRIDGE_WINDOW: u16 = 0x8000;

/// CPU bus façade.
pub struct Bus<V: VideoUnit> {
    ram: Ram,
    video: V,
    mapper: Option<Mapper>,
}

impl<V: VideoUnit + std::fmt::Debug> std::fmt::Debug for Bus<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("video", &self.video)
            .field("mapper", &self.mapper.as_ref().map(Mapper::name))
            .finish()
    }
}

impl<V: VideoUnit> Bus<V> {
    /// Create a bus with zeroed memory and no mapper installed.
    pub fn new(video: V) -> Self {
        Self {
            ram: Ram::new(),
            video,
            mapper: None,
        }
    }

    /// CPU read. Video register reads may have side effects.
    pub fn read(&mut self, addr: u16) -> u8 {
        match PpuRegisters::decode(addr) {
            Some(reg) => PpuRegisters::read(&mut self.video, reg),
            None => self.ram.read(addr),
        }
    }

    /// CPU write.
    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(reg) = PpuRegisters::decode(addr) {
            PpuRegisters::write(&mut self.video, reg, value);
            return;
        }
        if addr == OAM_DMA {
            dma::oam_dma(&self.ram, value, &mut self.video);
            return;
        }
        if addr & CARTRIDGE_WINDOW != 0 {
            match self.mapper.as_mut() {
                Some(mapper) => mapper.write(&mut self.ram, &mut self.video, addr, value),
                None => log::trace!("write ${addr:04X} ignored, no mapper"),
            }
            return;
        }
        self.ram.write(addr, value);
    }

    /// Little-endian word read with the same-page wrap at $xxFF.
    pub fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi_addr = if addr & 0x00FF == 0x00FF {
            addr & 0xFF00
        } else {
            addr.wrapping_add(1)
        };
        let hi = self.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Side-effect-free read of the flat array. Used for instruction fetch
    /// and debugging; video registers are not consulted.
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.ram.read(addr)
    }

    /// Install `mapper` and let it perform its initial bank mapping. Any
    /// previously installed mapper is dropped.
    pub fn install_mapper(&mut self, mut mapper: Mapper) {
        mapper.load(&mut self.ram, &mut self.video);
        self.mapper = Some(mapper);
    }

    pub fn mapper(&self) -> Option<&Mapper> {
        self.mapper.as_ref()
    }

    #[inline]
    pub fn video(&self) -> &V {
        &self.video
    }

    #[inline]
    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    #[inline]
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Direct store access for loaders and tests; bypasses all decoding.
    #[inline]
    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }
}
