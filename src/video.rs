/*!
video: Trait abstraction decoupling the CPU core from the video unit.

The core only needs a narrow contract from the picture processor:
- forward the eight CPU-visible registers (0x2000-0x2007)
- accept bulk sprite-memory transfers (0x4014 DMA)
- accept pattern memory loads and remaps from the cartridge mapper
- render a frame and expose a vertical-blank flag to the stepping harness

Accepting a trait instead of a concrete PPU keeps the bus testable with a
recording mock and lets hosts plug in any renderer. `crate::ppu::Ppu` is the
headless implementation shipped with the crate.

All methods are called synchronously from the emulation thread and must
return promptly.
*/

/// The eight video-unit registers mapped at 0x2000-0x2007.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PpuRegister {
    Control1,
    Control2,
    Status,
    SpriteAddress,
    SpriteData,
    Scroll,
    VramAddress,
    VramData,
}

impl PpuRegister {
    pub const ALL: [PpuRegister; 8] = [
        PpuRegister::Control1,
        PpuRegister::Control2,
        PpuRegister::Status,
        PpuRegister::SpriteAddress,
        PpuRegister::SpriteData,
        PpuRegister::Scroll,
        PpuRegister::VramAddress,
        PpuRegister::VramData,
    ];

    /// Decode a CPU address. Only 0x2000..=0x2007 map to registers; the
    /// window is not mirrored.
    #[inline]
    pub fn from_address(addr: u16) -> Option<Self> {
        match addr {
            0x2000..=0x2007 => Some(Self::ALL[(addr - 0x2000) as usize]),
            _ => None,
        }
    }

    #[inline]
    pub fn address(self) -> u16 {
        0x2000 + self as u16
    }
}

/// Contract the bus and harness require from the video unit.
pub trait VideoUnit {
    /// CPU read of a register. May have side effects (status, vram data).
    fn read_register(&mut self, reg: PpuRegister) -> u8;

    /// CPU write of a register.
    fn write_register(&mut self, reg: PpuRegister, value: u8);

    /// Bulk sprite-memory transfer (256 bytes from 0x4014 DMA).
    fn dma_write(&mut self, data: &[u8]);

    /// Load `data` into pattern memory starting at `offset` (0x0000-0x1FFF).
    fn set_pattern_memory(&mut self, offset: u16, data: &[u8]);

    /// Power-on with the cartridge configuration byte (header byte 6).
    fn init(&mut self, config: u8);

    /// Draw the current picture into `frame`.
    fn render(&mut self, frame: &mut [u8]);

    fn set_blank(&mut self, blank: bool);

    fn blank(&self) -> bool;
}
