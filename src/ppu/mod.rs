/*!
Headless picture processor implementing `crate::video::VideoUnit`.

Provides:
- CPU-visible register interface ($2000..$2007)
- 256 bytes of sprite (OAM) memory fed by $2004 and $4014 DMA
- VRAM: 8KB pattern memory loaded by the mapper, 2KB of nametables mirrored
  per the cartridge configuration byte, and 32 bytes of palette RAM
- A frame renderer drawing nametable 0 and 8x8 sprites into an RGBA buffer

There is no dot or scanline timing. The stepping harness owns the blank
flag and decides when a frame is drawn.

STRUCTURE:
- `registers.rs` - register reads/writes, the $2006 latch, buffered $2007
- `memory.rs`    - VRAM address decoding, mirroring, OAM DMA copy
- `renderer.rs`  - `render_frame` background + sprite composition
*/

use crate::cartridge::Mirroring;
use crate::video::{PpuRegister, VideoUnit};

/// Screen width in pixels.
pub const NES_WIDTH: usize = 256;
/// Screen height in pixels.
pub const NES_HEIGHT: usize = 240;
/// RGBA bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;
/// Size of an RGBA frame buffer.
pub const FRAME_BYTES: usize = NES_WIDTH * NES_HEIGHT * BYTES_PER_PIXEL;

/// Pattern memory size (two 4KB pattern tables).
pub const PATTERN_SIZE: usize = 0x2000;
const NAMETABLE_SIZE: usize = 0x0800;
const PALETTE_SIZE: usize = 0x20;

/// Canonical (approximate) NES master palette (RGB; alpha always 0xFF when rendered).
const NES_PALETTE: [[u8; 3]; 64] = [
    [0x75, 0x75, 0x75],
    [0x27, 0x1B, 0x8F],
    [0x00, 0x00, 0xAB],
    [0x47, 0x00, 0x9F],
    [0x8F, 0x00, 0x77],
    [0xAB, 0x00, 0x13],
    [0xA7, 0x00, 0x00],
    [0x7F, 0x0B, 0x00],
    [0x43, 0x2F, 0x00],
    [0x00, 0x47, 0x00],
    [0x00, 0x51, 0x00],
    [0x00, 0x3F, 0x17],
    [0x1B, 0x3F, 0x5F],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xBC, 0xBC, 0xBC],
    [0x00, 0x73, 0xEF],
    [0x23, 0x3B, 0xEF],
    [0x83, 0x00, 0xF3],
    [0xBF, 0x00, 0xBF],
    [0xE7, 0x00, 0x5B],
    [0xDB, 0x2B, 0x00],
    [0xCB, 0x4F, 0x0F],
    [0x8B, 0x73, 0x00],
    [0x00, 0x97, 0x00],
    [0x00, 0xAB, 0x00],
    [0x00, 0x93, 0x3B],
    [0x00, 0x83, 0x8B],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0x3F, 0xBF, 0xFF],
    [0x5F, 0x97, 0xFF],
    [0xA7, 0x8B, 0xFD],
    [0xF7, 0x7B, 0xFF],
    [0xFF, 0x77, 0xB7],
    [0xFF, 0x77, 0x63],
    [0xFF, 0x9B, 0x3B],
    [0xF3, 0xBF, 0x3F],
    [0x83, 0xD3, 0x13],
    [0x4F, 0xDF, 0x4B],
    [0x58, 0xF8, 0x98],
    [0x00, 0xEB, 0xDB],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0xAB, 0xE7, 0xFF],
    [0xC7, 0xD7, 0xFF],
    [0xD7, 0xCB, 0xFF],
    [0xFF, 0xC7, 0xFF],
    [0xFF, 0xC7, 0xDB],
    [0xFF, 0xBF, 0xB3],
    [0xFF, 0xDB, 0xAB],
    [0xFF, 0xE7, 0xA3],
    [0xE3, 0xFF, 0xA3],
    [0xAB, 0xF3, 0xBF],
    [0xB3, 0xFF, 0xCF],
    [0x9F, 0xFF, 0xF3],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
];

mod memory;
mod registers;
mod renderer;

pub struct Ppu {
    ctrl: u8,     // $2000
    mask: u8,     // $2001
    status: u8,   // $2002, bit 7 mirrors `blank`
    oam_addr: u8, // $2003

    // Shared $2005/$2006 write toggle
    write_toggle: bool,
    scroll_x: u8,
    scroll_y: u8,

    vram_addr: u16,
    vram_buffer: u8,

    pattern: Box<[u8]>,
    nametables: [u8; NAMETABLE_SIZE],
    palette: [u8; PALETTE_SIZE],
    mirroring: Mirroring,

    oam: [u8; 256],

    blank: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("ctrl", &self.ctrl)
            .field("mask", &self.mask)
            .field("status", &self.status)
            .field("vram_addr", &self.vram_addr)
            .field("mirroring", &self.mirroring)
            .field("blank", &self.blank)
            .finish_non_exhaustive()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            write_toggle: false,
            scroll_x: 0,
            scroll_y: 0,
            vram_addr: 0,
            vram_buffer: 0,
            pattern: vec![0; PATTERN_SIZE].into_boxed_slice(),
            nametables: [0; NAMETABLE_SIZE],
            palette: [0; PALETTE_SIZE],
            mirroring: Mirroring::Horizontal,
            oam: [0; 256],
            blank: false,
        }
    }

    /// Clear registers, VRAM and OAM. Pattern memory and mirroring are kept,
    /// they belong to the cartridge.
    pub fn reset(&mut self) {
        self.ctrl = 0;
        self.mask = 0;
        self.status = 0;
        self.oam_addr = 0;
        self.write_toggle = false;
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.vram_addr = 0;
        self.vram_buffer = 0;
        self.nametables.fill(0);
        self.palette.fill(0);
        self.oam.fill(0);
        self.blank = false;
    }

    pub fn ctrl(&self) -> u8 {
        self.ctrl
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn vram_addr(&self) -> u16 {
        self.vram_addr
    }

    pub fn write_toggle(&self) -> bool {
        self.write_toggle
    }

    /// Step applied to the VRAM address after each $2007 access.
    pub fn vram_increment_step(&self) -> u16 {
        if self.ctrl & 0x04 != 0 { 32 } else { 1 }
    }

    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn peek_vram(&self, addr: u16) -> u8 {
        self.peek_vram_inner(addr)
    }

    pub fn poke_vram(&mut self, addr: u16, value: u8) {
        self.poke_vram_inner(addr, value);
    }
}

impl VideoUnit for Ppu {
    fn read_register(&mut self, reg: PpuRegister) -> u8 {
        self.read_reg_inner(reg)
    }

    fn write_register(&mut self, reg: PpuRegister, value: u8) {
        self.write_reg_inner(reg, value);
    }

    fn dma_write(&mut self, data: &[u8]) {
        self.oam_dma_copy_inner(data);
    }

    fn set_pattern_memory(&mut self, offset: u16, data: &[u8]) {
        let start = offset as usize;
        if start >= PATTERN_SIZE {
            return;
        }
        let len = data.len().min(PATTERN_SIZE - start);
        self.pattern[start..start + len].copy_from_slice(&data[..len]);
    }

    fn init(&mut self, config: u8) {
        self.reset();
        self.mirroring = Mirroring::from_flags6(config);
        log::debug!("video unit initialised with {:?} mirroring", self.mirroring);
    }

    fn render(&mut self, frame: &mut [u8]) {
        self.render_frame(frame);
    }

    fn set_blank(&mut self, blank: bool) {
        self.blank = blank;
        if blank {
            self.status |= 0x80;
        } else {
            self.status &= !0x80;
        }
    }

    fn blank(&self) -> bool {
        self.blank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_selects_mirroring_from_config_bit0() {
        let mut p = Ppu::new();
        p.init(0x01);
        assert_eq!(p.mirroring(), Mirroring::Vertical);
        p.init(0x10);
        assert_eq!(p.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn pattern_loads_are_clipped_to_the_window() {
        let mut p = Ppu::new();
        p.set_pattern_memory(0x1000, &[0x11; 0x1000]);
        assert_eq!(p.pattern()[0x0FFF], 0);
        assert_eq!(p.pattern()[0x1000], 0x11);
        assert_eq!(p.pattern()[0x1FFF], 0x11);

        p.set_pattern_memory(0x1FFE, &[0x22; 16]);
        assert_eq!(p.pattern()[0x1FFF], 0x22);
        assert_eq!(p.pattern().len(), PATTERN_SIZE);

        p.set_pattern_memory(0x2000, &[0x33; 4]);
        assert_eq!(p.pattern()[0x1FFF], 0x22);
    }

    #[test]
    fn init_keeps_pattern_memory() {
        let mut p = Ppu::new();
        p.set_pattern_memory(0, &[0xAB; 4]);
        p.init(0);
        assert_eq!(p.pattern()[0], 0xAB);
    }

    #[test]
    fn blank_flag_drives_status_bit7() {
        let mut p = Ppu::new();
        p.set_blank(true);
        assert!(p.blank());
        assert_eq!(p.read_register(PpuRegister::Status) & 0x80, 0x80);
        p.set_blank(true);
        p.set_blank(false);
        assert_eq!(p.read_register(PpuRegister::Status) & 0x80, 0);
    }
}
