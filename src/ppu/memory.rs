#![doc = r#"
PPU memory submodule

VRAM address decoding for the 14-bit PPU space plus the OAM DMA copy.

```text
$0000-$1FFF  pattern memory (loaded by the cartridge mapper)
$2000-$2FFF  four logical nametables over 2KB, per `Mirroring`
$3000-$3EFF  mirror of $2000-$2EFF
$3F00-$3FFF  32 bytes of palette RAM, mirrored every 32 bytes;
             $3F10/$3F14/$3F18/$3F1C alias $3F00/$3F04/$3F08/$3F0C
```
"#]

use super::Ppu;
use crate::cartridge::Mirroring;

enum Vram {
    Pattern(usize),
    Nametable(usize),
    Palette(usize),
}

impl Ppu {
    fn decode_vram(&self, addr: u16) -> Vram {
        let a = addr & 0x3FFF;
        match a {
            0x0000..=0x1FFF => Vram::Pattern(a as usize),
            0x2000..=0x3EFF => {
                let offset = (a - 0x2000) & 0x0FFF;
                let table = offset / 0x400;
                let physical = match self.mirroring {
                    Mirroring::Vertical => table & 1,
                    Mirroring::Horizontal => table >> 1,
                };
                Vram::Nametable(physical as usize * 0x400 + (offset & 0x3FF) as usize)
            }
            _ => {
                let mut i = (a & 0x1F) as usize;
                if i & 0x13 == 0x10 {
                    i &= 0x0F;
                }
                Vram::Palette(i)
            }
        }
    }

    pub(in crate::ppu) fn peek_vram_inner(&self, addr: u16) -> u8 {
        match self.decode_vram(addr) {
            Vram::Pattern(i) => self.pattern[i],
            Vram::Nametable(i) => self.nametables[i],
            Vram::Palette(i) => self.palette[i],
        }
    }

    pub(in crate::ppu) fn poke_vram_inner(&mut self, addr: u16, value: u8) {
        match self.decode_vram(addr) {
            Vram::Pattern(i) => self.pattern[i] = value,
            Vram::Nametable(i) => self.nametables[i] = value,
            Vram::Palette(i) => self.palette[i] = value,
        }
    }

    /// Copy 256 bytes into OAM starting at OAMADDR, wrapping. Missing bytes
    /// read as zero. OAMADDR ends where it started.
    pub(in crate::ppu) fn oam_dma_copy_inner(&mut self, data: &[u8]) {
        let mut ptr = self.oam_addr;
        for i in 0..256 {
            self.oam[ptr as usize] = data.get(i).copied().unwrap_or(0);
            ptr = ptr.wrapping_add(1);
        }
        self.oam_addr = ptr;
    }
}

#[cfg(test)]
mod tests {
    use crate::ppu::Ppu;
    use crate::video::{PpuRegister, VideoUnit};

    #[test]
    fn horizontal_mirroring_pairs_top_and_bottom() {
        let mut p = Ppu::new();
        p.init(0x00);
        p.poke_vram(0x2000, 0x11);
        p.poke_vram(0x2800, 0x22);
        assert_eq!(p.peek_vram(0x2400), 0x11);
        assert_eq!(p.peek_vram(0x2C00), 0x22);
    }

    #[test]
    fn vertical_mirroring_pairs_left_and_right() {
        let mut p = Ppu::new();
        p.init(0x01);
        p.poke_vram(0x2000, 0x11);
        p.poke_vram(0x2400, 0x22);
        assert_eq!(p.peek_vram(0x2800), 0x11);
        assert_eq!(p.peek_vram(0x2C00), 0x22);
    }

    #[test]
    fn nametable_region_mirrors_above_3000() {
        let mut p = Ppu::new();
        p.poke_vram(0x2123, 0x5A);
        assert_eq!(p.peek_vram(0x3123), 0x5A);
    }

    #[test]
    fn palette_mirrors() {
        let mut p = Ppu::new();
        p.poke_vram(0x3F10, 0x0F);
        assert_eq!(p.peek_vram(0x3F00), 0x0F);
        p.poke_vram(0x3F05, 0x16);
        assert_eq!(p.peek_vram(0x3F25), 0x16);
        p.poke_vram(0x3F11, 0x30);
        assert_eq!(p.peek_vram(0x3F01), 0x00);
        assert_eq!(p.peek_vram(0x3F11), 0x30);
    }

    #[test]
    fn pattern_space_is_writable_through_vram() {
        let mut p = Ppu::new();
        p.poke_vram(0x1234, 0x77);
        assert_eq!(p.pattern()[0x1234], 0x77);
    }

    #[test]
    fn dma_starts_at_oam_addr_and_wraps() {
        let mut p = Ppu::new();
        p.write_register(PpuRegister::SpriteAddress, 0x10);
        let data: Vec<u8> = (0..=255).collect();
        p.dma_write(&data);
        assert_eq!(p.oam()[0x10], 0);
        assert_eq!(p.oam()[0x0F], 255);
        assert_eq!(p.read_register(PpuRegister::SpriteAddress), 0x10);
    }

    #[test]
    fn short_dma_pads_with_zero() {
        let mut p = Ppu::new();
        p.dma_write(&[0xFF; 256]);
        p.dma_write(&[1, 2]);
        assert_eq!(p.oam()[1], 2);
        assert_eq!(p.oam()[2], 0);
    }
}
