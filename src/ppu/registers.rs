#![doc = r#"
PPU registers module

CPU-visible register semantics for the eight registers at $2000..$2007:
- $2002 read returns the blank flag in bit 7, clears it and resets the shared
  write toggle.
- $2004 write stores into OAM at OAMADDR and post-increments it.
- $2005/$2006 use the two-write latch (first write high / X, second low / Y).
- $2007 read is buffered below $3F00; palette reads return immediately. Both
  reads and writes advance VRAMADDR by 1 or 32 (PPUCTRL bit 2), masked to 14 bits.
"#]

use super::Ppu;
use crate::video::PpuRegister;

impl Ppu {
    pub(in crate::ppu) fn read_reg_inner(&mut self, reg: PpuRegister) -> u8 {
        match reg {
            PpuRegister::Control1 => self.ctrl,
            PpuRegister::Control2 => self.mask,
            PpuRegister::Status => {
                let v = self.status;
                self.status &= !0x80;
                self.blank = false;
                self.write_toggle = false;
                v
            }
            PpuRegister::SpriteAddress => self.oam_addr,
            PpuRegister::SpriteData => self.oam[self.oam_addr as usize],
            PpuRegister::Scroll => 0,
            PpuRegister::VramAddress => (self.vram_addr >> 8) as u8,
            PpuRegister::VramData => {
                let a = self.vram_addr & 0x3FFF;
                let value = self.peek_vram_inner(a);
                let ret = if a < 0x3F00 {
                    let out = self.vram_buffer;
                    self.vram_buffer = value;
                    out
                } else {
                    value
                };
                self.advance_vram_addr();
                ret
            }
        }
    }

    pub(in crate::ppu) fn write_reg_inner(&mut self, reg: PpuRegister, value: u8) {
        match reg {
            PpuRegister::Control1 => self.ctrl = value,
            PpuRegister::Control2 => self.mask = value,
            PpuRegister::Status => {}
            PpuRegister::SpriteAddress => self.oam_addr = value,
            PpuRegister::SpriteData => {
                self.oam[self.oam_addr as usize] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            PpuRegister::Scroll => {
                if self.write_toggle {
                    self.scroll_y = value;
                } else {
                    self.scroll_x = value;
                }
                self.write_toggle = !self.write_toggle;
            }
            PpuRegister::VramAddress => {
                if self.write_toggle {
                    self.vram_addr = (self.vram_addr & 0x3F00) | value as u16;
                } else {
                    self.vram_addr = (self.vram_addr & 0x00FF) | ((value as u16 & 0x3F) << 8);
                }
                self.write_toggle = !self.write_toggle;
            }
            PpuRegister::VramData => {
                self.poke_vram_inner(self.vram_addr, value);
                self.advance_vram_addr();
            }
        }
    }

    fn advance_vram_addr(&mut self) {
        self.vram_addr = self.vram_addr.wrapping_add(self.vram_increment_step()) & 0x3FFF;
    }
}
