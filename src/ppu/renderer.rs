#![doc = r#"
PPU renderer module

`Ppu::render_frame` draws a complete picture in one pass, not cycle-accurate:
- Background: nametable 0 ($2000) with its attribute table, pattern table
  selected by PPUCTRL bit 4, shown when PPUMASK bit 3 is set.
- Sprites: 64 OAM entries as 8x8 tiles, pattern table selected by PPUCTRL
  bit 3, horizontal/vertical flip and behind-background priority, shown when
  PPUMASK bit 4 is set. Lower OAM indices win.

Pixels are written as RGBA into the caller's buffer; anything past its end
is dropped.
"#]

use super::*;

impl Ppu {
    /// Render a full frame (background, then sprite overlay) into `frame`.
    pub fn render_frame(&self, frame: &mut [u8]) {
        let mut rgba_cache = [[0u8; 4]; 64];
        for (rgba, c) in rgba_cache.iter_mut().zip(NES_PALETTE.iter()) {
            *rgba = [c[0], c[1], c[2], 0xFF];
        }
        let color = |entry: u8| rgba_cache[(entry & 0x3F) as usize];

        let backdrop = color(self.palette[0]);
        for px in frame.chunks_exact_mut(BYTES_PER_PIXEL).take(NES_WIDTH * NES_HEIGHT) {
            px.copy_from_slice(&backdrop);
        }

        let mut bg_opaque = vec![false; NES_WIDTH * NES_HEIGHT];
        if self.mask & 0x08 != 0 {
            self.draw_background(frame, &mut bg_opaque, &color);
        }
        if self.mask & 0x10 != 0 {
            self.draw_sprites(frame, &bg_opaque, &color);
        }
    }

    fn draw_background(
        &self,
        frame: &mut [u8],
        bg_opaque: &mut [bool],
        color: &impl Fn(u8) -> [u8; 4],
    ) {
        let pattern_base = if self.ctrl & 0x10 != 0 { 0x1000 } else { 0x0000 };

        for tile_y in 0..30 {
            let attr_row_quad_y = (tile_y % 4) / 2;
            for tile_x in 0..32 {
                let tile_id = self.peek_vram_inner(0x2000 + (tile_y * 32 + tile_x) as u16);
                let attr = self.peek_vram_inner(0x23C0 + ((tile_y / 4) * 8 + tile_x / 4) as u16);
                let quadrant = attr_row_quad_y * 2 + (tile_x % 4) / 2;
                let group = (attr >> (quadrant * 2)) & 0x03;

                for row in 0..8 {
                    let addr = pattern_base + tile_id as usize * 16 + row;
                    let (low, high) = (self.pattern[addr], self.pattern[addr + 8]);
                    let py = tile_y * 8 + row;
                    for bit in 0..8 {
                        let ci = pixel_index(low, high, (7 - bit) as u8);
                        if ci == 0 {
                            continue;
                        }
                        let px = tile_x * 8 + bit;
                        let entry = self.palette[(group * 4 + ci) as usize];
                        put_pixel(frame, px, py, color(entry));
                        bg_opaque[py * NES_WIDTH + px] = true;
                    }
                }
            }
        }
    }

    fn draw_sprites(&self, frame: &mut [u8], bg_opaque: &[bool], color: &impl Fn(u8) -> [u8; 4]) {
        let pattern_base = if self.ctrl & 0x08 != 0 { 0x1000 } else { 0x0000 };

        // Reverse order so lower OAM indices are drawn last.
        for sprite in self.oam.chunks_exact(4).rev() {
            let [y, tile, attr, x] = [sprite[0], sprite[1], sprite[2], sprite[3]];
            let flip_v = attr & 0x80 != 0;
            let flip_h = attr & 0x40 != 0;
            let behind_bg = attr & 0x20 != 0;
            let group = attr & 0x03;

            for row in 0..8usize {
                let sy = y as usize + row;
                if sy >= NES_HEIGHT {
                    break;
                }
                let eff_row = if flip_v { 7 - row } else { row };
                let addr = pattern_base + tile as usize * 16 + eff_row;
                let (low, high) = (self.pattern[addr], self.pattern[addr + 8]);

                for col in 0..8usize {
                    let sx = x as usize + col;
                    if sx >= NES_WIDTH {
                        break;
                    }
                    let shift = if flip_h { col } else { 7 - col };
                    let ci = pixel_index(low, high, shift as u8);
                    if ci == 0 || (behind_bg && bg_opaque[sy * NES_WIDTH + sx]) {
                        continue;
                    }
                    let entry = self.palette[(0x10 + group * 4 + ci) as usize];
                    put_pixel(frame, sx, sy, color(entry));
                }
            }
        }
    }
}

/// Two-bit color index from the pattern planes at `shift`.
#[inline]
fn pixel_index(low: u8, high: u8, shift: u8) -> u8 {
    (((high >> shift) & 1) << 1) | ((low >> shift) & 1)
}

#[inline]
fn put_pixel(frame: &mut [u8], x: usize, y: usize, rgba: [u8; 4]) {
    let fi = (y * NES_WIDTH + x) * BYTES_PER_PIXEL;
    if let Some(px) = frame.get_mut(fi..fi + BYTES_PER_PIXEL) {
        px.copy_from_slice(&rgba);
    }
}
