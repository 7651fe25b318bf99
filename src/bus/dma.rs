/*!
dma: sprite-memory DMA triggered by a CPU write to $4014.

Behavioral model
- A write of `value` to $4014 copies the 256-byte page starting at
  `value * 0x100` of the flat address space into the video unit's sprite
  memory in one call.
- The transfer reads the backing store directly; it does not go through the
  video register window, so source pages overlapping $2000-$2007 do not
  trigger register side effects.
- No CPU stall is modelled; timing is instruction-count based.
*/

use crate::bus::ram::Ram;
use crate::video::VideoUnit;

/// CPU address of the DMA trigger register.
pub const OAM_DMA: u16 = 0x4014;

/// Copy page `page` into the video unit's sprite memory.
#[inline]
pub(crate) fn oam_dma(ram: &Ram, page: u8, video: &mut dyn VideoUnit) {
    log::trace!("oam dma from ${:04X}", (page as u16) << 8);
    video.dma_write(ram.page(page));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockVideo;

    #[test]
    fn copies_the_whole_page() {
        let mut ram = Ram::new();
        let src: Vec<u8> = (0..=255u8).collect();
        ram.load(0x0200, &src);
        let mut video = MockVideo::default();
        oam_dma(&ram, 0x02, &mut video);
        assert_eq!(video.oam, src);
    }

    #[test]
    fn top_page_stays_in_bounds() {
        let mut ram = Ram::new();
        ram.write(0xFFFF, 0x7E);
        let mut video = MockVideo::default();
        oam_dma(&ram, 0xFF, &mut video);
        assert_eq!(video.oam.len(), 256);
        assert_eq!(video.oam[255], 0x7E);
    }
}
