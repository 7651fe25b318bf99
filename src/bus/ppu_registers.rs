#![doc = r#"
Video register window handler

Purpose
- Single entry point for CPU-visible video register access (0x2000-0x2007).
- Reads and writes are forwarded verbatim to the video unit. The flat array
  behind this window is never touched.

Notes
- No mirroring: 0x2008..=0x3FFF are plain memory on this bus.
- Side effects (status latch reset, buffered data reads) belong to the video
  unit, not to the bus.
"#]

use crate::video::{PpuRegister, VideoUnit};

/// Handler for CPU-visible video register reads/writes.
pub struct PpuRegisters;

impl PpuRegisters {
    /// Decode `addr` into a register, if it falls in the window.
    #[inline]
    pub fn decode(addr: u16) -> Option<PpuRegister> {
        PpuRegister::from_address(addr)
    }

    #[inline]
    pub fn read<V: VideoUnit + ?Sized>(video: &mut V, reg: PpuRegister) -> u8 {
        video.read_register(reg)
    }

    #[inline]
    pub fn write<V: VideoUnit + ?Sized>(video: &mut V, reg: PpuRegister, value: u8) {
        video.write_register(reg, value);
    }
}
