//! Shared test utilities: minimal iNES (v1) image builders and a recording
//! video unit.
//!
//! These helpers de-duplicate setup across tests in the CPU, Bus, Mapper and
//! Console modules. They intentionally support just what the test suite
//! needs.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units (0 => no CHR ROM)
//! - byte 6 = Flags 6 (mirroring, trainer, mapper low nibble)
//! - byte 7 = Flags 7 (mapper high nibble)
//! - byte 9 = region (bit 0 set => PAL)
//!
//! Vectors:
//! - For 16 KiB PRG: vectors are at PRG offset 0x3FFA..=0x3FFF
//! - For 32 KiB PRG: vectors are at PRG offset 0x7FFA..=0x7FFF

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::mapper::Mapper;
use crate::video::{PpuRegister, VideoUnit};

/// Build a minimal iNES (v1) image with configurable PRG/CHR sizes and flags.
///
/// - `prg_16k`: number of 16 KiB PRG units
/// - `chr_8k`: number of 8 KiB CHR units
/// - `flags6`: iNES Flags 6 (mirroring, trainer, mapper low nibble)
/// - `flags7`: iNES Flags 7 (mapper high nibble)
/// - `flags9`: iNES Flags 9 (region)
/// - `trainer`: optional 512-byte trainer to insert after header
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    flags9: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    // Header
    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.push(0);
    bytes.push(flags9);
    bytes.extend_from_slice(&[0u8; 6]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }

    // PRG ROM payload (pattern-filled for tests)
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    // CHR ROM payload
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));

    bytes
}

/// Build a mapper-0 image with `prg` placed at the start of a single 16 KiB
/// bank (mirrored at 0x8000 and 0xC000) and vectors set.
///
/// - `vectors`: optional (reset, nmi, irq). Defaults to (0x8000, 0x8000, 0x8000)
pub fn build_nrom_with_prg(prg: &[u8], chr_8k: usize, vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    assert!(
        prg.len() <= 16 * 1024,
        "Program must fit within a 16 KiB PRG bank"
    );

    let mut rom = build_ines(1, chr_8k, 0, 0, 0, None);
    let prg_start = 16;
    let prg_end = prg_start + 16 * 1024;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, nmi, irq);
    rom
}

/// Build an MMC1 image of `prg_16k` banks where bank `i` is filled with `i`.
/// Vectors are written into the last bank and point at 0xC000.
pub fn build_mmc1(prg_16k: usize, chr_8k: usize) -> Vec<u8> {
    let mut rom = build_ines(prg_16k, chr_8k, 0x10, 0x00, 0, None);
    for bank in 0..prg_16k {
        let start = 16 + bank * 0x4000;
        rom[start..start + 0x4000].fill(bank as u8);
    }
    let last = 16 + (prg_16k - 1) * 0x4000;
    set_vectors_in_prg(&mut rom[last..last + 0x4000], 0xC000, 0xC000, 0xC000);
    rom
}

/// Write CPU vectors (NMI, RESET, IRQ/BRK) into a PRG slice that is either
/// 16 KiB or 32 KiB. Panics if PRG length is something else.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!(
            "Unsupported PRG length for vector placement: {} bytes (expected 16 KiB or 32 KiB)",
            other
        ),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

/// A bus with a mapper-0 cartridge holding `prg` at 0x8000 (mirrored at 0xC000).
pub fn nrom_bus(prg: &[u8], vectors: Option<(u16, u16, u16)>) -> Bus<MockVideo> {
    let image = build_nrom_with_prg(prg, 0, vectors);
    let cart = Cartridge::from_ines_bytes(&image).expect("valid test image");
    let mapper = Mapper::new(cart).expect("mapper 0");
    let mut bus = Bus::new(MockVideo::default());
    bus.install_mapper(mapper);
    bus
}

/// Recording video unit.
///
/// Register reads return `register_values[reg]`; everything else is logged
/// into public fields for assertions.
#[derive(Debug, Clone)]
pub struct MockVideo {
    pub register_values: [u8; 8],
    pub reads: Vec<PpuRegister>,
    pub writes: Vec<(PpuRegister, u8)>,
    pub oam: Vec<u8>,
    pub dma_count: usize,
    pub pattern: Vec<u8>,
    pub pattern_loads: Vec<(u16, usize)>,
    pub init_config: Option<u8>,
    pub renders: usize,
    pub blank: bool,
    pub blank_sets: Vec<bool>,
}

impl Default for MockVideo {
    fn default() -> Self {
        Self {
            register_values: [0; 8],
            reads: Vec::new(),
            writes: Vec::new(),
            oam: Vec::new(),
            dma_count: 0,
            pattern: vec![0; 0x2000],
            pattern_loads: Vec::new(),
            init_config: None,
            renders: 0,
            blank: false,
            blank_sets: Vec::new(),
        }
    }
}

impl VideoUnit for MockVideo {
    fn read_register(&mut self, reg: PpuRegister) -> u8 {
        self.reads.push(reg);
        self.register_values[reg as usize]
    }

    fn write_register(&mut self, reg: PpuRegister, value: u8) {
        self.writes.push((reg, value));
    }

    fn dma_write(&mut self, data: &[u8]) {
        self.oam = data.to_vec();
        self.dma_count += 1;
    }

    fn set_pattern_memory(&mut self, offset: u16, data: &[u8]) {
        let start = offset as usize;
        self.pattern[start..start + data.len()].copy_from_slice(data);
        self.pattern_loads.push((offset, data.len()));
    }

    fn init(&mut self, config: u8) {
        self.init_config = Some(config);
    }

    fn render(&mut self, frame: &mut [u8]) {
        self.renders += 1;
        if let Some(first) = frame.first_mut() {
            *first = self.renders as u8;
        }
    }

    fn set_blank(&mut self, blank: bool) {
        self.blank = blank;
        self.blank_sets.push(blank);
    }

    fn blank(&self) -> bool {
        self.blank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[9], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x3FFA], 0x56);
        assert_eq!(prg[0x3FFB], 0x84);
        assert_eq!(prg[0x3FFC], 0x23);
        assert_eq!(prg[0x3FFD], 0x81);
        assert_eq!(prg[0x3FFE], 0xBC);
        assert_eq!(prg[0x3FFF], 0x8A);
    }

    #[test]
    fn nrom_bus_maps_program() {
        let bus = nrom_bus(&[0xA9, 0x05], Some((0x8000, 0x9000, 0xA000)));
        assert_eq!(bus.peek(0x8000), 0xA9);
        assert_eq!(bus.peek(0xC001), 0x05);
        assert_eq!(bus.peek(0xFFFA), 0x00);
        assert_eq!(bus.peek(0xFFFB), 0x90);
    }

    #[test]
    fn mmc1_image_marks_banks() {
        let rom = build_mmc1(4, 0);
        assert_eq!(rom[6] >> 4, 1);
        assert_eq!(rom[16 + 0x4000 * 2], 2);
    }
}
