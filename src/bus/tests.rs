use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::mapper::Mapper;
use crate::test_utils::{MockVideo, build_mmc1, nrom_bus};
use crate::video::PpuRegister;

fn mmc1_bus(prg_16k: usize) -> Bus<MockVideo> {
    let cart = Cartridge::from_ines_bytes(&build_mmc1(prg_16k, 0)).expect("parse");
    let mut bus = Bus::new(MockVideo::default());
    bus.install_mapper(Mapper::new(cart).expect("mmc1"));
    bus
}

/// Helper for MMC1 serial writes (5 LSB-first writes).
fn mmc1_serial_write(bus: &mut Bus<MockVideo>, addr: u16, value5: u8) {
    for i in 0..5 {
        let bit = (value5 >> i) & 1;
        bus.write(addr, bit);
    }
}

#[test]
fn flat_memory_has_no_mirroring() {
    let mut bus = Bus::new(MockVideo::default());
    bus.write(0x0001, 0x42);
    assert_eq!(bus.read(0x0001), 0x42);
    assert_eq!(bus.read(0x0801), 0x00);
    bus.write(0x2008, 0x11);
    assert_eq!(bus.read(0x2008), 0x11, "0x2008 is plain memory");
    bus.write(0x6000, 0x77);
    assert_eq!(bus.read(0x6000), 0x77);
}

#[test]
fn read16_little_endian() {
    let mut bus = Bus::new(MockVideo::default());
    bus.write(0x0010, 0x34);
    bus.write(0x0011, 0x12);
    assert_eq!(bus.read16(0x0010), 0x1234);
}

#[test]
fn read16_wraps_within_page() {
    let mut bus = Bus::new(MockVideo::default());
    bus.write(0x12FF, 0xCD);
    bus.write(0x1200, 0xAB);
    bus.write(0x1300, 0xEE);
    assert_eq!(bus.read16(0x12FF), 0xABCD);
}

#[test]
fn read16_zero_page_top_wraps_to_zero() {
    let mut bus = Bus::new(MockVideo::default());
    bus.write(0x00FF, 0x01);
    bus.write(0x0000, 0x80);
    assert_eq!(bus.read16(0x00FF), 0x8001);
}

#[test]
fn video_registers_are_forwarded() {
    let mut bus = Bus::new(MockVideo::default());
    bus.video_mut().register_values[PpuRegister::Status as usize] = 0x80;

    for reg in PpuRegister::ALL {
        bus.write(reg.address(), reg as u8 + 1);
    }
    assert_eq!(bus.read(0x2002), 0x80);

    let video = bus.video();
    assert_eq!(video.writes.len(), 8);
    assert_eq!(video.writes[0], (PpuRegister::Control1, 1));
    assert_eq!(video.writes[7], (PpuRegister::VramData, 8));
    assert_eq!(video.reads, vec![PpuRegister::Status]);
    // Never lands in the flat array.
    assert_eq!(bus.peek(0x2000), 0);
}

#[test]
fn dma_copies_page_to_video() {
    let mut bus = Bus::new(MockVideo::default());
    for i in 0..256u16 {
        bus.write(0x0300 + i, i as u8);
    }
    bus.write(0x4014, 0x03);
    let video = bus.video();
    assert_eq!(video.dma_count, 1);
    assert_eq!(video.oam.len(), 256);
    assert_eq!(video.oam[0x7F], 0x7F);
    assert_eq!(bus.peek(0x4014), 0, "DMA register is not stored");
}

#[test]
fn rom_write_without_mapper_is_ignored() {
    let mut bus = Bus::new(MockVideo::default());
    bus.write(0x8000, 0x55);
    bus.write(0xFFFF, 0x55);
    assert_eq!(bus.read(0x8000), 0);
    assert_eq!(bus.read(0xFFFF), 0);
    assert!(bus.mapper().is_none());
}

#[test]
fn rom_write_with_no_mapper_board_is_ignored() {
    let mut bus = nrom_bus(&[0xEA], None);
    bus.write(0x8000, 0x00);
    assert_eq!(bus.read(0x8000), 0xEA);
    assert_eq!(bus.mapper().map(Mapper::name), Some("NoMapper"));
}

#[test]
fn rom_writes_reach_the_mapper() {
    let mut bus = mmc1_bus(8);
    assert_eq!(bus.read(0x8000), 6);
    assert_eq!(bus.read(0xC000), 7);

    mmc1_serial_write(&mut bus, 0xE000, 3);
    assert_eq!(bus.read(0x8000), 3);
    assert_eq!(bus.read(0xC000), 7);
}

#[test]
fn install_mapper_replaces_previous() {
    let mut bus = nrom_bus(&[0xEA], None);
    let cart = Cartridge::from_ines_bytes(&build_mmc1(2, 0)).expect("parse");
    bus.install_mapper(Mapper::new(cart).expect("mmc1"));
    assert_eq!(bus.mapper().map(Mapper::name), Some("MMC1"));
    assert_eq!(bus.read(0x8000), 0);
    assert_eq!(bus.read(0xC000), 1);
}
