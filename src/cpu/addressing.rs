/*!
addressing.rs - 6502 effective-address resolution (shared by dispatch)

Overview
========
The dispatcher fetches a fixed 3-byte window at `pc` (opcode plus up to two
operand bytes) before executing. The helpers here turn the operand bytes of
that window into an effective address for every memory-touching addressing
mode.

Scope & Responsibilities
=======================
- Pure address / operand resolution only; PC is never modified here (the
  dispatcher advances it by the descriptor's length afterwards).
- Zero-page indexed modes wrap within page zero (`& 0xFF`).
- Absolute indexed modes and (ind),Y wrap at 16 bits.
- Pointer reads go through `Bus::read16`, so the page-wrap quirk applies to
  JMP ($xxFF), to (ind,X) pointers at $FF, and to (ind),Y bases at $FF.

Function Inventory
------------------
addr_zp / addr_zp_x / addr_zp_y
addr_abs / addr_abs_x / addr_abs_y
addr_ind_x / addr_ind_y / addr_indirect
effective_address(mode, ..) -> Option<u16>
read_operand(mode, ..) -> u8
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;
use crate::cpu::table::Mode;
use crate::video::VideoUnit;

/// Operand bytes following the opcode in the fetch window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operands {
    pub lo: u8,
    pub hi: u8,
}

impl Operands {
    #[inline]
    pub fn word(self) -> u16 {
        u16::from_le_bytes([self.lo, self.hi])
    }
}

// -------------------------
// Basic addressing helpers
// -------------------------

#[inline]
pub(crate) fn addr_zp(ops: Operands) -> u16 {
    ops.lo as u16
}

#[inline]
pub(crate) fn addr_zp_x(ops: Operands, x: u8) -> u16 {
    ops.lo.wrapping_add(x) as u16
}

#[inline]
pub(crate) fn addr_zp_y(ops: Operands, y: u8) -> u16 {
    ops.lo.wrapping_add(y) as u16
}

#[inline]
pub(crate) fn addr_abs(ops: Operands) -> u16 {
    ops.word()
}

#[inline]
pub(crate) fn addr_abs_x(ops: Operands, x: u8) -> u16 {
    ops.word().wrapping_add(x as u16)
}

#[inline]
pub(crate) fn addr_abs_y(ops: Operands, y: u8) -> u16 {
    ops.word().wrapping_add(y as u16)
}

/// ($nn,X): pointer at `(nn + X) & 0xFF`.
#[inline]
pub(crate) fn addr_ind_x<V: VideoUnit>(bus: &mut Bus<V>, ops: Operands, x: u8) -> u16 {
    bus.read16(ops.lo.wrapping_add(x) as u16)
}

/// ($nn),Y: pointer at `nn`, then + Y with 16-bit wrap.
#[inline]
pub(crate) fn addr_ind_y<V: VideoUnit>(bus: &mut Bus<V>, ops: Operands, y: u8) -> u16 {
    bus.read16(ops.lo as u16).wrapping_add(y as u16)
}

/// JMP ($nnnn) target, with the same-page wrap when the pointer ends in $FF.
#[inline]
pub(crate) fn addr_indirect<V: VideoUnit>(bus: &mut Bus<V>, ops: Operands) -> u16 {
    bus.read16(ops.word())
}

/// Resolve the effective address for memory-touching modes.
/// Returns `None` for implied, accumulator, immediate and relative modes.
pub(crate) fn effective_address<V: VideoUnit>(
    mode: Mode,
    ops: Operands,
    cpu: &CpuState,
    bus: &mut Bus<V>,
) -> Option<u16> {
    let addr = match mode {
        Mode::ZeroPage => addr_zp(ops),
        Mode::ZeroPageX => addr_zp_x(ops, cpu.x),
        Mode::ZeroPageY => addr_zp_y(ops, cpu.y),
        Mode::Absolute => addr_abs(ops),
        Mode::AbsoluteX => addr_abs_x(ops, cpu.x),
        Mode::AbsoluteY => addr_abs_y(ops, cpu.y),
        Mode::Indirect => addr_indirect(bus, ops),
        Mode::IndexedIndirect => addr_ind_x(bus, ops, cpu.x),
        Mode::IndirectIndexed => addr_ind_y(bus, ops, cpu.y),
        Mode::Implied | Mode::Accumulator | Mode::Immediate | Mode::Relative => return None,
    };
    Some(addr)
}

/// Fetch the operand value: the immediate byte, the accumulator, or memory
/// at the effective address.
pub(crate) fn read_operand<V: VideoUnit>(
    mode: Mode,
    ops: Operands,
    cpu: &CpuState,
    bus: &mut Bus<V>,
) -> u8 {
    match mode {
        Mode::Immediate | Mode::Relative => ops.lo,
        Mode::Accumulator => cpu.a,
        Mode::Implied => 0,
        _ => match effective_address(mode, ops, cpu, bus) {
            Some(addr) => bus.read(addr),
            None => 0,
        },
    }
}

// ---------------
// Tests
// ---------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockVideo;

    fn ops(lo: u8, hi: u8) -> Operands {
        Operands { lo, hi }
    }

    #[test]
    fn zero_page_indexed_wraps_in_page_zero() {
        assert_eq!(addr_zp_x(ops(0xF0, 0), 0x20), 0x0010);
        assert_eq!(addr_zp_y(ops(0xFF, 0), 0x01), 0x0000);
    }

    #[test]
    fn absolute_indexed_wraps_at_16_bits() {
        assert_eq!(addr_abs_x(ops(0xF5, 0x80), 0x10), 0x8105);
        assert_eq!(addr_abs_y(ops(0xFF, 0xFF), 0x02), 0x0001);
    }

    #[test]
    fn indexed_indirect_pointer_wraps() {
        let mut bus = Bus::new(MockVideo::default());
        // Pointer at $FF/$00 (wraps within page zero).
        bus.write(0x00FF, 0x34);
        bus.write(0x0000, 0x12);
        bus.write(0x0100, 0x99);
        assert_eq!(addr_ind_x(&mut bus, ops(0xFE, 0), 0x01), 0x1234);
    }

    #[test]
    fn indirect_indexed_adds_y_after_pointer() {
        let mut bus = Bus::new(MockVideo::default());
        bus.write(0x0040, 0xFF);
        bus.write(0x0041, 0x02);
        assert_eq!(addr_ind_y(&mut bus, ops(0x40, 0), 0x01), 0x0300);
    }

    #[test]
    fn indirect_jmp_bug() {
        // Vector at $10FF (lo) and $1000 (hi wraps to $1000, not $1100)
        let mut bus = Bus::new(MockVideo::default());
        bus.write(0x10FF, 0x34);
        bus.write(0x1000, 0x12);
        bus.write(0x1100, 0x56);
        assert_eq!(addr_indirect(&mut bus, ops(0xFF, 0x10)), 0x1234);
    }

    #[test]
    fn non_memory_modes_have_no_address() {
        let mut bus = Bus::new(MockVideo::default());
        let cpu = CpuState::new();
        for mode in [Mode::Implied, Mode::Accumulator, Mode::Immediate, Mode::Relative] {
            assert_eq!(effective_address(mode, ops(1, 2), &cpu, &mut bus), None);
        }
    }

    #[test]
    fn read_operand_sources() {
        let mut bus = Bus::new(MockVideo::default());
        let mut cpu = CpuState::new();
        cpu.a = 0x77;
        cpu.x = 0x01;
        bus.write(0x0011, 0x42);
        assert_eq!(read_operand(Mode::Immediate, ops(0x05, 0), &cpu, &mut bus), 0x05);
        assert_eq!(read_operand(Mode::Accumulator, ops(0x05, 0), &cpu, &mut bus), 0x77);
        assert_eq!(read_operand(Mode::ZeroPageX, ops(0x10, 0), &cpu, &mut bus), 0x42);
    }
}
