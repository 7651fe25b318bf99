/*!
state.rs - 6502 register file (registers + flags) and inline-friendly helpers.

Overview
========
`CpuState` is the single owner of every architecturally visible register:
program counter, accumulator, X, Y, stack pointer and status. It excludes:
  - Bus / memory logic
  - Instruction decode / dispatch logic
Those live in the dispatch, execute and bus modules.

Invariants
==========
- Bit 5 of the status byte reads as 1 after every instruction. The dispatcher
  forces it; setters here do not mask bits.
- The stack lives on page 0x0100. A push writes at `0x0100 | sp` and then
  decrements; a pull increments and then reads. `sp` wraps naturally at 8 bits,
  matching hardware (including its wraparound bugs).

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1)
  B = BREAK (only present in bytes pushed by BRK/PHP)
  D = DECIMAL (stored, arithmetic stays binary)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

use crate::bus::Bus;
use crate::video::VideoUnit;

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000; // Always set when read.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Base of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Architectural register / flag container for the 6502 CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        // Power-up: SP=0xFD, IRQ disabled, UNUSED bit set.
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0x0000,
            status: IRQ_DISABLE | UNUSED,
        }
    }
}

impl CpuState {
    // ---------------------------------------------------------------------
    // Construction / Reset
    // ---------------------------------------------------------------------

    /// Create a new CPU state using power-up defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset registers and load PC from the reset vector at $FFFC/$FFFD.
    pub fn reset<V: VideoUnit>(&mut self, bus: &mut Bus<V>) {
        *self = Self::default();
        self.pc = bus.read16(0xFFFC);
    }

    // ---------------------------------------------------------------------
    // Basic Accessors (Read)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    // ---------------------------------------------------------------------
    // Mutators (Write)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = v;
    }

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    /// Return true if a status flag (bit mask) is set.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    /// Assign a flag bit based on boolean `value`.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// Composite helper to update ZERO + NEGATIVE according to 6502 rules.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    /// Compose the status byte for pushing to stack (BRK/PHP vs. NMI).
    ///
    /// - Bit 5 (UNUSED) always forced to 1.
    /// - BREAK bit included only if `set_break_on_push` = true.
    pub fn compose_status_for_push(&self, set_break_on_push: bool) -> u8 {
        let mut v = self.status | UNUSED;
        if set_break_on_push {
            v |= BREAK;
        } else {
            v &= !BREAK;
        }
        v
    }

    // ---------------------------------------------------------------------
    // Stack Helpers
    // ---------------------------------------------------------------------
    //   Push: write at 0x0100 | SP, then SP = SP - 1
    //   Pull: SP = SP + 1, then read at 0x0100 | SP

    /// Push a byte onto the stack.
    #[inline]
    pub fn push_u8<V: VideoUnit>(&mut self, bus: &mut Bus<V>, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack.
    #[inline]
    pub fn pop_u8<V: VideoUnit>(&mut self, bus: &mut Bus<V>) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Push a return address high byte first, as JSR/BRK/NMI do.
    #[inline]
    pub fn push_u16<V: VideoUnit>(&mut self, bus: &mut Bus<V>, value: u16) {
        self.push_u8(bus, (value >> 8) as u8);
        self.push_u8(bus, value as u8);
    }

    /// Pull a return address low byte first.
    #[inline]
    pub fn pop_u16<V: VideoUnit>(&mut self, bus: &mut Bus<V>) -> u16 {
        let lo = self.pop_u8(bus) as u16;
        let hi = self.pop_u8(bus) as u16;
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockVideo, nrom_bus};

    #[test]
    fn default_power_up() {
        let s = CpuState::new();
        assert_eq!(s.a(), 0);
        assert_eq!(s.x(), 0);
        assert_eq!(s.y(), 0);
        assert_eq!(s.sp(), 0xFD);
        assert!(s.is_flag_set(IRQ_DISABLE));
        assert!(s.is_flag_set(UNUSED));
    }

    #[test]
    fn reset_sets_pc_from_vector() {
        let mut bus = nrom_bus(&[0xEA], Some((0xC123, 0x8000, 0x8000)));
        let mut s = CpuState::new();
        s.set_a(0x55);
        s.reset(&mut bus);
        assert_eq!(s.pc(), 0xC123);
        assert_eq!(s.a(), 0);
    }

    #[test]
    fn update_zn_behavior() {
        let mut s = CpuState::new();
        s.update_zn(0x00);
        assert!(s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
        s.update_zn(0x80);
        assert!(!s.is_flag_set(ZERO));
        assert!(s.is_flag_set(NEGATIVE));
        s.update_zn(0x7F);
        assert!(!s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
    }

    #[test]
    fn pc_advance_wraps() {
        let mut s = CpuState::new();
        s.set_pc(0xFFFF);
        s.advance_pc(1);
        assert_eq!(s.pc(), 0x0000);
        s.advance_pc(2);
        assert_eq!(s.pc(), 0x0002);
    }

    #[test]
    fn push_writes_then_decrements() {
        let mut bus = Bus::new(MockVideo::default());
        let mut s = CpuState::new();
        s.push_u8(&mut bus, 0xAB);
        assert_eq!(bus.peek(0x01FD), 0xAB);
        assert_eq!(s.sp(), 0xFC);
        assert_eq!(s.pop_u8(&mut bus), 0xAB);
        assert_eq!(s.sp(), 0xFD);
    }

    #[test]
    fn stack_pointer_wraps_within_page() {
        let mut bus = Bus::new(MockVideo::default());
        let mut s = CpuState::new();
        s.set_sp(0x00);
        s.push_u8(&mut bus, 0x42);
        assert_eq!(bus.peek(0x0100), 0x42);
        assert_eq!(s.sp(), 0xFF);
        assert_eq!(s.pop_u8(&mut bus), 0x42);
        assert_eq!(s.sp(), 0x00);
    }

    #[test]
    fn word_push_is_high_byte_first() {
        let mut bus = Bus::new(MockVideo::default());
        let mut s = CpuState::new();
        s.push_u16(&mut bus, 0x1234);
        assert_eq!(bus.peek(0x01FD), 0x12);
        assert_eq!(bus.peek(0x01FC), 0x34);
        assert_eq!(s.pop_u16(&mut bus), 0x1234);
    }

    #[test]
    fn compose_status_break_flag_behavior() {
        let s = CpuState::new();
        let with_break = s.compose_status_for_push(true);
        let without_break = s.compose_status_for_push(false);
        assert_ne!(with_break & BREAK, 0);
        assert_eq!(without_break & BREAK, 0);
        assert_ne!(with_break & UNUSED, 0);
        assert_ne!(without_break & UNUSED, 0);
    }
}
