/*!
execute.rs - ALU helpers shared by the dispatch handlers.

Overview
========
Each helper takes the accumulator (or another register) and the operand and
returns the 8-bit result. The carry flag is read implicitly from the
register file. A helper only touches the flags listed for it; everything
else (Zero/Negative on the accumulator) is left to the generic flag pass the
dispatcher applies after the instruction.

```text
helper          flags written
------          -------------
or/and/xor/load none
shift_left      C
shift_right     C
compare         Z, C, N
bit_test        Z, V, N
add             C, V
subtract        C, V
```

Arithmetic is binary only. The Decimal flag is stored by SED/CLD but never
consulted here.
*/

use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};

// ---------------------------------------------------------------------------
// Bitwise / load
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn or(a: u8, operand: u8) -> u8 {
    a | operand
}

#[inline]
pub(crate) fn and(a: u8, operand: u8) -> u8 {
    a & operand
}

#[inline]
pub(crate) fn xor(a: u8, operand: u8) -> u8 {
    a ^ operand
}

#[inline]
pub(crate) fn load(_a: u8, operand: u8) -> u8 {
    operand
}

// ---------------------------------------------------------------------------
// Shifts / rotates
// ---------------------------------------------------------------------------

/// ASL (`rotate == false`) or ROL (`rotate == true`).
#[inline]
pub(crate) fn shift_left<C: CpuRegs>(cpu: &mut C, value: u8, rotate: bool) -> u8 {
    let carry_in = if rotate { cpu.carry_in() } else { 0 };
    cpu.assign_flag(CARRY, value & 0x80 != 0);
    (value << 1) | carry_in
}

/// LSR (`rotate == false`) or ROR (`rotate == true`).
#[inline]
pub(crate) fn shift_right<C: CpuRegs>(cpu: &mut C, value: u8, rotate: bool) -> u8 {
    let carry_in = if rotate { cpu.carry_in() << 7 } else { 0 };
    cpu.assign_flag(CARRY, value & 0x01 != 0);
    (value >> 1) | carry_in
}

// ---------------------------------------------------------------------------
// Compare / BIT
// ---------------------------------------------------------------------------

/// CMP/CPX/CPY: flags from `reg - operand`; the register is untouched.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, operand: u8) {
    cpu.assign_flag(CARRY, reg >= operand);
    cpu.assign_flag(ZERO, reg == operand);
    cpu.assign_flag(NEGATIVE, reg.wrapping_sub(operand) & 0x80 != 0);
}

/// BIT: N and V copied from the operand, Z from `a & operand`.
#[inline]
pub(crate) fn bit_test<C: CpuRegs>(cpu: &mut C, a: u8, operand: u8) {
    cpu.assign_flag(NEGATIVE, operand & 0x80 != 0);
    cpu.assign_flag(OVERFLOW, operand & 0x40 != 0);
    cpu.assign_flag(ZERO, a & operand == 0);
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// `a + operand + C`. Carry-out when the widened sum exceeds 255; overflow
/// when both inputs share a sign the result does not.
#[inline]
pub(crate) fn add<C: CpuRegs>(cpu: &mut C, a: u8, operand: u8) -> u8 {
    let sum = a as u16 + operand as u16 + cpu.carry_in() as u16;
    let result = sum as u8;
    cpu.assign_flag(CARRY, sum > 0xFF);
    cpu.assign_flag(OVERFLOW, (!(a ^ operand) & (a ^ result) & 0x80) != 0);
    result
}

/// `a - operand - (1 - C)`. Carry-out is the complement of the borrow.
#[inline]
pub(crate) fn subtract<C: CpuRegs>(cpu: &mut C, a: u8, operand: u8) -> u8 {
    let borrow = 1 - cpu.carry_in() as i16;
    let diff = a as i16 - operand as i16 - borrow;
    let result = diff as u8;
    cpu.assign_flag(CARRY, diff >= 0);
    cpu.assign_flag(OVERFLOW, ((a ^ operand) & (a ^ result) & 0x80) != 0);
    result
}

// ---------------------------------------------------------------------------
// Branch helper
// ---------------------------------------------------------------------------

/// Apply a signed 8-bit displacement to `pc`.
#[inline]
pub(crate) fn branch_target(pc: u16, displacement: u8) -> u16 {
    pc.wrapping_add(displacement as i8 as u16)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
