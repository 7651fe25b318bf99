/*!
rmw.rs - Read-Modify-Write opcode family handler

Shifts / rotates:
    ASL: 0A (A), 06, 16, 0E, 1E
    LSR: 4A (A), 46, 56, 4E, 5E
    ROL: 2A (A), 26, 36, 2E, 3E
    ROR: 6A (A), 66, 76, 6E, 7E
Increments / decrements:
    INC: E6, F6, EE, FE
    DEC: C6, D6, CE, DE
Undocumented combinations (memory op, then an accumulator op):
    SLO (ASL + ORA), RLA (ROL + AND), SRE (LSR + EOR), RRA (ROR + ADC),
    DCP (DEC + CMP), ISB (INC + SBC)

Flags
-----
- Accumulator shifts take Z/N from the accumulator pass.
- Memory shifts and INC/DEC set Z/N from the written value and skip the pass.
- SLO/RLA/SRE/RRA/ISB take the pass on the combined accumulator.
- DCP skips it; the compare sets Z/C/N.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operands;
use crate::cpu::dispatch::{Flow, target};
use crate::cpu::execute::{add, and, compare, or, shift_left, shift_right, subtract, xor};
use crate::cpu::state::CpuState;
use crate::cpu::table::{Instruction, Mode, Op};
use crate::video::VideoUnit;

/// Apply a shift/rotate to `value`.
fn shift(cpu: &mut CpuState, op: Op, value: u8) -> u8 {
    match op {
        Op::Asl | Op::Slo => shift_left(cpu, value, false),
        Op::Rol | Op::Rla => shift_left(cpu, value, true),
        Op::Lsr | Op::Sre => shift_right(cpu, value, false),
        _ => shift_right(cpu, value, true),
    }
}

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        Op::Asl | Op::Lsr | Op::Rol | Op::Ror => {
            if ins.mode == Mode::Accumulator {
                let a = cpu.a;
                cpu.a = shift(cpu, ins.op, a);
            } else {
                let addr = target(ins, ops, cpu, bus);
                let m = bus.read(addr);
                let r = shift(cpu, ins.op, m);
                bus.write(addr, r);
                cpu.update_zn(r);
            }
        }
        Op::Inc | Op::Dec => {
            let addr = target(ins, ops, cpu, bus);
            let m = bus.read(addr);
            let r = if ins.op == Op::Inc {
                m.wrapping_add(1)
            } else {
                m.wrapping_sub(1)
            };
            bus.write(addr, r);
            cpu.update_zn(r);
        }
        Op::Slo | Op::Rla | Op::Sre | Op::Rra => {
            let addr = target(ins, ops, cpu, bus);
            let m = bus.read(addr);
            let r = shift(cpu, ins.op, m);
            bus.write(addr, r);
            let a = cpu.a;
            cpu.a = match ins.op {
                Op::Slo => or(a, r),
                Op::Rla => and(a, r),
                Op::Sre => xor(a, r),
                _ => add(cpu, a, r),
            };
        }
        Op::Dcp => {
            let addr = target(ins, ops, cpu, bus);
            let r = bus.read(addr).wrapping_sub(1);
            bus.write(addr, r);
            let a = cpu.a;
            compare(cpu, a, r);
        }
        Op::Isb => {
            let addr = target(ins, ops, cpu, bus);
            let r = bus.read(addr).wrapping_add(1);
            bus.write(addr, r);
            let a = cpu.a;
            cpu.a = subtract(cpu, a, r);
        }
        _ => return None,
    }
    Some(Flow::Advance)
}
