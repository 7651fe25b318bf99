/*!
logical.rs - Logical opcode family handler

ORA: 09, 05, 15, 0D, 1D, 19, 01, 11
AND: 29, 25, 35, 2D, 3D, 39, 21, 31
EOR: 49, 45, 55, 4D, 5D, 59, 41, 51
BIT: 24, 2C

ORA/AND/EOR leave Z/N to the accumulator pass. BIT sets N, V and Z itself
and skips the pass.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, read_operand};
use crate::cpu::dispatch::Flow;
use crate::cpu::execute::{and, bit_test, or, xor};
use crate::cpu::state::CpuState;
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    let f: fn(u8, u8) -> u8 = match ins.op {
        Op::Ora => or,
        Op::And => and,
        Op::Eor => xor,
        Op::Bit => {
            let v = read_operand(ins.mode, ops, cpu, bus);
            let a = cpu.a;
            bit_test(cpu, a, v);
            return Some(Flow::Advance);
        }
        _ => return None,
    };
    let v = read_operand(ins.mode, ops, cpu, bus);
    cpu.a = f(cpu.a, v);
    Some(Flow::Advance)
}
