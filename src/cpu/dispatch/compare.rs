/*!
compare.rs - Compare opcode family handler

CMP: C9, C5, D5, CD, DD, D9, C1, D1
CPX: E0, E4, EC
CPY: C0, C4, CC

Z, C and N are set from `reg - operand`; the register is untouched and the
accumulator pass is skipped.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, read_operand};
use crate::cpu::dispatch::Flow;
use crate::cpu::execute::compare;
use crate::cpu::state::CpuState;
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    let reg = match ins.op {
        Op::Cmp => cpu.a,
        Op::Cpx => cpu.x,
        Op::Cpy => cpu.y,
        _ => return None,
    };
    let v = read_operand(ins.mode, ops, cpu, bus);
    compare(cpu, reg, v);
    Some(Flow::Advance)
}
