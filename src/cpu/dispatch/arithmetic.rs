/*!
arithmetic.rs - ADC / SBC opcode family handler

ADC: 69, 65, 75, 6D, 7D, 79, 61, 71
SBC: E9, E5, F5, ED, FD, F9, E1, F1
USBC: EB (undocumented SBC immediate)

Binary arithmetic only; the Decimal flag is ignored. C and V come from the
ALU helpers, Z/N from the accumulator pass.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, read_operand};
use crate::cpu::dispatch::Flow;
use crate::cpu::execute::{add, subtract};
use crate::cpu::state::CpuState;
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        Op::Adc => {
            let v = read_operand(ins.mode, ops, cpu, bus);
            let a = cpu.a;
            cpu.a = add(cpu, a, v);
        }
        Op::Sbc | Op::Usbc => {
            let v = read_operand(ins.mode, ops, cpu, bus);
            let a = cpu.a;
            cpu.a = subtract(cpu, a, v);
        }
        _ => return None,
    }
    Some(Flow::Advance)
}
