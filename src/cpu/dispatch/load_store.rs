/*!
load_store.rs - Load / Store opcode family handler

Overview
========
```text
LDA: A9, A5, B5, AD, BD, B9, A1, B1   (Z/N via the accumulator pass)
LDX: A2, A6, B6, AE, BE               (Z/N from X)
LDY: A0, A4, B4, AC, BC               (Z/N from Y)
STA: 85, 95, 8D, 9D, 99, 81, 91       (no flags)
STX: 86, 96, 8E
STY: 84, 94, 8C
LAX: A3, A7, AB, AF, B3, B7, BF       (A and X loaded; accumulator pass)
SAX: 83, 87, 8F, 97                   (stores A & X; no flags)
```
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, read_operand};
use crate::cpu::dispatch::{Flow, target};
use crate::cpu::execute::load;
use crate::cpu::state::CpuState;
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

/// Execute a load/store opcode, or return `None` if `ins` is not one.
pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        Op::Lda => {
            let v = read_operand(ins.mode, ops, cpu, bus);
            cpu.a = load(cpu.a, v);
        }
        Op::Ldx => {
            cpu.x = read_operand(ins.mode, ops, cpu, bus);
            cpu.update_zn(cpu.x);
        }
        Op::Ldy => {
            cpu.y = read_operand(ins.mode, ops, cpu, bus);
            cpu.update_zn(cpu.y);
        }
        Op::Lax => {
            let v = read_operand(ins.mode, ops, cpu, bus);
            cpu.a = v;
            cpu.x = v;
        }
        Op::Sta => {
            let addr = target(ins, ops, cpu, bus);
            bus.write(addr, cpu.a);
        }
        Op::Stx => {
            let addr = target(ins, ops, cpu, bus);
            bus.write(addr, cpu.x);
        }
        Op::Sty => {
            let addr = target(ins, ops, cpu, bus);
            bus.write(addr, cpu.y);
        }
        Op::Sax => {
            let addr = target(ins, ops, cpu, bus);
            bus.write(addr, cpu.a & cpu.x);
        }
        _ => return None,
    }
    Some(Flow::Advance)
}
