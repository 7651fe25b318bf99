/*!
misc.rs - Transfers, stack, flag and no-op opcodes

Transfers:
    TAX (AA), TAY (A8), TSX (BA)      Z/N from the destination register
    TXA (8A), TYA (98)                Z/N via the accumulator pass
    TXS (9A)                          no flags
Register increments:
    INX (E8), INY (C8), DEX (CA), DEY (88)
Stack:
    PHA (48), PHP (08, pushes Break and bit 5 set), PLA (68), PLP (28, Break cleared)
Flags:
    CLC (18), SEC (38), CLI (58), SEI (78), CLV (B8), CLD (D8), SED (F8)
No-ops:
    NOP (EA and the undocumented implied / immediate / zp / abs forms),
    JAM (x2 column). Neither touches the bus.
*/

use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::state::{BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, OVERFLOW, UNUSED};
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        // Transfers
        Op::Tax => {
            cpu.x = cpu.a;
            cpu.update_zn(cpu.x);
        }
        Op::Tay => {
            cpu.y = cpu.a;
            cpu.update_zn(cpu.y);
        }
        Op::Tsx => {
            cpu.x = cpu.sp;
            cpu.update_zn(cpu.x);
        }
        Op::Txa => cpu.a = cpu.x,
        Op::Tya => cpu.a = cpu.y,
        Op::Txs => cpu.sp = cpu.x,

        // Register increments
        Op::Inx => {
            cpu.x = cpu.x.wrapping_add(1);
            cpu.update_zn(cpu.x);
        }
        Op::Iny => {
            cpu.y = cpu.y.wrapping_add(1);
            cpu.update_zn(cpu.y);
        }
        Op::Dex => {
            cpu.x = cpu.x.wrapping_sub(1);
            cpu.update_zn(cpu.x);
        }
        Op::Dey => {
            cpu.y = cpu.y.wrapping_sub(1);
            cpu.update_zn(cpu.y);
        }

        // Stack
        Op::Pha => {
            let a = cpu.a;
            cpu.push_u8(bus, a);
        }
        Op::Php => {
            let status = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, status);
        }
        Op::Pla => cpu.a = cpu.pop_u8(bus),
        Op::Plp => {
            let status = cpu.pop_u8(bus);
            cpu.status = (status & !BREAK) | UNUSED;
        }

        // Flags
        Op::Clc => cpu.assign_flag(CARRY, false),
        Op::Sec => cpu.assign_flag(CARRY, true),
        Op::Cli => cpu.assign_flag(IRQ_DISABLE, false),
        Op::Sei => cpu.assign_flag(IRQ_DISABLE, true),
        Op::Clv => cpu.assign_flag(OVERFLOW, false),
        Op::Cld => cpu.assign_flag(DECIMAL, false),
        Op::Sed => cpu.assign_flag(DECIMAL, true),

        Op::Nop => {}
        Op::Jam => log::debug!("JAM opcode at ${:04X} executed as no-op", cpu.pc),

        _ => return None,
    }
    Some(Flow::Advance)
}
