/*!
dispatch - Executes a single 6502 instruction.

Overview
========
One call to `step`:
1. Fetches the 3-byte window at `pc` with side-effect-free reads.
2. Decodes the opcode through the static descriptor table.
3. Runs the opcode family handler chain (load/store, logical, arithmetic,
   compare, branches, rmw, control_flow, misc, illegal).
4. Advances `pc` by the descriptor length unless the handler transferred
   control (`Flow::Jump`).
5. Applies the Zero/Negative pass on the accumulator when the descriptor
   asks for it, then forces status bit 5.

Handlers only see the operand bytes of the fetch window; they never read
instruction bytes through the bus. Execution is infallible: every byte value
decodes to something, and unknown behaviour is a no-op of the right length.

Interrupt entry is not handled here; the console harness owns it.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod illegal;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, effective_address};
use crate::cpu::state::{CpuState, UNUSED};
use crate::cpu::table::{Instruction, decode};
use crate::cpu::trace;
use crate::video::VideoUnit;

/// What the dispatcher does with `pc` after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Advance by the instruction length.
    Advance,
    /// The handler loaded `pc` itself.
    Jump,
}

/// Execute one instruction and return its descriptor.
pub fn step<V: VideoUnit>(cpu: &mut CpuState, bus: &mut Bus<V>) -> &'static Instruction {
    let pc = cpu.pc;
    let window = [
        bus.peek(pc),
        bus.peek(pc.wrapping_add(1)),
        bus.peek(pc.wrapping_add(2)),
    ];
    let ins = decode(window[0]);

    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "{:<32} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            trace::disassemble(pc, window),
            cpu.a,
            cpu.x,
            cpu.y,
            cpu.status,
            cpu.sp
        );
    }

    let ops = Operands {
        lo: window[1],
        hi: window[2],
    };
    let flow = execute(ins, ops, cpu, bus);

    if flow == Flow::Advance {
        cpu.advance_pc(ins.len as u16);
    }
    if ins.generic_flags {
        let a = cpu.a;
        cpu.update_zn(a);
    }
    cpu.status |= UNUSED;
    ins
}

fn execute<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Flow {
    load_store::handle(ins, ops, cpu, bus)
        .or_else(|| logical::handle(ins, ops, cpu, bus))
        .or_else(|| arithmetic::handle(ins, ops, cpu, bus))
        .or_else(|| compare::handle(ins, ops, cpu, bus))
        .or_else(|| branches::handle(ins, ops, cpu))
        .or_else(|| rmw::handle(ins, ops, cpu, bus))
        .or_else(|| control_flow::handle(ins, ops, cpu, bus))
        .or_else(|| misc::handle(ins, cpu, bus))
        .or_else(|| illegal::handle(ins, ops, cpu, bus))
        .unwrap_or(Flow::Advance)
}

/// Effective address for a handler whose modes all touch memory.
#[inline]
pub(crate) fn target<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &CpuState,
    bus: &mut Bus<V>,
) -> u16 {
    effective_address(ins.mode, ops, cpu, bus).unwrap_or_default()
}
