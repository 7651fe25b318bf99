/*!
control_flow.rs - Control-flow opcode family handler (JMP/JSR/RTS/RTI/BRK)

```text
JMP abs  (4C): pc = operand
JMP ind  (6C): pc = word at operand, with the $xxFF page-wrap bug
JSR abs  (20): push (pc + 2) high then low, pc = operand
RTS      (60): pull low then high, pc = pulled + 1
RTI      (40): pull status (Break cleared, bit 5 set), pull pc low then high
BRK      (00): push (pc + 2), push status with Break and bit 5 set,
               set InterruptDisable, pc = word at $FFFE
```

All of them load `pc` directly and return `Flow::Jump`, so the dispatcher
does not add the instruction length afterwards.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, addr_indirect};
use crate::cpu::dispatch::Flow;
use crate::cpu::state::{BREAK, CpuState, IRQ_DISABLE, UNUSED};
use crate::cpu::table::{Instruction, Mode, Op};
use crate::video::VideoUnit;

/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        Op::Jmp => {
            cpu.pc = if ins.mode == Mode::Indirect {
                addr_indirect(bus, ops)
            } else {
                ops.word()
            };
        }
        Op::Jsr => {
            let ret = cpu.pc.wrapping_add(2);
            cpu.push_u16(bus, ret);
            cpu.pc = ops.word();
        }
        Op::Rts => {
            cpu.pc = cpu.pop_u16(bus).wrapping_add(1);
        }
        Op::Rti => {
            let status = cpu.pop_u8(bus);
            cpu.status = (status & !BREAK) | UNUSED;
            cpu.pc = cpu.pop_u16(bus);
        }
        Op::Brk => {
            let ret = cpu.pc.wrapping_add(2);
            cpu.push_u16(bus, ret);
            let status = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, status);
            cpu.assign_flag(IRQ_DISABLE, true);
            cpu.pc = bus.read16(IRQ_VECTOR);
        }
        _ => return None,
    }
    Some(Flow::Jump)
}
