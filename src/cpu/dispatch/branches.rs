/*!
branches.rs - Relative branch opcode handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Each branch tests one status bit. When taken, the signed displacement is
added to `pc`; the dispatcher then adds the instruction length (2) either
way, so a taken branch lands at `pc + 2 + displacement`.
*/

use crate::cpu::addressing::Operands;
use crate::cpu::dispatch::Flow;
use crate::cpu::execute::branch_target;
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle(ins: &Instruction, ops: Operands, cpu: &mut CpuState) -> Option<Flow> {
    let taken = match ins.op {
        Op::Bpl => !cpu.is_flag_set(NEGATIVE),
        Op::Bmi => cpu.is_flag_set(NEGATIVE),
        Op::Bvc => !cpu.is_flag_set(OVERFLOW),
        Op::Bvs => cpu.is_flag_set(OVERFLOW),
        Op::Bcc => !cpu.is_flag_set(CARRY),
        Op::Bcs => cpu.is_flag_set(CARRY),
        Op::Bne => !cpu.is_flag_set(ZERO),
        Op::Beq => cpu.is_flag_set(ZERO),
        _ => return None,
    };
    if taken {
        cpu.pc = branch_target(cpu.pc, ops.lo);
    }
    Some(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use crate::cpu::dispatch::step;
    use crate::cpu::dispatch::test_support::setup;
    use crate::cpu::state::{CARRY, ZERO};

    #[test]
    fn taken_forward() {
        // BEQ +4 with Z set
        let (mut cpu, mut bus) = setup(&[0xF0, 0x04]);
        cpu.status |= ZERO;
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8006);
    }

    #[test]
    fn not_taken() {
        let (mut cpu, mut bus) = setup(&[0xF0, 0x04]);
        cpu.status &= !ZERO;
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8002);
    }

    #[test]
    fn taken_backward_to_self() {
        // BCS -2 loops on itself
        let (mut cpu, mut bus) = setup(&[0xB0, 0xFE]);
        cpu.status |= CARRY;
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8000);
    }

    #[test]
    fn branch_preserves_flags() {
        let (mut cpu, mut bus) = setup(&[0xD0, 0x02]);
        cpu.status |= CARRY;
        let before = cpu.status;
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.status, before);
    }
}
