/*!
illegal.rs - Stable undocumented opcodes not covered by other families

```text
ANC #  (0B, 2B): A &= imm, C = bit 7 of A               (accumulator pass)
ALR #  (4B):     A &= imm, then LSR A                    (accumulator pass)
ARR #  (6B):     A &= imm, then ROR A; C = bit 6, V = bit 6 ^ bit 5
SBX #  (CB):     X = (A & X) - imm, C as for CMP, Z/N from X
LAS abs,Y (BB):  A = X = SP = M & SP                     (accumulator pass)
TAS abs,Y (9B):  SP = A & X, M = A & X & (base high + 1)
```

The RMW combinations (SLO, RLA, ...) live with the rest of the RMW family
and LAX/SAX with the loads and stores.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operands, read_operand};
use crate::cpu::dispatch::{Flow, target};
use crate::cpu::execute::{and, shift_right};
use crate::cpu::state::{CARRY, CpuState, OVERFLOW};
use crate::cpu::table::{Instruction, Op};
use crate::video::VideoUnit;

pub(super) fn handle<V: VideoUnit>(
    ins: &Instruction,
    ops: Operands,
    cpu: &mut CpuState,
    bus: &mut Bus<V>,
) -> Option<Flow> {
    match ins.op {
        Op::Anc => {
            cpu.a = and(cpu.a, ops.lo);
            cpu.assign_flag(CARRY, cpu.a & 0x80 != 0);
        }
        Op::Alr => {
            let v = and(cpu.a, ops.lo);
            cpu.a = shift_right(cpu, v, false);
        }
        Op::Arr => {
            let v = and(cpu.a, ops.lo);
            let carry_in = if cpu.is_flag_set(CARRY) { 0x80 } else { 0 };
            let r = (v >> 1) | carry_in;
            cpu.assign_flag(CARRY, r & 0x40 != 0);
            cpu.assign_flag(OVERFLOW, ((r >> 6) ^ (r >> 5)) & 0x01 != 0);
            cpu.a = r;
        }
        Op::Sbx => {
            let ax = cpu.a & cpu.x;
            cpu.assign_flag(CARRY, ax >= ops.lo);
            cpu.x = ax.wrapping_sub(ops.lo);
            cpu.update_zn(cpu.x);
        }
        Op::Las => {
            let v = read_operand(ins.mode, ops, cpu, bus) & cpu.sp;
            cpu.a = v;
            cpu.x = v;
            cpu.sp = v;
        }
        Op::Tas => {
            let ax = cpu.a & cpu.x;
            cpu.sp = ax;
            let addr = target(ins, ops, cpu, bus);
            bus.write(addr, ax & ops.hi.wrapping_add(1));
        }
        _ => return None,
    }
    Some(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use crate::cpu::dispatch::test_support::{run, setup};
    use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};

    #[test]
    fn anc_copies_bit7_to_carry() {
        // LDA #$FF ; ANC #$80
        let (mut cpu, mut bus) = setup(&[0xA9, 0xFF, 0x0B, 0x80]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.is_flag_set(CARRY));
        assert!(cpu.is_flag_set(NEGATIVE));
    }

    #[test]
    fn alr_ands_then_shifts() {
        // LDA #$FF ; ALR #$03
        let (mut cpu, mut bus) = setup(&[0xA9, 0xFF, 0x4B, 0x03]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a, 0x01);
        assert!(cpu.is_flag_set(CARRY));
    }

    #[test]
    fn arr_flags_from_result_bits() {
        // SEC ; LDA #$FF ; ARR #$C0 -> $E0, C = 1 (bit 6), V = 0 (bit 6 == bit 5)
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0xFF, 0x6B, 0xC0]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.a, 0xE0);
        assert!(cpu.is_flag_set(CARRY));
        assert!(!cpu.is_flag_set(OVERFLOW));

        // CLC ; LDA #$FF ; ARR #$80 -> $40, C = 1, V = 1
        let (mut cpu, mut bus) = setup(&[0x18, 0xA9, 0xFF, 0x6B, 0x80]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.a, 0x40);
        assert!(cpu.is_flag_set(CARRY));
        assert!(cpu.is_flag_set(OVERFLOW));
    }

    #[test]
    fn sbx_subtracts_from_a_and_x() {
        // LDA #$0F ; LDX #$FF ; SBX #$0F
        let (mut cpu, mut bus) = setup(&[0xA9, 0x0F, 0xA2, 0xFF, 0xCB, 0x0F]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.x, 0x00);
        assert!(cpu.is_flag_set(ZERO));
        assert!(cpu.is_flag_set(CARRY));
        assert_eq!(cpu.a, 0x0F);
    }

    #[test]
    fn las_loads_three_registers() {
        // LAS $0300,Y with SP = $FD, mem = $3F
        let (mut cpu, mut bus) = setup(&[0xBB, 0x00, 0x03]);
        bus.write(0x0300, 0x3F);
        run(&mut cpu, &mut bus, 1);
        assert_eq!((cpu.a, cpu.x, cpu.sp), (0x3D, 0x3D, 0x3D));
    }

    #[test]
    fn tas_sets_sp_and_stores_masked_value() {
        // LDA #$FF ; LDX #$F3 ; TAS $0200,Y
        let (mut cpu, mut bus) = setup(&[0xA9, 0xFF, 0xA2, 0xF3, 0x9B, 0x00, 0x02]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.sp, 0xF3);
        assert_eq!(bus.peek(0x0200), 0xF3 & 0x03);
    }
}
