/*!
regs.rs - CpuRegs trait: the minimal register + flag interface the ALU
helpers in `execute.rs` are written against.

The trait does NOT include:
  - Stack push/pop
  - Bus access of any kind

Memory and stack operations stay explicit at call sites via `&mut Bus`, which
keeps the helpers pure and lets tests drive them on a bare `CpuState`.
Static dispatch via generics keeps the hot path free of trait objects.
*/

use crate::cpu::state::{CARRY, CpuState};

/// Register + flag API needed by instruction semantic code.
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn status(&self) -> u8;

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------
    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_status(&mut self, v: u8);

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    /// Return true if mask bits are set.
    fn is_flag_set(&self, mask: u8) -> bool;

    /// Set or clear the bits in `mask`.
    fn assign_flag(&mut self, mask: u8, value: bool);

    /// Composite: update ZERO and NEGATIVE based on result.
    fn update_zn(&mut self, result: u8);

    /// Carry as an arithmetic 0/1.
    #[inline]
    fn carry_in(&self) -> u8 {
        (self.status() & CARRY != 0) as u8
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status
    }
    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        self.status = v;
    }
    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        CpuState::is_flag_set(self, mask)
    }
    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        CpuState::assign_flag(self, mask, value)
    }
    #[inline]
    fn update_zn(&mut self, result: u8) {
        CpuState::update_zn(self, result)
    }
}
