/*!
cpu::mod - The 6502 interpreter.

Multi-file structure:

```text
state.rs        - Register file (registers, flags, stack helpers).
regs.rs         - `CpuRegs` trait the ALU helpers are written against.
execute.rs      - ALU helpers (logic, shifts, compare, add/subtract, branch target).
addressing.rs   - Effective-address and operand resolution.
table.rs        - Static 256-entry instruction descriptor table.
dispatch/       - Single-instruction step plus per-family opcode handlers.
trace.rs        - Disassembly line used for trace logging.
```

Usage:
```rust,ignore
use nes6502::cpu::{CpuState, dispatch};

let mut cpu = CpuState::new();
cpu.reset(&mut bus);
dispatch::step(&mut cpu, &mut bus);
```

Execution is per instruction with no cycle accounting. Interrupt entry is
driven by `crate::console::Console`.
*/

pub mod addressing;
pub mod dispatch;
pub mod execute;
pub mod regs;
pub mod state;
pub mod table;
pub mod trace;

// Re-exports:
// - CpuState (raw state; exposed for tests, snapshots, trait impls)
// - Flag constants (canonical bit masks)
pub use crate::cpu::dispatch::step;
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, STACK_BASE, UNUSED, ZERO,
};
pub use crate::cpu::table::{Instruction, Mode, Op, decode};
