/*!
trace.rs - One-line disassembly for instruction tracing.

The dispatcher builds a line only when trace logging is enabled:

```text
8000  A9 05     LDA #$05
8002  6C FF 02  JMP ($02FF)
8005  D0 FB     BNE $8002
```

Relative branches show the resolved target (`pc + 2 + displacement`).
*/

use crate::cpu::execute::branch_target;
use crate::cpu::table::{Mode, decode};

/// Disassemble the instruction whose bytes start the fetch `window` at `pc`.
pub fn disassemble(pc: u16, window: [u8; 3]) -> String {
    let ins = decode(window[0]);
    let [op, lo, hi] = window;
    let word = u16::from_le_bytes([lo, hi]);

    let bytes = match ins.len {
        1 => format!("{op:02X}"),
        2 => format!("{op:02X} {lo:02X}"),
        _ => format!("{op:02X} {lo:02X} {hi:02X}"),
    };

    let operand = match ins.mode {
        Mode::Implied => String::new(),
        Mode::Accumulator => "A".to_string(),
        Mode::Immediate => format!("#${lo:02X}"),
        Mode::ZeroPage => format!("${lo:02X}"),
        Mode::ZeroPageX => format!("${lo:02X},X"),
        Mode::ZeroPageY => format!("${lo:02X},Y"),
        Mode::Absolute => format!("${word:04X}"),
        Mode::AbsoluteX => format!("${word:04X},X"),
        Mode::AbsoluteY => format!("${word:04X},Y"),
        Mode::Indirect => format!("(${word:04X})"),
        Mode::IndexedIndirect => format!("(${lo:02X},X)"),
        Mode::IndirectIndexed => format!("(${lo:02X}),Y"),
        Mode::Relative => format!("${:04X}", branch_target(pc.wrapping_add(2), lo)),
    };

    let text = if operand.is_empty() {
        ins.op.mnemonic().to_string()
    } else {
        format!("{} {operand}", ins.op.mnemonic())
    };
    format!("{pc:04X}  {bytes:<8}  {text}")
}
