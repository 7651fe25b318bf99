/*!
table.rs - Static 256-entry instruction descriptor table.

Purpose
=======
Maps every opcode byte to an `Instruction` descriptor:

```text
(operation, addressing mode, byte length, generic flag policy)
```

The mapping is total. Opcodes with no documented behavior still carry the
length the hardware consumes for them, so the program counter advances the
same way it would on a real part and execution never faults.

Design
------
- `INSTRUCTIONS: [Instruction; 256]` is built once in a const block.
- `len` is derived from the addressing mode when the table is built.
- `generic_flags == true` means the dispatcher sets Zero/Negative from the
  accumulator after the instruction runs. Instructions that define their own
  flags (compares, stores, branches, flag ops, stack ops, jumps, X/Y and
  memory increments, memory shifts) carry `false`.
- Unfilled entries start as JAM (1-byte no-op); the JAM column is the only
  group left at that default.
*/

/// Addressing modes of the 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP ($nnnn), with the page-wrap bug.
    Indirect,
    /// ($nn,X)
    IndexedIndirect,
    /// ($nn),Y
    IndirectIndexed,
    Relative,
}

impl Mode {
    /// Instruction length in bytes (opcode included).
    pub const fn len(self) -> u8 {
        match self {
            Mode::Implied | Mode::Accumulator => 1,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndexedIndirect
            | Mode::IndirectIndexed
            | Mode::Relative => 2,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 3,
        }
    }
}

/// Operation kinds, documented and undocumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Documented
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Alr,
    Anc,
    Arr,
    Dcp,
    Isb,
    Jam,
    Las,
    Lax,
    Rla,
    Rra,
    Sax,
    Sbx,
    Slo,
    Sre,
    Tas,
    /// SBC immediate duplicate at 0xEB.
    Usbc,
}

impl Op {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc => "ADC",
            Op::And => "AND",
            Op::Asl => "ASL",
            Op::Bcc => "BCC",
            Op::Bcs => "BCS",
            Op::Beq => "BEQ",
            Op::Bit => "BIT",
            Op::Bmi => "BMI",
            Op::Bne => "BNE",
            Op::Bpl => "BPL",
            Op::Brk => "BRK",
            Op::Bvc => "BVC",
            Op::Bvs => "BVS",
            Op::Clc => "CLC",
            Op::Cld => "CLD",
            Op::Cli => "CLI",
            Op::Clv => "CLV",
            Op::Cmp => "CMP",
            Op::Cpx => "CPX",
            Op::Cpy => "CPY",
            Op::Dec => "DEC",
            Op::Dex => "DEX",
            Op::Dey => "DEY",
            Op::Eor => "EOR",
            Op::Inc => "INC",
            Op::Inx => "INX",
            Op::Iny => "INY",
            Op::Jmp => "JMP",
            Op::Jsr => "JSR",
            Op::Lda => "LDA",
            Op::Ldx => "LDX",
            Op::Ldy => "LDY",
            Op::Lsr => "LSR",
            Op::Nop => "NOP",
            Op::Ora => "ORA",
            Op::Pha => "PHA",
            Op::Php => "PHP",
            Op::Pla => "PLA",
            Op::Plp => "PLP",
            Op::Rol => "ROL",
            Op::Ror => "ROR",
            Op::Rti => "RTI",
            Op::Rts => "RTS",
            Op::Sbc => "SBC",
            Op::Sec => "SEC",
            Op::Sed => "SED",
            Op::Sei => "SEI",
            Op::Sta => "STA",
            Op::Stx => "STX",
            Op::Sty => "STY",
            Op::Tax => "TAX",
            Op::Tay => "TAY",
            Op::Tsx => "TSX",
            Op::Txa => "TXA",
            Op::Txs => "TXS",
            Op::Tya => "TYA",
            Op::Alr => "ALR",
            Op::Anc => "ANC",
            Op::Arr => "ARR",
            Op::Dcp => "DCP",
            Op::Isb => "ISB",
            Op::Jam => "JAM",
            Op::Las => "LAS",
            Op::Lax => "LAX",
            Op::Rla => "RLA",
            Op::Rra => "RRA",
            Op::Sax => "SAX",
            Op::Sbx => "SBX",
            Op::Slo => "SLO",
            Op::Sre => "SRE",
            Op::Tas => "TAS",
            Op::Usbc => "SBC",
        }
    }
}

/// Decoded form of one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub mode: Mode,
    /// Byte length, 1-3.
    pub len: u8,
    /// Apply the Zero/Negative-from-accumulator pass after execution.
    pub generic_flags: bool,
}

/// Descriptor that participates in the generic flag pass.
const fn pass(op: Op, mode: Mode) -> Instruction {
    Instruction {
        op,
        mode,
        len: mode.len(),
        generic_flags: true,
    }
}

/// Descriptor that sets its own flags (or none) and skips the pass.
const fn skip(op: Op, mode: Mode) -> Instruction {
    Instruction {
        op,
        mode,
        len: mode.len(),
        generic_flags: false,
    }
}

const JAM: Instruction = skip(Op::Jam, Mode::Implied);

/// Look up the descriptor for an opcode byte.
#[inline]
pub fn decode(opcode: u8) -> &'static Instruction {
    &INSTRUCTIONS[opcode as usize]
}

// ------------------------------------------
// Descriptor Table (256 entries)
// ------------------------------------------

pub static INSTRUCTIONS: [Instruction; 256] = {
    use Mode::*;
    use Op::*;

    let mut t: [Instruction; 256] = [JAM; 256];

    // Control flow / interrupts
    t[0x00] = skip(Brk, Implied);
    t[0x20] = skip(Jsr, Absolute);
    t[0x40] = skip(Rti, Implied);
    t[0x60] = skip(Rts, Implied);
    t[0x4C] = skip(Jmp, Absolute);
    t[0x6C] = skip(Jmp, Indirect);

    // Branches
    t[0x10] = skip(Bpl, Relative);
    t[0x30] = skip(Bmi, Relative);
    t[0x50] = skip(Bvc, Relative);
    t[0x70] = skip(Bvs, Relative);
    t[0x90] = skip(Bcc, Relative);
    t[0xB0] = skip(Bcs, Relative);
    t[0xD0] = skip(Bne, Relative);
    t[0xF0] = skip(Beq, Relative);

    // Flag set / clear
    t[0x18] = skip(Clc, Implied);
    t[0x38] = skip(Sec, Implied);
    t[0x58] = skip(Cli, Implied);
    t[0x78] = skip(Sei, Implied);
    t[0xB8] = skip(Clv, Implied);
    t[0xD8] = skip(Cld, Implied);
    t[0xF8] = skip(Sed, Implied);

    // Stack
    t[0x08] = skip(Php, Implied);
    t[0x28] = skip(Plp, Implied);
    t[0x48] = skip(Pha, Implied);
    t[0x68] = pass(Pla, Implied);

    // Transfers / register increments
    t[0xAA] = skip(Tax, Implied);
    t[0xA8] = skip(Tay, Implied);
    t[0xBA] = skip(Tsx, Implied);
    t[0x8A] = pass(Txa, Implied);
    t[0x98] = pass(Tya, Implied);
    t[0x9A] = skip(Txs, Implied);
    t[0xE8] = skip(Inx, Implied);
    t[0xC8] = skip(Iny, Implied);
    t[0xCA] = skip(Dex, Implied);
    t[0x88] = skip(Dey, Implied);
    t[0xEA] = skip(Nop, Implied);

    // ALU group: ORA AND EOR ADC LDA CMP SBC (opcode & 0x1C selects the mode)
    t[0x01] = pass(Ora, IndexedIndirect);
    t[0x05] = pass(Ora, ZeroPage);
    t[0x09] = pass(Ora, Immediate);
    t[0x0D] = pass(Ora, Absolute);
    t[0x11] = pass(Ora, IndirectIndexed);
    t[0x15] = pass(Ora, ZeroPageX);
    t[0x19] = pass(Ora, AbsoluteY);
    t[0x1D] = pass(Ora, AbsoluteX);

    t[0x21] = pass(And, IndexedIndirect);
    t[0x25] = pass(And, ZeroPage);
    t[0x29] = pass(And, Immediate);
    t[0x2D] = pass(And, Absolute);
    t[0x31] = pass(And, IndirectIndexed);
    t[0x35] = pass(And, ZeroPageX);
    t[0x39] = pass(And, AbsoluteY);
    t[0x3D] = pass(And, AbsoluteX);

    t[0x41] = pass(Eor, IndexedIndirect);
    t[0x45] = pass(Eor, ZeroPage);
    t[0x49] = pass(Eor, Immediate);
    t[0x4D] = pass(Eor, Absolute);
    t[0x51] = pass(Eor, IndirectIndexed);
    t[0x55] = pass(Eor, ZeroPageX);
    t[0x59] = pass(Eor, AbsoluteY);
    t[0x5D] = pass(Eor, AbsoluteX);

    t[0x61] = pass(Adc, IndexedIndirect);
    t[0x65] = pass(Adc, ZeroPage);
    t[0x69] = pass(Adc, Immediate);
    t[0x6D] = pass(Adc, Absolute);
    t[0x71] = pass(Adc, IndirectIndexed);
    t[0x75] = pass(Adc, ZeroPageX);
    t[0x79] = pass(Adc, AbsoluteY);
    t[0x7D] = pass(Adc, AbsoluteX);

    t[0xA1] = pass(Lda, IndexedIndirect);
    t[0xA5] = pass(Lda, ZeroPage);
    t[0xA9] = pass(Lda, Immediate);
    t[0xAD] = pass(Lda, Absolute);
    t[0xB1] = pass(Lda, IndirectIndexed);
    t[0xB5] = pass(Lda, ZeroPageX);
    t[0xB9] = pass(Lda, AbsoluteY);
    t[0xBD] = pass(Lda, AbsoluteX);

    t[0xC1] = skip(Cmp, IndexedIndirect);
    t[0xC5] = skip(Cmp, ZeroPage);
    t[0xC9] = skip(Cmp, Immediate);
    t[0xCD] = skip(Cmp, Absolute);
    t[0xD1] = skip(Cmp, IndirectIndexed);
    t[0xD5] = skip(Cmp, ZeroPageX);
    t[0xD9] = skip(Cmp, AbsoluteY);
    t[0xDD] = skip(Cmp, AbsoluteX);

    t[0xE1] = pass(Sbc, IndexedIndirect);
    t[0xE5] = pass(Sbc, ZeroPage);
    t[0xE9] = pass(Sbc, Immediate);
    t[0xED] = pass(Sbc, Absolute);
    t[0xF1] = pass(Sbc, IndirectIndexed);
    t[0xF5] = pass(Sbc, ZeroPageX);
    t[0xF9] = pass(Sbc, AbsoluteY);
    t[0xFD] = pass(Sbc, AbsoluteX);

    // STA (no immediate form)
    t[0x81] = skip(Sta, IndexedIndirect);
    t[0x85] = skip(Sta, ZeroPage);
    t[0x8D] = skip(Sta, Absolute);
    t[0x91] = skip(Sta, IndirectIndexed);
    t[0x95] = skip(Sta, ZeroPageX);
    t[0x99] = skip(Sta, AbsoluteY);
    t[0x9D] = skip(Sta, AbsoluteX);

    // Shift group (opcode & 0x18 selects zp / abs / zp,X / abs,X)
    t[0x0A] = pass(Asl, Accumulator);
    t[0x06] = skip(Asl, ZeroPage);
    t[0x0E] = skip(Asl, Absolute);
    t[0x16] = skip(Asl, ZeroPageX);
    t[0x1E] = skip(Asl, AbsoluteX);

    t[0x2A] = pass(Rol, Accumulator);
    t[0x26] = skip(Rol, ZeroPage);
    t[0x2E] = skip(Rol, Absolute);
    t[0x36] = skip(Rol, ZeroPageX);
    t[0x3E] = skip(Rol, AbsoluteX);

    t[0x4A] = pass(Lsr, Accumulator);
    t[0x46] = skip(Lsr, ZeroPage);
    t[0x4E] = skip(Lsr, Absolute);
    t[0x56] = skip(Lsr, ZeroPageX);
    t[0x5E] = skip(Lsr, AbsoluteX);

    t[0x6A] = pass(Ror, Accumulator);
    t[0x66] = skip(Ror, ZeroPage);
    t[0x6E] = skip(Ror, Absolute);
    t[0x76] = skip(Ror, ZeroPageX);
    t[0x7E] = skip(Ror, AbsoluteX);

    // INC / DEC memory
    t[0xC6] = skip(Dec, ZeroPage);
    t[0xCE] = skip(Dec, Absolute);
    t[0xD6] = skip(Dec, ZeroPageX);
    t[0xDE] = skip(Dec, AbsoluteX);
    t[0xE6] = skip(Inc, ZeroPage);
    t[0xEE] = skip(Inc, Absolute);
    t[0xF6] = skip(Inc, ZeroPageX);
    t[0xFE] = skip(Inc, AbsoluteX);

    // X / Y loads, stores, compares
    t[0xA2] = skip(Ldx, Immediate);
    t[0xA6] = skip(Ldx, ZeroPage);
    t[0xAE] = skip(Ldx, Absolute);
    t[0xB6] = skip(Ldx, ZeroPageY);
    t[0xBE] = skip(Ldx, AbsoluteY);

    t[0xA0] = skip(Ldy, Immediate);
    t[0xA4] = skip(Ldy, ZeroPage);
    t[0xAC] = skip(Ldy, Absolute);
    t[0xB4] = skip(Ldy, ZeroPageX);
    t[0xBC] = skip(Ldy, AbsoluteX);

    t[0x86] = skip(Stx, ZeroPage);
    t[0x8E] = skip(Stx, Absolute);
    t[0x96] = skip(Stx, ZeroPageY);
    t[0x84] = skip(Sty, ZeroPage);
    t[0x8C] = skip(Sty, Absolute);
    t[0x94] = skip(Sty, ZeroPageX);

    t[0xE0] = skip(Cpx, Immediate);
    t[0xE4] = skip(Cpx, ZeroPage);
    t[0xEC] = skip(Cpx, Absolute);
    t[0xC0] = skip(Cpy, Immediate);
    t[0xC4] = skip(Cpy, ZeroPage);
    t[0xCC] = skip(Cpy, Absolute);

    t[0x24] = skip(Bit, ZeroPage);
    t[0x2C] = skip(Bit, Absolute);

    // ---------------------------------------------------------------
    // Undocumented opcodes
    // ---------------------------------------------------------------

    // NOPs (never touch the bus)
    t[0x1A] = skip(Nop, Implied);
    t[0x3A] = skip(Nop, Implied);
    t[0x5A] = skip(Nop, Implied);
    t[0x7A] = skip(Nop, Implied);
    t[0xDA] = skip(Nop, Implied);
    t[0xFA] = skip(Nop, Implied);
    t[0x80] = skip(Nop, Immediate);
    t[0x82] = skip(Nop, Immediate);
    t[0x89] = skip(Nop, Immediate);
    t[0xC2] = skip(Nop, Immediate);
    t[0xE2] = skip(Nop, Immediate);
    t[0x04] = skip(Nop, ZeroPage);
    t[0x44] = skip(Nop, ZeroPage);
    t[0x64] = skip(Nop, ZeroPage);
    t[0x14] = skip(Nop, ZeroPageX);
    t[0x34] = skip(Nop, ZeroPageX);
    t[0x54] = skip(Nop, ZeroPageX);
    t[0x74] = skip(Nop, ZeroPageX);
    t[0xD4] = skip(Nop, ZeroPageX);
    t[0xF4] = skip(Nop, ZeroPageX);
    t[0x0C] = skip(Nop, Absolute);
    t[0x1C] = skip(Nop, AbsoluteX);
    t[0x3C] = skip(Nop, AbsoluteX);
    t[0x5C] = skip(Nop, AbsoluteX);
    t[0x7C] = skip(Nop, AbsoluteX);
    t[0xDC] = skip(Nop, AbsoluteX);
    t[0xFC] = skip(Nop, AbsoluteX);

    // Unstable on real silicon: consume their length, do nothing.
    t[0x8B] = skip(Nop, Immediate); // XAA
    t[0x93] = skip(Nop, IndirectIndexed); // SHA
    t[0x9F] = skip(Nop, AbsoluteY); // SHA
    t[0x9C] = skip(Nop, AbsoluteX); // SHY
    t[0x9E] = skip(Nop, AbsoluteY); // SHX

    // LAX
    t[0xA3] = pass(Lax, IndexedIndirect);
    t[0xA7] = pass(Lax, ZeroPage);
    t[0xAB] = pass(Lax, Immediate);
    t[0xAF] = pass(Lax, Absolute);
    t[0xB3] = pass(Lax, IndirectIndexed);
    t[0xB7] = pass(Lax, ZeroPageY);
    t[0xBF] = pass(Lax, AbsoluteY);

    // SAX
    t[0x83] = skip(Sax, IndexedIndirect);
    t[0x87] = skip(Sax, ZeroPage);
    t[0x8F] = skip(Sax, Absolute);
    t[0x97] = skip(Sax, ZeroPageY);

    // Read-modify-write combos: SLO RLA SRE RRA DCP ISB
    t[0x03] = pass(Slo, IndexedIndirect);
    t[0x07] = pass(Slo, ZeroPage);
    t[0x0F] = pass(Slo, Absolute);
    t[0x13] = pass(Slo, IndirectIndexed);
    t[0x17] = pass(Slo, ZeroPageX);
    t[0x1B] = pass(Slo, AbsoluteY);
    t[0x1F] = pass(Slo, AbsoluteX);

    t[0x23] = pass(Rla, IndexedIndirect);
    t[0x27] = pass(Rla, ZeroPage);
    t[0x2F] = pass(Rla, Absolute);
    t[0x33] = pass(Rla, IndirectIndexed);
    t[0x37] = pass(Rla, ZeroPageX);
    t[0x3B] = pass(Rla, AbsoluteY);
    t[0x3F] = pass(Rla, AbsoluteX);

    t[0x43] = pass(Sre, IndexedIndirect);
    t[0x47] = pass(Sre, ZeroPage);
    t[0x4F] = pass(Sre, Absolute);
    t[0x53] = pass(Sre, IndirectIndexed);
    t[0x57] = pass(Sre, ZeroPageX);
    t[0x5B] = pass(Sre, AbsoluteY);
    t[0x5F] = pass(Sre, AbsoluteX);

    t[0x63] = pass(Rra, IndexedIndirect);
    t[0x67] = pass(Rra, ZeroPage);
    t[0x6F] = pass(Rra, Absolute);
    t[0x73] = pass(Rra, IndirectIndexed);
    t[0x77] = pass(Rra, ZeroPageX);
    t[0x7B] = pass(Rra, AbsoluteY);
    t[0x7F] = pass(Rra, AbsoluteX);

    t[0xC3] = skip(Dcp, IndexedIndirect);
    t[0xC7] = skip(Dcp, ZeroPage);
    t[0xCF] = skip(Dcp, Absolute);
    t[0xD3] = skip(Dcp, IndirectIndexed);
    t[0xD7] = skip(Dcp, ZeroPageX);
    t[0xDB] = skip(Dcp, AbsoluteY);
    t[0xDF] = skip(Dcp, AbsoluteX);

    t[0xE3] = pass(Isb, IndexedIndirect);
    t[0xE7] = pass(Isb, ZeroPage);
    t[0xEF] = pass(Isb, Absolute);
    t[0xF3] = pass(Isb, IndirectIndexed);
    t[0xF7] = pass(Isb, ZeroPageX);
    t[0xFB] = pass(Isb, AbsoluteY);
    t[0xFF] = pass(Isb, AbsoluteX);

    // Immediate combos
    t[0x0B] = pass(Anc, Immediate);
    t[0x2B] = pass(Anc, Immediate);
    t[0x4B] = pass(Alr, Immediate);
    t[0x6B] = pass(Arr, Immediate);
    t[0xCB] = skip(Sbx, Immediate);
    t[0xEB] = pass(Usbc, Immediate);

    // Stack-pointer combos
    t[0x9B] = skip(Tas, AbsoluteY);
    t[0xBB] = pass(Las, AbsoluteY);

    t
};
