/*!
config.rs - Run-time configuration for a `Console`.

Overview
========
Holds the knobs the stepping harness consults on every instruction:
- which interrupt-gate polarity decides whether a pending vertical blank is serviced
- the instruction-count thresholds standing in for real video timing

`Region` is decoded from the cartridge header and carried for reporting; the
instruction-count heuristic does not vary with it.
*/

/// Video standard declared by the cartridge header (byte 9, bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// NTSC (60 Hz).
    #[default]
    Ntsc,
    /// PAL (50 Hz).
    Pal,
}

impl Region {
    /// Decode the region from header byte 9.
    pub const fn from_header_byte(flags9: u8) -> Self {
        if flags9 & 0x01 != 0 {
            Self::Pal
        } else {
            Self::Ntsc
        }
    }

    /// Nominal frame rate, for display purposes.
    pub const fn frame_rate(self) -> f64 {
        match self {
            Self::Ntsc => 60.0988,
            Self::Pal => 50.0070,
        }
    }
}

/// Policy deciding whether a pending vertical blank enters the NMI handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NmiGate {
    /// Service only while InterruptDisable is SET.
    ///
    /// This is the inverse of how the flag normally works. Existing programs
    /// were tuned against it, so it stays the default. The status byte is
    /// pushed as-is and no flag changes on entry.
    #[default]
    Legacy,
    /// Service only while InterruptDisable is clear.
    Masked,
    /// Always service, as the console's NMI line does.
    NonMaskable,
}

impl NmiGate {
    /// Whether an interrupt should be taken given the current status byte.
    pub const fn admits(self, status: u8) -> bool {
        let irq_disabled = status & crate::cpu::IRQ_DISABLE != 0;
        match self {
            Self::Legacy => irq_disabled,
            Self::Masked => !irq_disabled,
            Self::NonMaskable => true,
        }
    }
}

/// Instructions between "vertical blank pending" signals.
pub const VBLANK_INTERVAL: u64 = 30_001;
/// Instructions between frame renders.
pub const FRAME_INTERVAL: u64 = 16_235;

/// Harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub nmi_gate: NmiGate,
    pub vblank_interval: u64,
    pub frame_interval: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            nmi_gate: NmiGate::Legacy,
            vblank_interval: VBLANK_INTERVAL,
            frame_interval: FRAME_INTERVAL,
        }
    }
}

impl ConsoleConfig {
    pub fn with_nmi_gate(mut self, gate: NmiGate) -> Self {
        self.nmi_gate = gate;
        self
    }
}
