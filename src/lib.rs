#![doc = r#"
nes6502 library crate.

A per-instruction NES CPU interpreter with its memory bus and cartridge
mappers, plus a headless video unit.

Modules:
- bus: flat 64 KiB address space with video-register, DMA and mapper-write decoding
- cartridge: iNES v1 loader, cartridge metadata and `CartridgeError`
- config: region, NMI gate policy and the harness timing thresholds
- console: stepping harness (`configure`, `init`, `exec`)
- cpu: 6502 interpreter (state, descriptor table, addressing, dispatch)
- mapper: `Mapper` variant over cartridge boards and the NoMapper board
- mappers: MMC1 (mapper 1)
- ppu: headless video unit
- video: the `VideoUnit` contract the bus and harness drive

In tests, shared iNES builders and a recording video unit are available under
`crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod console;
pub mod cpu;
pub mod mapper;
pub mod mappers;
pub mod ppu;
pub mod video;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use cartridge::{Cartridge, CartridgeError};
pub use config::{ConsoleConfig, NmiGate, Region};
pub use console::Console;
pub use cpu::CpuState;
pub use mapper::Mapper;
pub use ppu::Ppu;
pub use video::{PpuRegister, VideoUnit};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
