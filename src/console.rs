/*!
console.rs - Stepping harness tying the CPU, bus, cartridge and video unit together.

One `exec` call is one emulated instruction:

1. If the video unit reports a pending vertical blank and the configured
   `NmiGate` admits it, push `pc` (high, low) and the status byte, load `pc`
   from $FFFA and restart the instruction counter. The blank flag is cleared
   whether or not the interrupt was taken.
2. Execute exactly one instruction.
3. Bump the instruction counter. Every `vblank_interval` instructions the
   blank flag is raised; every `frame_interval` instructions the video unit
   renders into the caller's buffer and `exec` returns `true`.

Loading:
- `configure` installs a mapper from already-split ROM sections.
- `init` parses a full iNES image, configures, powers the video unit on with
  header byte 6 and loads `pc` from the reset vector.

Both fail fast with `CartridgeError` and leave the console untouched on failure.
*/

use crate::bus::Bus;
use crate::cartridge::{Cartridge, CartridgeError};
use crate::config::{ConsoleConfig, NmiGate, Region};
use crate::cpu::{CpuState, IRQ_DISABLE, step};
use crate::mapper::Mapper;
use crate::ppu::Ppu;
use crate::video::VideoUnit;

/// NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

#[derive(Debug)]
pub struct Console<V: VideoUnit> {
    cpu: CpuState,
    bus: Bus<V>,
    config: ConsoleConfig,
    counter: u64,
    region: Region,
}

impl Console<Ppu> {
    /// Console driving the bundled headless video unit.
    pub fn headless() -> Self {
        Self::new(Ppu::new())
    }
}

impl<V: VideoUnit> Console<V> {
    pub fn new(video: V) -> Self {
        Self::with_config(video, ConsoleConfig::default())
    }

    pub fn with_config(video: V, config: ConsoleConfig) -> Self {
        Self {
            cpu: CpuState::new(),
            bus: Bus::new(video),
            config,
            counter: 0,
            region: Region::default(),
        }
    }

    // -------------- Loading --------------

    /// Install a mapper for the given ROM sections and perform its initial
    /// bank mapping. Registers and `pc` are left alone.
    pub fn configure(
        &mut self,
        prg_banks: u8,
        mapper_id: u8,
        prg: &[u8],
        chr_banks: u8,
        chr: &[u8],
    ) -> Result<(), CartridgeError> {
        let cart = Cartridge::new(prg_banks, mapper_id, prg, chr_banks, chr)?;
        self.install(cart)
    }

    /// Load a complete iNES image and point `pc` at the reset vector.
    pub fn init(&mut self, image: &[u8]) -> Result<(), CartridgeError> {
        let cart = Cartridge::from_ines_bytes(image)?;
        let flags6 = cart.flags6();
        let region = cart.region();
        self.install(cart)?;

        self.bus.video_mut().init(flags6);
        self.region = region;
        self.counter = 0;
        self.cpu.reset(&mut self.bus);
        log::debug!("reset vector -> ${:04X}", self.cpu.pc);
        Ok(())
    }

    fn install(&mut self, cart: Cartridge) -> Result<(), CartridgeError> {
        let mapper = Mapper::new(cart)?;
        let cart = mapper.cartridge();
        log::info!(
            "cartridge: mapper {} ({}), {} PRG bank(s), {} CHR bank(s), {:?} mirroring, {:?}",
            cart.mapper_id(),
            mapper.name(),
            cart.prg_banks(),
            cart.chr_banks(),
            cart.mirroring(),
            cart.region(),
        );
        self.bus.install_mapper(mapper);
        Ok(())
    }

    // -------------- Stepping --------------

    /// Execute one instruction. Returns `true` when a frame was rendered into `frame`.
    pub fn exec(&mut self, frame: &mut [u8]) -> bool {
        if self.bus.video().blank() {
            if self.config.nmi_gate.admits(self.cpu.status) {
                self.enter_nmi();
            }
            self.bus.video_mut().set_blank(false);
        }

        step(&mut self.cpu, &mut self.bus);
        self.counter += 1;

        // A zero interval never fires.
        if self.counter.checked_rem(self.config.vblank_interval) == Some(0) {
            self.bus.video_mut().set_blank(true);
        }
        if self.counter.checked_rem(self.config.frame_interval) == Some(0) {
            self.bus.video_mut().render(frame);
            return true;
        }
        false
    }

    /// Run `exec` until a frame is rendered and return the number of
    /// instructions executed.
    ///
    /// A frame is always due within `2 * frame_interval` instructions unless
    /// NMI entries keep restarting the counter first, which happens when
    /// `vblank_interval <= frame_interval` and the gate admits every blank.
    /// `None` is returned once that many instructions pass without a frame,
    /// and at once when frames are disabled.
    pub fn run_frame(&mut self, frame: &mut [u8]) -> Option<u64> {
        let budget = self.config.frame_interval.saturating_mul(2);
        for executed in 1..=budget {
            if self.exec(frame) {
                return Some(executed);
            }
        }
        if budget > 0 {
            log::warn!("no frame after {budget} instructions; NMI keeps restarting the counter");
        }
        None
    }

    fn enter_nmi(&mut self) {
        let ret = self.cpu.pc;
        self.cpu.push_u16(&mut self.bus, ret);
        match self.config.nmi_gate {
            NmiGate::Legacy => {
                let status = self.cpu.status;
                self.cpu.push_u8(&mut self.bus, status);
            }
            NmiGate::Masked | NmiGate::NonMaskable => {
                let status = self.cpu.compose_status_for_push(false);
                self.cpu.push_u8(&mut self.bus, status);
                self.cpu.assign_flag(IRQ_DISABLE, true);
            }
        }
        self.cpu.pc = self.bus.read16(NMI_VECTOR);
        self.counter = 0;
        log::debug!("NMI from ${ret:04X} -> ${:04X}", self.cpu.pc);
    }

    // -------------- Introspection --------------

    pub fn cpu(&self) -> &CpuState {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CpuState {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus<V> {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus<V> {
        &mut self.bus
    }

    pub fn mapper(&self) -> Option<&Mapper> {
        self.bus.mapper()
    }

    /// Instructions executed since load or the last NMI entry.
    pub fn instruction_count(&self) -> u64 {
        self.counter
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}
