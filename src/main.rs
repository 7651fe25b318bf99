use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nes6502::cartridge::{CHR_BANK_SIZE, PRG_BANK_SIZE};
use nes6502::ppu::FRAME_BYTES;
use nes6502::{Console, ConsoleConfig, NmiGate, Ppu};

/// Run a NES program on the headless 6502 core
#[derive(Parser, Debug)]
#[command(name = "nes6502")]
#[command(about = "Run a NES program on the headless 6502 core", long_about = None)]
struct Args {
    /// Path to an iNES ROM image (a built-in demo runs when omitted)
    rom: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 1)]
    frames: u64,

    /// When a pending vertical blank enters the NMI handler
    #[arg(long, value_enum, default_value_t = GateArg::Legacy)]
    nmi_gate: GateArg,

    /// Write the last rendered frame as PNG
    #[cfg(feature = "screenshot")]
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GateArg {
    /// Only while InterruptDisable is set
    Legacy,
    /// Only while InterruptDisable is clear
    Masked,
    /// Always
    NonMaskable,
}

impl From<GateArg> for NmiGate {
    fn from(arg: GateArg) -> Self {
        match arg {
            GateArg::Legacy => NmiGate::Legacy,
            GateArg::Masked => NmiGate::Masked,
            GateArg::NonMaskable => NmiGate::NonMaskable,
        }
    }
}

/// Mapper-0 image: fill the top 8 nametable rows with a solid tile, turn the
/// background on and spin. The NMI handler counts frames in $00.
fn build_demo_ines() -> Vec<u8> {
    let mut code: Vec<u8> = vec![
        0x78, // SEI
        0xA9, 0x3F, 0x8D, 0x06, 0x20, // LDA #$3F ; STA $2006
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00 ; STA $2006
        0xA9, 0x0F, 0x8D, 0x07, 0x20, // LDA #$0F ; STA $2007  backdrop
        0xA9, 0x16, 0x8D, 0x07, 0x20, // LDA #$16 ; STA $2007  color 1
        0xA9, 0x20, 0x8D, 0x06, 0x20, // LDA #$20 ; STA $2006
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00 ; STA $2006
        0xA2, 0x00, // LDX #$00
        0xA9, 0x01, 0x8D, 0x07, 0x20, // loop: LDA #$01 ; STA $2007
        0xE8, // INX
        0xD0, 0xF8, // BNE loop
        0xA9, 0x08, 0x8D, 0x01, 0x20, // LDA #$08 ; STA $2001
    ];
    let spin = 0x8000 + code.len() as u16;
    code.extend([0x4C, spin as u8, (spin >> 8) as u8]); // JMP spin
    let nmi = 0x8000 + code.len() as u16;
    code.extend([0xE6, 0x00, 0x40]); // INC $00 ; RTI

    let mut prg = vec![0xEA; PRG_BANK_SIZE];
    prg[..code.len()].copy_from_slice(&code);
    // NMI, RESET, IRQ/BRK
    for (slot, vector) in [nmi, 0x8000, 0x8000].into_iter().enumerate() {
        let at = 0x3FFA + slot * 2;
        prg[at..at + 2].copy_from_slice(&vector.to_le_bytes());
    }

    // Tile 1: color index 1 everywhere.
    let mut chr = vec![0u8; CHR_BANK_SIZE];
    chr[16..24].fill(0xFF);

    let mut rom = Vec::with_capacity(16 + prg.len() + chr.len());
    rom.extend_from_slice(b"NES\x1A");
    rom.extend_from_slice(&[1, 1, 0, 0]);
    rom.extend_from_slice(&[0u8; 8]);
    rom.extend_from_slice(&prg);
    rom.extend_from_slice(&chr);
    rom
}

#[cfg(feature = "screenshot")]
fn save_screenshot(args: &Args, frame: &[u8]) -> Result<()> {
    use nes6502::ppu::{NES_HEIGHT, NES_WIDTH};

    let Some(path) = &args.screenshot else {
        return Ok(());
    };
    let img = image::RgbaImage::from_raw(NES_WIDTH as u32, NES_HEIGHT as u32, frame.to_vec())
        .context("frame buffer does not match the screen size")?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Saved frame to {}", path.display());
    Ok(())
}

#[cfg(not(feature = "screenshot"))]
fn save_screenshot(_args: &Args, _frame: &[u8]) -> Result<()> {
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = match &args.rom {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => build_demo_ines(),
    };

    let config = ConsoleConfig::default().with_nmi_gate(args.nmi_gate.into());
    let mut console = Console::with_config(Ppu::new(), config);
    console.init(&image).context("loading cartridge")?;

    let mut frame = vec![0u8; FRAME_BYTES];
    let mut executed = 0u64;
    let mut frames = 0u64;
    for _ in 0..args.frames {
        let Some(count) = console.run_frame(&mut frame) else {
            log::warn!("stopping early: no frame was produced");
            break;
        };
        executed += count;
        frames += 1;
    }

    let cpu = console.cpu();
    println!(
        "Ran {} frame(s), {} instruction(s), {:?} @ {:.2} Hz",
        frames,
        executed,
        console.region(),
        console.region().frame_rate()
    );
    println!("A: 0x{:02X}", cpu.a);
    println!("X: 0x{:02X}", cpu.x);
    println!("Y: 0x{:02X}", cpu.y);
    println!("SP: 0x{:02X}", cpu.sp);
    println!("PC: 0x{:04X}", cpu.pc);
    println!("P (flags): 0b{:08b}", cpu.status);
    println!("mem[0x0000]: 0x{:02X}", console.bus().peek(0x0000));

    save_screenshot(&args, &frame)
}
