//! MOS 6502 CLI - Command line interface for the 6502 emulator

use clap::Parser;
use mos6502_core::system::Machine;
use std::fs;
use std::path::PathBuf;

/// MOS 6502 Emulator CLI
#[derive(Parser, Debug)]
#[command(name = "mos6502-cli")]
#[command(about = "A MOS 6502 emulator CLI", long_about = None)]
struct Args {
    /// Path to a flat machine-code image
    #[arg(short, long)]
    program: PathBuf,

    /// Load address for the image (hex, e.g. 0600)
    #[arg(short, long, default_value = "0600", value_parser = parse_hex_u16)]
    origin: u16,

    /// Maximum number of instructions to execute
    #[arg(short, long, default_value = "1000000")]
    max_steps: u64,

    /// Dump CPU state after execution
    #[arg(short = 'c', long)]
    dump_cpu: bool,

    /// Dump a 256-byte memory page after execution (hex page number, e.g. 02)
    #[arg(short = 'd', long, value_parser = parse_hex_u8)]
    dump_page: Option<u8>,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{}': {}", s, e))
}

fn parse_hex_u8(s: &str) -> Result<u8, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{}': {}", s, e))
}

fn main() {
    let args = Args::parse();

    // Load program image
    let image = match fs::read(&args.program) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read program file: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} bytes at ${:04X}", image.len(), args.origin);

    let mut machine = Machine::new();
    if let Err(e) = machine.load_program(args.origin, &image) {
        eprintln!("Failed to load program: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = machine.reset() {
        eprintln!("Failed to reset machine: {}", e);
        std::process::exit(1);
    }

    println!("\nRunning (budget: {} instructions)...", args.max_steps);

    match machine.run(args.max_steps) {
        Ok(steps) => println!(
            "Halted after {} instructions ({} cycles).",
            steps,
            machine.cpu().total_cycles()
        ),
        Err(e) => {
            eprintln!("Error running machine: {}", e);
            std::process::exit(1);
        }
    }

    if args.dump_cpu {
        dump_cpu_state(&machine);
    }

    if let Some(page) = args.dump_page {
        dump_memory_page(&machine, page);
    }
}

fn dump_cpu_state(machine: &Machine) {
    let cpu = machine.cpu();
    let regs = cpu.registers();

    println!("\nCPU State:");
    println!("  A:    ${:02X}", regs.a);
    println!("  X:    ${:02X}", regs.x);
    println!("  Y:    ${:02X}", regs.y);
    println!("  PC:   ${:04X}", regs.pc);
    println!("  SP:   ${:02X}", regs.sp);
    println!("  P:    {}", cpu.status());
    println!("  Cycles: {}", cpu.total_cycles());
}

fn dump_memory_page(machine: &Machine, page: u8) {
    let base = (page as usize) << 8;

    println!("\nMemory page ${:02X}:", page);
    for row in 0..16 {
        print!("  ${:04X}:", base + row * 16);
        for col in 0..16 {
            match machine.memory().load8(base + row * 16 + col) {
                Ok(byte) => print!(" {:02X}", byte),
                Err(_) => print!(" ??"),
            }
        }
        println!();
    }
}
