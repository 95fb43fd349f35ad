//! MOS 6502 Core - Pure Rust 6502 emulator library
//!
//! This crate provides the core emulation logic for a MOS 6502 machine:
//! a flat, bounds-checked address space and the CPU that executes against
//! it. It contains no frontend or I/O dependencies.

#![forbid(unsafe_code)]

/// Flat, bounds-checked address space
pub mod memory;
/// CPU module containing the MOS 6502 implementation
pub mod cpu;
/// Integration module for the complete machine
pub mod system;
