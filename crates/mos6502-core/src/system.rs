//! Machine integration
//!
//! Couples one CPU to one 64 KiB address space and adds the conveniences a
//! frontend needs: loading a flat program image, resetting through the
//! reset vector, and a bounded run loop.

use crate::cpu::{Cpu, CpuError};
use crate::memory::{AddressSpace, MemoryError, MEMORY_SIZE};

/// Address of the reset vector word
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Conventional load address for flat program images
pub const DEFAULT_ORIGIN: u16 = 0x0600;

/// A 6502 machine: CPU plus flat 64 KiB memory
#[derive(Debug, Clone)]
pub struct Machine {
    cpu: Cpu,
    memory: AddressSpace<MEMORY_SIZE>,
}

impl Machine {
    /// Create a new machine with zeroed memory
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            memory: AddressSpace::new(),
        }
    }

    /// Load a flat program image at `origin` and point the reset vector at
    /// it.
    ///
    /// The whole image is validated against the end of memory before any
    /// byte is written. An image that covers the reset vector keeps its own
    /// vector bytes.
    pub fn load_program(&mut self, origin: u16, program: &[u8]) -> Result<(), MemoryError> {
        let end = origin as usize + program.len();
        if end > MEMORY_SIZE {
            return Err(MemoryError::OutOfRange(end - 1));
        }

        self.memory.store16(RESET_VECTOR as usize, origin)?;
        for (index, &byte) in program.iter().enumerate() {
            self.memory.store8(origin as usize + index, byte)?;
        }
        Ok(())
    }

    /// Reset the machine: registers and flags to power-on state, program
    /// counter loaded from the reset vector at $FFFC/$FFFD
    pub fn reset(&mut self) -> Result<(), MemoryError> {
        self.cpu.reset();
        self.cpu.registers_mut().pc = self.memory.load16(RESET_VECTOR as usize)?;
        Ok(())
    }

    /// Execute one instruction. Returns `Ok(false)` once the program hits
    /// its BRK stop code.
    pub fn step(&mut self) -> Result<bool, CpuError> {
        self.cpu.step(&mut self.memory)
    }

    /// Run until BRK or until `max_steps` instructions have executed.
    ///
    /// Exhausting the budget is an error; returns the number of
    /// instructions executed otherwise.
    pub fn run(&mut self, max_steps: u64) -> Result<u64, Box<dyn std::error::Error>> {
        let mut steps = 0u64;
        while steps < max_steps {
            let running = self.step()?;
            steps += 1;
            if !running {
                return Ok(steps);
            }
        }
        Err(format!("program did not halt within {} steps", max_steps).into())
    }

    /// Get CPU reference
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable CPU reference
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get memory reference
    pub fn memory(&self) -> &AddressSpace<MEMORY_SIZE> {
        &self.memory
    }

    /// Get mutable memory reference
    pub fn memory_mut(&mut self) -> &mut AddressSpace<MEMORY_SIZE> {
        &mut self.memory
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_program_sets_reset_vector() {
        let mut machine = Machine::new();
        machine.load_program(0x0600, &[0xEA, 0x00]).unwrap();
        machine.reset().unwrap();

        assert_eq!(machine.cpu().registers().pc, 0x0600);
        assert_eq!(machine.memory().load8(0x0600), Ok(0xEA));
    }

    #[test]
    fn test_load_program_rejects_overflowing_image() {
        let mut machine = Machine::new();
        let image = [0u8; 4];
        assert!(machine.load_program(0xFFFE, &image).is_err());
        // Nothing was written
        assert_eq!(machine.memory().load8(0xFFFE), Ok(0));
    }

    #[test]
    fn test_run_halts_on_brk() {
        let mut machine = Machine::new();
        machine.load_program(0x0600, &[0xEA, 0x00]).unwrap();
        machine.reset().unwrap();

        let steps = machine.run(100).unwrap();
        assert_eq!(steps, 2); // NOP, then BRK
    }
}
