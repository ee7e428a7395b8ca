//! Virtual machine.
use std::{
    fmt::{self, Write},
    time::Duration,
};

use log::{debug, info};
use rand::prelude::*;

use crate::{
    clock::Clock,
    constants::*,
    error::VmResult,
    framebuffer::Framebuffer,
    frontend::{Frontend, InputEvent},
    instruction::{decode, Instruction},
    keypad::{Key, Keypad},
    memory::Memory,
    registers::Registers,
};

/// Run state of the driver state machine.
///
/// `Stopped` is terminal. `WaitingForKey` carries the register the
/// next key press lands in, so a pending destination cannot exist
/// outside the waiting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    WaitingForKey { destination: usize },
    Paused,
    Stopped,
}

/// VM Configuration Parameters.
#[derive(Default, Clone)]
pub struct VmConf {
    pub tick_frequency: Option<Hz>,
}

impl VmConf {
    fn tick_interval(&self) -> Duration {
        self.tick_frequency.unwrap_or_default().into()
    }
}

/// Machine tick frequency, in hertz (per second)
#[derive(Debug, Clone, Copy)]
pub struct Hz(pub u64);

impl Default for Hz {
    fn default() -> Self {
        Hz(TICK_FREQUENCY)
    }
}

impl From<Hz> for Duration {
    fn from(freq: Hz) -> Self {
        if freq.0 == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(NANOS_IN_SECOND / freq.0)
        }
    }
}

/// The machine: registers, memory, keypad and framebuffer, driven one
/// instruction per tick.
pub struct Vm {
    memory: Memory,
    regs: Registers,
    keypad: Keypad,
    framebuffer: Framebuffer,
    state: State,
    conf: VmConf,
}

impl Vm {
    pub fn new(conf: VmConf) -> Self {
        Vm {
            memory: Memory::new(),
            regs: Registers::new(),
            keypad: Keypad::new(),
            framebuffer: Framebuffer::new(),
            state: State::Running,
            conf,
        }
    }

    /// Configuration that was used to instantiate the VM.
    pub fn config(&self) -> &VmConf {
        &self.conf
    }

    /// Load a program, resetting the whole machine.
    ///
    /// ROM bytes are written verbatim from [`ROM_START`] upward. A
    /// program too large for memory is rejected with nothing written.
    pub fn load_rom(&mut self, rom: &[u8]) -> VmResult<()> {
        // Start with clean memory to avoid leaking a previous program.
        self.memory.clear();
        self.memory.write_bytes(&FONT_DATA, FONT_START)?;
        self.memory.write_bytes(rom, ROM_START)?;

        self.regs.reset();
        self.keypad.clear();
        self.framebuffer.clear();
        self.state = State::Running;

        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Suspend instruction dispatch until [`Vm::resume`].
    pub fn pause(&mut self) {
        if self.state == State::Running {
            self.state = State::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == State::Paused {
            self.state = State::Running;
        }
    }
}

/// Driver
impl Vm {
    /// Drive the machine until it stops.
    ///
    /// One tick per clock cycle: poll the collaborator for input, run
    /// [`Vm::tick`], and hand the framebuffer over whenever a redraw
    /// is pending. A fatal fault stops the machine and is returned.
    pub fn run(&mut self, frontend: &mut dyn Frontend) -> VmResult<()> {
        let mut clock = Clock::new(self.conf.tick_interval());
        let mut events = Vec::new();

        while self.state != State::Stopped {
            clock.wait();

            events.clear();
            frontend.poll(&mut events);

            if let Err(err) = self.tick(&events) {
                self.state = State::Stopped;
                return Err(err);
            }

            if self.framebuffer.take_redraw() {
                frontend.present(&self.framebuffer);
            }
        }

        Ok(())
    }

    /// Advance the machine by one tick.
    ///
    /// Timers count down, input is applied, and one instruction is
    /// fetched and dispatched unless the machine is waiting, paused or
    /// stopped.
    pub fn tick(&mut self, events: &[InputEvent]) -> VmResult<()> {
        self.regs.tick_timers();

        for &event in events {
            match event {
                InputEvent::Quit => {
                    debug!("quit signal, stopping");
                    self.state = State::Stopped;
                    return Ok(());
                }
                InputEvent::KeyDown(key) => {
                    self.keypad.press(key);
                    if let State::WaitingForKey { destination } = self.state {
                        debug!("key {key} observed, resuming");
                        self.regs.v[destination] = key.as_u8();
                        self.state = State::Running;
                    }
                }
                InputEvent::KeyUp(key) => self.keypad.release(key),
            }
        }

        if self.state != State::Running {
            return Ok(());
        }

        self.step()
    }

    /// Fetch, decode and dispatch a single instruction.
    fn step(&mut self) -> VmResult<()> {
        let word = self.memory.read16(self.regs.pc);

        // The counter moves before dispatch, so jumps and skips
        // compute relative to the next instruction's address.
        self.regs.pc = (self.regs.pc + 2) & ADDRESS_MASK as usize;

        let instruction = decode(word)?;
        self.exec(instruction)
    }

    /// Skip the next instruction.
    #[inline]
    fn skip(&mut self) {
        self.regs.pc = (self.regs.pc + 2) & ADDRESS_MASK as usize;
    }

    fn exec(&mut self, instruction: Instruction) -> VmResult<()> {
        use Instruction as I;

        match instruction {
            I::ClearScreen => self.framebuffer.clear(),
            I::Return => self.regs.ret()?,
            I::Jump { nnn } => self.regs.pc = (nnn & ADDRESS_MASK) as usize,
            I::Call { nnn } => self.regs.call(nnn)?,
            I::SkipEqByte { x, nn } => {
                if self.regs.v[x] == nn {
                    self.skip();
                }
            }
            I::SkipNeByte { x, nn } => {
                if self.regs.v[x] != nn {
                    self.skip();
                }
            }
            I::SkipEqReg { x, y } => {
                if self.regs.v[x] == self.regs.v[y] {
                    self.skip();
                }
            }
            I::LoadByte { x, nn } => self.regs.v[x] = nn,
            I::AddByte { x, nn } => self.regs.v[x] = self.regs.v[x].wrapping_add(nn),
            I::Move { x, y } => self.regs.v[x] = self.regs.v[y],
            I::Or { x, y } => self.regs.v[x] |= self.regs.v[y],
            I::And { x, y } => self.regs.v[x] &= self.regs.v[y],
            I::Xor { x, y } => self.regs.v[x] ^= self.regs.v[y],
            I::Add { x, y } => {
                let sum = self.regs.v[x] as u16 + self.regs.v[y] as u16;
                self.regs.v[x] = sum as u8;
                // The flag lands last so it wins when X is VF.
                self.regs.v[0xF] = (sum > 0xFF) as u8;
            }
            I::Sub { x, y } => {
                let (vx, vy) = (self.regs.v[x], self.regs.v[y]);
                self.regs.v[x] = vx.wrapping_sub(vy);
                self.regs.v[0xF] = (vx > vy) as u8;
            }
            I::ShiftRight { x } => {
                let vx = self.regs.v[x];
                self.regs.v[x] = vx >> 1;
                self.regs.v[0xF] = vx & 1;
            }
            I::SubNeg { x, y } => {
                let (vx, vy) = (self.regs.v[x], self.regs.v[y]);
                self.regs.v[x] = vy.wrapping_sub(vx);
                self.regs.v[0xF] = (vy > vx) as u8;
            }
            I::ShiftLeft { x } => {
                let vx = self.regs.v[x];
                self.regs.v[x] = vx << 1;
                self.regs.v[0xF] = vx >> 7;
            }
            I::SkipNeReg { x, y } => {
                if self.regs.v[x] != self.regs.v[y] {
                    self.skip();
                }
            }
            I::LoadIndex { nnn } => self.regs.i = nnn & ADDRESS_MASK,
            I::JumpOffset { nnn } => {
                self.regs.pc = ((nnn + self.regs.v[0] as u16) & ADDRESS_MASK) as usize;
            }
            I::Random { x, nn } => self.regs.v[x] = thread_rng().gen::<u8>() & nn,
            I::Draw { x, y, n } => {
                let addr = self.regs.i as usize;
                let mut rows = [0u8; SPRITE_MAX_HEIGHT];
                for (r, row) in rows[..n].iter_mut().enumerate() {
                    *row = self.memory.read8(addr + r);
                }

                let collision =
                    self.framebuffer
                        .draw_sprite(self.regs.v[x], self.regs.v[y], &rows[..n]);
                self.regs.v[0xF] = collision as u8;
            }
            I::SkipKeyPressed { x } => {
                if self.keypad.is_pressed(self.key_operand(x)) {
                    self.skip();
                }
            }
            I::SkipKeyReleased { x } => {
                if !self.keypad.is_pressed(self.key_operand(x)) {
                    self.skip();
                }
            }
            I::LoadDelay { x } => self.regs.v[x] = self.regs.delay,
            I::WaitKey { x } => {
                debug!("waiting for key, destination V{x:X}");
                self.state = State::WaitingForKey { destination: x };
            }
            I::SetDelay { x } => self.regs.delay = self.regs.v[x],
            I::SetSound { x } => self.regs.sound = self.regs.v[x],
            I::AddIndex { x } => {
                self.regs.i = self.regs.i.wrapping_add(self.regs.v[x] as u16) & ADDRESS_MASK;
            }
            I::LoadFont { x } => {
                let digit = self.regs.v[x] as u16;
                self.regs.i = (FONT_START as u16 + digit * FONT_HEIGHT as u16) & ADDRESS_MASK;
            }
            I::StoreBcd { x } => {
                let addr = self.regs.i as usize;
                let vx = self.regs.v[x];
                self.memory.write8(addr, vx / 100 % 10);
                self.memory.write8(addr + 1, vx / 10 % 10);
                self.memory.write8(addr + 2, vx % 10);
            }
            I::StoreRegisters { x } => {
                let addr = self.regs.i as usize;
                for offset in 0..=x {
                    self.memory.write8(addr + offset, self.regs.v[offset]);
                }
            }
            I::LoadRegisters { x } => {
                let addr = self.regs.i as usize;
                for offset in 0..=x {
                    self.regs.v[offset] = self.memory.read8(addr + offset);
                }
            }
        }

        Ok(())
    }

    /// Key selected by a register operand. Only the low nibble of the
    /// register value selects the key.
    fn key_operand(&self, x: usize) -> Key {
        Key::try_from(self.regs.v[x] & 0xF).expect("masked nibble is always a valid key")
    }
}

/// Troubleshooting
impl Vm {
    /// Returns the contents of the framebuffer as a human readable string.
    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if self.framebuffer.pixel(x, y) {
                    write!(buf, "#")?;
                } else {
                    write!(buf, ".")?;
                }
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }
}
