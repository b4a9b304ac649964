/*!

An interpreter for CHIP-8 programs, covering the classic COSMAC VIP
dialect plus the CHIP-48 and SUPER-CHIP 1.0 variants found on the
HP48 calculators.

# Crossterm Frontend

If you want to try the interpreter on some programs, there is a
ready-to-use terminal implementation you can run with
`cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped to `1234`/`qwer`/`asdf`/`zxcv`, and `Esc` quits.

# Library

If you do not care about real input or output, wire a [`Machine`] up
with the null backends and step it by hand.

```rust
use chippy8::emulator::{Machine, SysType};
use chippy8::emulator::input::NullInput;
use chippy8::emulator::output::NullScreen;
use chippy8::emulator::sound::NullAudio;

let mut machine = Machine::new(SysType::Chip8, NullInput, NullScreen, NullAudio);

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
machine.load(&clear_display).unwrap();
machine.step().unwrap(); // Will now clear the display
```

Pick [`SysType::Chip48`] or [`SysType::SuperChip10`] instead to get
those variants' instruction semantics, including the 128x64 hi-res
mode on SUPER-CHIP.

## Custom input and output

For a real frontend, implement the `Input`, `Screen` and `Audio`
traits in `src/emulator/input.rs`, `src/emulator/output.rs` and
`src/emulator/sound.rs`, and hand your implementations to
[`Machine::new`]. The crossterm frontend under
`src/bin/crossterm_frontend` shows a complete example.

[`Machine`]: emulator::Machine
[`Machine::new`]: emulator::Machine::new
[`SysType::Chip48`]: emulator::SysType
[`SysType::SuperChip10`]: emulator::SysType
*/

pub mod emulator;
pub mod util;
