use std::path::PathBuf;

use structopt::StructOpt;

use chippy8::emulator::{Machine, SysType};

mod beep_audio;
mod crossterm_io;
mod key_manager;
mod key_state;

use beep_audio::BeepAudio;
use crossterm_io::{CrosstermInput, CrosstermScreen};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    rom: PathBuf,

    /// Which machine to imitate: chip8, chip48 or superchip
    #[structopt(short, long, default_value = "chip8")]
    target: SysType,

    /// Disable the speaker
    #[structopt(short, long)]
    mute: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read the program file
    let opt = Opt::from_args();
    log::info!("Executing {:?} as {:?}", &opt.rom, opt.target);

    let key_manager = KeyManager::new();

    let mut machine = Machine::new(
        opt.target,
        CrosstermInput::new(&key_manager),
        CrosstermScreen::new()?,
        BeepAudio::new(!opt.mute),
    );
    machine.load_program(&opt.rom)?;

    // Run until Esc is pressed
    machine.run()?;

    Ok(())
}
