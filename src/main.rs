use std::{error::Error, path::PathBuf};

use alarm_clock::{
    config::Config,
    controller::AlarmController,
    sound::{default_backend, SoundPlayer},
    Clock,
};
use clap::{Parser, Subcommand};
use eframe::{egui::ViewportBuilder, run_native};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
    /// sound to play when the alarm goes off
    #[clap(long, short)]
    sound: Option<PathBuf>,
    /// minutes to snooze for
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    snooze: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    if let Err(e) = simple_file_logger::init_logger!("alarm_clock") {
        eprintln!("couldn't initialize logger: {e:?}");
    }

    let args = Args::parse();
    let config_path = Config::config_path()?;
    if let Some(Command::Init { force }) = args.command {
        if force || !config_path.exists() {
            Config::new().save(&config_path)?;
            log::info!("wrote default config to {}", config_path.display());
        } else {
            log::warn!(
                "config already exists at {}, use --force to overwrite",
                config_path.display()
            );
        }
    }

    let mut config = Config::load_or_default(&config_path);
    if let Some(sound) = args.sound {
        config.sound = sound;
    }
    if let Some(snooze) = args.snooze {
        config.snooze_minutes = snooze;
    }

    let player = SoundPlayer::new(default_backend(), config.sound.clone());
    let controller = AlarmController::new(config.snooze_minutes, player);

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Digital Clock with Alarm")
            .with_inner_size([400.0, 350.0])
            .with_resizable(false),
        ..Default::default()
    };
    // run the gui
    run_native(
        "Digital Clock with Alarm",
        native_options,
        Box::new(|_| Ok(Box::new(Clock::new(config, controller)))),
    )
    .map_err(|e| e.into())
}
