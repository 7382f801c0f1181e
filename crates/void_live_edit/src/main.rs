//! Headless live-edit replay
//!
//! Loads a scene, replays a scripted input stream through a
//! `LiveEditSession` and prints the resulting transform report.
//!
//! Run with: cargo run -p void_live_edit -- <scene.toml> <script.json> [config.toml]
//!       or: cargo run -p void_live_edit -- crates/void_live_edit/demos/stage.toml \
//!           crates/void_live_edit/demos/nudge_and_align.json crates/void_live_edit/demos/live_edit.toml

use std::path::PathBuf;
use std::process::ExitCode;

use void_live_edit::export;
use void_live_edit::replay::{self, ReplayScript};
use void_live_edit::{EditConfig, LiveEditSession, NAME, VERSION};
use void_scene::SceneFile;

struct Args {
    scene: PathBuf,
    script: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args_os().skip(1);
    let scene = args.next()?.into();
    let script = args.next()?.into();
    let config = args.next().map(PathBuf::from);
    Some(Args { scene, script, config })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => EditConfig::load(path)?,
        None => EditConfig::default(),
    };

    let mut scene = SceneFile::load(&args.scene)?.instantiate()?;
    let script = ReplayScript::load(&args.script)?;
    let mut session = LiveEditSession::new(config);

    let summary = replay::run_script(&mut session, &mut scene, &script)?;
    log::info!("Replay finished after {} frames", summary.frames);

    println!("{}", summary);
    println!();

    let modified = session.modified_entities(&scene);
    if modified.is_empty() {
        println!("No entities modified.");
    } else {
        let stdout = std::io::stdout();
        export::write_report(&scene, &modified, &mut stdout.lock())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args() else {
        eprintln!("{} v{}", NAME, VERSION);
        eprintln!("usage: live_edit_replay <scene.toml> <script.json> [config.toml]");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
