//! Headless driver: load a molecule file, render a mono and an anaglyph
//! frame into a recording backend and log what was drawn.
//!
//! Usage: `stereomol <file.mol> [options.toml]`

use std::path::Path;

use stereomol::elements::ElementTable;
use stereomol::engine::{MoleculeViewer, ViewerCommand};
use stereomol::options::Options;
use stereomol::renderer::{BackendCall, RecordingBackend};

const WINDOW_SIZE: (u32, u32) = (800, 600);

fn load_options(path: Option<String>) -> Result<Options, String> {
    match path {
        Some(path) => Options::load(Path::new(&path))
            .map_err(|e| format!("failed to load options {path}: {e}")),
        None => Ok(Options::default()),
    }
}

fn log_frame(label: &str, backend: &mut RecordingBackend) {
    let calls = backend.take_calls();
    let call_lists = calls
        .iter()
        .filter(|c| matches!(c, BackendCall::CallList(_)))
        .count();
    let compiled: usize = calls
        .iter()
        .map(|c| match c {
            BackendCall::Compile { commands, .. } => *commands,
            _ => 0,
        })
        .sum();
    log::info!(
        "{label}: {} backend calls, {call_lists} list replays, {compiled} commands compiled",
        calls.len()
    );
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(mol_path) = args.next() else {
        log::error!("Usage: stereomol <file.mol> [options.toml]");
        std::process::exit(1);
    };

    let options = match load_options(args.next()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut backend = RecordingBackend::new();
    let mut viewer = MoleculeViewer::new(options, ElementTable::standard());
    viewer.resize(WINDOW_SIZE.0, WINDOW_SIZE.1);

    if let Err(e) = viewer.load_file(&mut backend, Path::new(&mol_path)) {
        log::error!("{mol_path}: {e}");
        std::process::exit(1);
    }
    log::info!(
        "'{}' ({}): detail {}, {}",
        viewer.molecule().name(),
        viewer.molecule().comment(),
        viewer.view().detail().name(),
        viewer.scene_stats()
    );
    log_frame("load", &mut backend);

    let mono = viewer.render(&mut backend);
    log::info!("mono frame: {mono:?}");
    log_frame("mono", &mut backend);

    viewer.execute(ViewerCommand::SetAnaglyph { enabled: true });
    let stereo = viewer.render(&mut backend);
    log::info!(
        "anaglyph frame: {stereo:?}, convergence {:.3} deg",
        viewer
            .camera()
            .convergence_degrees(viewer.view().eye_separation())
    );
    log_frame("anaglyph", &mut backend);

    viewer.release(&mut backend);
    log_frame("release", &mut backend);
}
