use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use intake_core::{
    format_file_size, update, IntakeSettings, IntakeState, Msg, PayloadHandle, RawFile,
    TransmissionFailed, TransmissionState,
};
use intake_engine::{probe_files, EngineHandle, ProbedFile};
use intake_logging::{intake_debug, intake_error, intake_warn};
use log::LevelFilter;

use super::cli::Cli;
use super::config::{load_config, IntakeConfig};
use super::effects::EffectRunner;
use super::navigation::TerminalNavigator;
use super::render;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    intake_logging::initialize(cli.log.into(), LevelFilter::Info);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => IntakeConfig::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    config.validate()?;

    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(ExitCode::SUCCESS);
    }

    let (probed, errors) = probe_files(&cli.files);
    for err in &errors {
        intake_warn!("skipping selection: {}", err);
    }
    let files = probed.into_iter().map(to_raw_file).collect();

    let runner = EffectRunner::new(
        EngineHandle::new(config.engine_settings()),
        Box::new(TerminalNavigator::new(&config.next_view)),
    );
    let mut session = Session::new(config.core_settings(), runner);
    session.select(files, cli.drop);

    if session.state.candidates().is_empty() {
        eprintln!(
            "No acceptable files. Supported: JPEG, PNG, PDF up to {} each.",
            format_file_size(config.max_file_size_bytes)
        );
        return Ok(ExitCode::FAILURE);
    }

    session.dispatch(Msg::SubmitClicked);
    let outcome = session.run_until_settled(POLL_INTERVAL);
    session.runner.shutdown();
    match outcome {
        Outcome::Delivered => Ok(ExitCode::SUCCESS),
        Outcome::Failed(failure) => {
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
        Outcome::NothingInFlight => Ok(ExitCode::FAILURE),
    }
}

fn to_raw_file(file: ProbedFile) -> RawFile {
    RawFile::new(
        file.name,
        file.mime_type,
        file.size_bytes,
        PayloadHandle::new(file.path),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Delivered,
    Failed(TransmissionFailed),
    NothingInFlight,
}

/// Single-threaded message loop around the reducer.
struct Session {
    state: IntakeState,
    runner: EffectRunner,
    last_render: Vec<String>,
}

impl Session {
    fn new(settings: IntakeSettings, runner: EffectRunner) -> Self {
        Self {
            state: IntakeState::with_settings(settings),
            runner,
            last_render: Vec::new(),
        }
    }

    fn select(&mut self, files: Vec<RawFile>, via_drop: bool) {
        if via_drop {
            self.dispatch(Msg::DragEntered);
            self.dispatch(Msg::FilesDropped(files));
        } else {
            self.dispatch(Msg::FilesPicked(files));
        }

        if let Some(stats) = self.state.view().last_selection {
            for rejected in &stats.rejected {
                intake_debug!("left out {}: {}", rejected.name, rejected.reason);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let lines = render::render(&state.view());
            if lines != self.last_render {
                for line in &lines {
                    println!("{line}");
                }
                self.last_render = lines;
            }
        }
        self.state = state;
        self.runner.run(effects);
    }

    /// Feeds engine events into the reducer until the attempt has either
    /// handed off or failed.
    fn run_until_settled(&mut self, poll: Duration) -> Outcome {
        loop {
            if self.runner.navigated() {
                return Outcome::Delivered;
            }
            match self.state.controller().state() {
                TransmissionState::Failed(failure) => return Outcome::Failed(failure.clone()),
                TransmissionState::Idle => return Outcome::NothingInFlight,
                TransmissionState::InProgress { .. } | TransmissionState::Succeeded => {}
            }
            match self.runner.next_msg(poll) {
                Ok(Some(msg)) => self.dispatch(msg),
                Ok(None) => {}
                Err(gone) => {
                    intake_error!("{}", gone);
                    return Outcome::Failed(TransmissionFailed::new(gone.to_string()));
                }
            }
        }
    }
}
