//! Headless molpick session driven by line commands on stdin.
//!
//! Usage: `molpick [fragment]`. The optional argument seeds the URL
//! fragment, so a shared link can be replayed. Options are read from the
//! TOML file named by `MOLPICK_OPTIONS` when set.

use std::io::{self, BufRead, Write};
use std::path::Path;

use molpick::backend::HttpBackend;
use molpick::options::Options;
use molpick::persist::{Location, MemoryLocation};
use molpick::scene::MemoryStage;
use molpick::search::{mpsc_channel, ControllerMessage};
use molpick::{MoleculeController, MolpickError};

const HELP: &str = "\
commands:
  ids [text]          list identifiers matching text
  load <id>           load a molecule
  pick <index>        toggle the atom at index
  pair <p1> <p2>      pair two picked atoms by list position
  pairmode            toggle pair picking
  click <name>        click a scene primitive (e.g. atom12)
  del-atom <p>        delete a picked atom
  del-pair <p>        delete a pair
  center-atom <p>     center the camera on a picked atom
  center-pair <p>     center the camera on a pair
  hash                print the URL fragment
  restore <fragment>  restore a selection from a fragment
  tables              print the tables
  search [postgis|no-postgis]
                      submit the pairs as a search (default from options)
  help                show this text
  quit | exit";

/// Frame step used to play camera animations to completion.
const FRAME_DT: f32 = 1.0 / 60.0;

type Controller = MoleculeController<HttpBackend, MemoryStage, MemoryLocation>;

struct Session {
    controller: Controller,
}

fn index_arg(arg: Option<&str>) -> Result<usize, MolpickError> {
    let arg = arg.ok_or_else(|| MolpickError::Payload("missing index".to_owned()))?;
    arg.parse()
        .map_err(|_| MolpickError::Payload(format!("not an index: {arg}")))
}

impl Session {
    /// Run one command line. Returns false on `quit`.
    fn run(&mut self, line: &str, out: &mut impl Write) -> Result<bool, MolpickError> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(true);
        };
        let ctl = &mut self.controller;
        match command {
            "ids" => {
                let search = parts.collect::<Vec<_>>().join(" ");
                ctl.refresh_identifiers(&search)?;
                writeln!(out, "{}", ctl.identifiers().join(" "))?;
            }
            "load" => {
                let id = parts
                    .next()
                    .ok_or_else(|| MolpickError::Payload("missing id".to_owned()))?;
                ctl.select_molecule(id)?;
                writeln!(out, "{} atoms", ctl.atoms().len())?;
            }
            "pick" => {
                let toggled = ctl.toggle_atom_selection(index_arg(parts.next())?)?;
                writeln!(out, "{toggled:?}")?;
            }
            "pair" => {
                let p1 = index_arg(parts.next())?;
                let p2 = index_arg(parts.next())?;
                let position = ctl.add_pair(p1, p2)?;
                writeln!(out, "{}", ctl.tables().pair_rows[position].distance)?;
            }
            "pairmode" => {
                let _ = ctl.toggle_pair_picking();
                writeln!(out, "[{}]", ctl.pair_mode_label())?;
            }
            "click" => ctl.on_click(parts.next()),
            "del-atom" => ctl.delete_atom(index_arg(parts.next())?)?,
            "del-pair" => ctl.delete_pair(index_arg(parts.next())?)?,
            "center-atom" | "center-pair" => {
                let position = index_arg(parts.next())?;
                if command == "center-atom" {
                    ctl.center_on_atom(position)?;
                } else {
                    ctl.center_on_pair(position)?;
                }
                while ctl.tick(FRAME_DT) {}
                let camera = ctl.stage().camera();
                writeln!(
                    out,
                    "focus {:?} distance {:.2}",
                    camera.focus_point(),
                    camera.distance()
                )?;
            }
            "hash" => {
                writeln!(out, "#{}", ctl.location().fragment().unwrap_or_default())?;
            }
            "restore" => {
                let fragment = parts.next().unwrap_or_default();
                ctl.location_mut().set_fragment(fragment);
                let _ = ctl.restore_from_fragment()?;
            }
            "tables" => {
                write!(out, "{}", ctl.tables())?;
                writeln!(out, "[{}]", ctl.pair_mode_label())?;
            }
            "search" => {
                let use_postgis = match parts.next() {
                    None => None,
                    Some("postgis") => Some(true),
                    Some("no-postgis") => Some(false),
                    Some(other) => {
                        return Err(MolpickError::Payload(format!(
                            "expected postgis or no-postgis, got {other:?}"
                        )))
                    }
                };
                self.search(use_postgis, out)?;
            }
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(false),
            other => writeln!(out, "unknown command {other:?}; try help")?,
        }
        Ok(true)
    }

    /// Submit and play the results side of the hand-off in-process.
    /// `None` takes the configured PostGIS default.
    fn search(
        &mut self,
        use_postgis: Option<bool>,
        out: &mut impl Write,
    ) -> Result<(), MolpickError> {
        let (channel, mut context) = mpsc_channel();
        let channel = Box::new(channel);
        match use_postgis {
            Some(flag) => self.controller.submit_search(flag, channel)?,
            None => self.controller.submit_default_search(channel)?,
        }
        let _ = context.recv()?;
        writeln!(out, "results at {}", context.opened_url().unwrap_or_default())?;

        context.signal_ready()?;
        let _ = self.controller.poll_search()?;
        match context.recv()? {
            Some(ControllerMessage::Initialize {
                sql_query,
                search_data,
            }) => {
                writeln!(out, "{} constraint(s)\n{sql_query}", search_data.len())?;
                context.acknowledge()?;
            }
            Some(ControllerMessage::Failed { message }) => writeln!(out, "{message}")?,
            Some(ControllerMessage::Open { .. }) | None => {}
        }
        let state = self.controller.poll_search()?;
        log::debug!("search hand-off ended in {state:?}");
        Ok(())
    }

    fn flush_notices(&mut self, out: &mut impl Write) -> io::Result<()> {
        for notice in self.controller.take_notices() {
            writeln!(out, "! {notice}")?;
        }
        Ok(())
    }
}

fn load_options() -> Result<Options, MolpickError> {
    match std::env::var_os("MOLPICK_OPTIONS") {
        Some(path) => Options::load(Path::new(&path)),
        None => Ok(Options::default()),
    }
}

fn main() {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let location = std::env::args()
        .nth(1)
        .map_or_else(MemoryLocation::default, |fragment| {
            MemoryLocation::with_fragment(&fragment)
        });
    let backend = HttpBackend::new(&options.backend);
    log::info!("backend at {}", backend.base_url());
    let stage = MemoryStage::new(&options.camera);

    let mut session = Session {
        controller: MoleculeController::new(options, backend, stage, location),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = session.controller.start() {
        log::warn!("startup: {e}");
    }
    let _ = session.flush_notices(&mut out);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("stdin: {e}");
                break;
            }
        };
        match session.run(&line, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => log::error!("{e}"),
        }
        let _ = session.flush_notices(&mut out);
        let _ = out.flush();
    }
}
