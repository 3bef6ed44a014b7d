mod output;

use anyhow::Result;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

use crate::delivery::{Delivery, DeliveryAdapter, Host, SaveHost, StagingHost};
use crate::filter::{FilterState, Toggle, Visibility, apply_filters};
use crate::models::ReportDocument;
use crate::report::loader::load_report;
use crate::script::assemble;

/// Holds one loaded report and reacts to operator toggles.
pub struct Session<H: Host> {
    doc: ReportDocument,
    state: FilterState,
    visibility: Visibility,
    delivery: DeliveryAdapter<H>,
    download: Option<Delivery>,
}

impl<H: Host> Session<H> {
    pub fn new(doc: ReportDocument, host: H) -> Self {
        let state = FilterState::default();
        let visibility = apply_filters(&doc, &state);
        Session {
            doc,
            state,
            visibility,
            delivery: DeliveryAdapter::new(host),
            download: None,
        }
    }

    /// Flip one filter, recompute visibility, then re-assemble and redeliver
    /// the script while changes-only is on, or withdraw it otherwise.
    pub fn toggle(&mut self, toggle: Toggle) -> Result<()> {
        self.state = self.state.toggle(toggle);
        self.visibility = apply_filters(&self.doc, &self.state);
        debug!(?toggle, state = %self.state, shown = self.visibility.shown_count(), "filters applied");

        self.download = None;
        if self.visibility.download_offered() {
            let script = assemble(&self.doc, &self.visibility);
            self.download = Some(self.delivery.deliver(&script)?);
        } else {
            self.delivery.withdraw();
            info!("download withdrawn");
        }
        Ok(())
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn document(&self) -> &ReportDocument {
        &self.doc
    }

    /// The download currently offered, if any.
    pub fn download(&self) -> Option<&Delivery> {
        self.download.as_ref()
    }

    #[cfg(test)]
    pub fn delivery(&self) -> &DeliveryAdapter<H> {
        &self.delivery
    }
}

/// Run an interactive toggle session over stdin.
pub fn run_session(report_path: &str, staging_dir: Option<&str>, out_dir: &str) -> Result<()> {
    let doc = load_report(Path::new(report_path))?;
    let stdin = std::io::stdin();
    match staging_dir {
        Some(dir) => run_loop(Session::new(doc, StagingHost::new(dir, out_dir)), stdin.lock()),
        None => run_loop(Session::new(doc, SaveHost::new(out_dir)), stdin.lock()),
    }
}

fn run_loop<H: Host, R: BufRead>(mut session: Session<H>, input: R) -> Result<()> {
    output::print_help()?;
    output::print_status(&session)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "status" => output::print_status(&session)?,
            "help" => output::print_help()?,
            other => match Toggle::from_command(other) {
                Some(toggle) => match session.toggle(toggle) {
                    Ok(()) => output::print_status(&session)?,
                    Err(e) => output::print_error(&format!("{:#}", e))?,
                },
                None => output::print_error(&format!("Unknown command: {}", other))?,
            },
        }
    }
    Ok(())
}
