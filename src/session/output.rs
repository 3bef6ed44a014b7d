use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use super::Session;
use crate::delivery::{Delivery, Host};
use crate::utils::color_choice;

pub fn print_help() -> Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(&mut stdout, "Commands:")?;
    stdout.reset()?;
    writeln!(&mut stdout, "  changes   toggle 'only show changes' (offers the script)")?;
    writeln!(&mut stdout, "  defaults  toggle 'hide default rules'")?;
    writeln!(&mut stdout, "  summary   toggle 'hide end-to-end summary'")?;
    writeln!(&mut stdout, "  status    show current filters and download")?;
    writeln!(&mut stdout, "  quit      leave the session")?;
    Ok(())
}

pub fn print_status<H: Host>(session: &Session<H>) -> Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    let visibility = session.visibility();

    writeln!(&mut stdout)?;
    writeln!(&mut stdout, "Filters: {}", session.state())?;
    writeln!(
        &mut stdout,
        "Regions: {} shown, {} hidden",
        visibility.shown_count(),
        visibility.hidden_count()
    )?;

    for (index, region) in session.document().regions.iter().enumerate() {
        if !visibility.is_shown(index) {
            continue;
        }
        writeln!(&mut stdout, "  [{}] {}", region.class, region.id)?;
    }

    match session.download() {
        Some(Delivery::Link(link)) => {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(&mut stdout, "Download {}", link.suggested_filename)?;
            stdout.reset()?;
            writeln!(&mut stdout, ": {}", link.url)?;
        }
        Some(Delivery::Saved { path }) => {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(&mut stdout, "Saved")?;
            stdout.reset()?;
            writeln!(&mut stdout, ": {}", path.display())?;
        }
        None => writeln!(&mut stdout, "Download: not offered (changes-only view is off)")?,
    }
    writeln!(&mut stdout)?;
    Ok(())
}

pub fn print_error(message: &str) -> Result<()> {
    let mut stderr = StandardStream::stderr(color_choice());
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(&mut stderr, "Error")?;
    stderr.reset()?;
    writeln!(&mut stderr, ": {}", message)?;
    Ok(())
}
