use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use super::models::{RegionView, ReportView};
use crate::models::RegionClass;
use crate::utils::color_choice;

fn write_or_print(content: &str, output_file: Option<&str>) -> Result<()> {
    if let Some(path) = output_file {
        std::fs::write(path, content)?;
        println!("Wrote report view to {}", path);
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn class_color(class: RegionClass) -> Color {
    match class {
        RegionClass::ChangeOnly => Color::White,
        RegionClass::DefaultRule => Color::Cyan,
        RegionClass::SummaryFlow => Color::Magenta,
        RegionClass::Unclassified => Color::Yellow,
    }
}

// ===== Terminal Output =====

pub fn output_terminal(view: &ReportView) -> Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    let overview = &view.overview;

    // Header
    writeln!(&mut stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(&mut stdout, "{}", overview.title)?;
    writeln!(&mut stdout, "{}", "=".repeat(overview.title.chars().count()))?;
    stdout.reset()?;
    if let (Some(pilot), Some(production)) = (&overview.pilot, &overview.production) {
        writeln!(&mut stdout, "Pilot: {} | Production: {}", pilot, production)?;
    }
    if let Some(generated) = &overview.report_generated_at {
        writeln!(&mut stdout, "Generated: {}", generated)?;
    }
    writeln!(&mut stdout, "Filters: {}", overview.filters)?;
    writeln!(
        &mut stdout,
        "Regions: {} shown, {} hidden ({} fragments visible)",
        overview.shown_regions, overview.hidden_regions, overview.visible_fragments
    )?;

    for region in &view.regions {
        writeln!(&mut stdout)?;
        write_region(&mut stdout, region)?;
    }

    // Script
    if let Some(script) = &view.script {
        writeln!(&mut stdout)?;
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(&mut stdout, "--- Remediation Script ---")?;
        stdout.reset()?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(&mut stdout, "  {}", script.suggested_filename)?;
        stdout.reset()?;
        writeln!(
            &mut stdout,
            " ({} fragments, {} bytes, sha256 {})",
            script.fragment_count,
            script.bytes,
            &script.sha256[..12.min(script.sha256.len())]
        )?;
    }
    writeln!(&mut stdout)?;

    Ok(())
}

fn write_region(stdout: &mut StandardStream, region: &RegionView) -> Result<()> {
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "--- {} ---", display_heading(region))?;
    stdout.reset()?;
    stdout.set_color(ColorSpec::new().set_fg(Some(class_color(region.class))))?;
    writeln!(stdout, " [{}]", region.class)?;
    stdout.reset()?;

    for line in &region.lines {
        writeln!(stdout, "  {}", line)?;
    }
    for fragment in &region.fragments {
        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
        for line in fragment.lines() {
            writeln!(stdout, "  > {}", line)?;
        }
        stdout.reset()?;
    }
    Ok(())
}

fn display_heading(region: &RegionView) -> &str {
    if region.heading.is_empty() {
        &region.id
    } else {
        &region.heading
    }
}

// ===== JSON Output =====

pub fn output_json(view: &ReportView, output_file: Option<&str>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(view)?;
    json.push('\n');
    write_or_print(&json, output_file)
}

// ===== Markdown Output =====

pub fn output_markdown(view: &ReportView, output_file: Option<&str>) -> Result<()> {
    let overview = &view.overview;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", overview.title));
    if let (Some(pilot), Some(production)) = (&overview.pilot, &overview.production) {
        md.push_str(&format!(
            "**Pilot:** `{}` | **Production:** `{}`\n\n",
            pilot, production
        ));
    }
    md.push_str(&format!("**Filters:** {}\n\n", overview.filters));

    md.push_str("| Class | Total | Shown |\n");
    md.push_str("|-------|-------|-------|\n");
    for c in &overview.classes {
        md.push_str(&format!("| {} | {} | {} |\n", c.class, c.total, c.shown));
    }
    md.push('\n');

    for region in &view.regions {
        md.push_str(&format!(
            "## {} `{}`\n\n",
            display_heading(region),
            region.class
        ));
        for line in &region.lines {
            md.push_str(&format!("- {}\n", line));
        }
        if !region.lines.is_empty() {
            md.push('\n');
        }
        for fragment in &region.fragments {
            md.push_str("```powershell\n");
            md.push_str(fragment);
            if !fragment.ends_with('\n') {
                md.push('\n');
            }
            md.push_str("```\n\n");
        }
    }

    if let Some(script) = &view.script {
        md.push_str("## Remediation Script\n\n");
        md.push_str(&format!(
            "`{}` ({}): {} fragments, {} bytes, sha256 `{}`\n",
            script.suggested_filename,
            script.media_type,
            script.fragment_count,
            script.bytes,
            script.sha256
        ));
    }

    write_or_print(&md, output_file)
}

// ===== HTML Output =====

pub fn output_html(view: &ReportView, output_file: Option<&str>) -> Result<()> {
    write_or_print(&render_html(view), output_file)
}

fn render_html(view: &ReportView) -> String {
    let overview = &view.overview;
    let mut s = String::new();
    s.push_str("<html lang=\"en\"><head><meta charset=\"utf-8\"><title>");
    s.push_str(&html_escape(&overview.title));
    s.push_str("</title><style>body{font-family:Segoe UI,system-ui,Arial,sans-serif;margin:24px} .region{border:1px solid #e5e7eb;border-radius:8px;padding:12px;margin:12px 0} .class{font-size:12px;color:#6b7280} pre.script-fragment{background:#f3f4f6;padding:8px;border-radius:6px;white-space:pre-wrap} .sub{color:#6b7280;font-size:13px}</style></head><body>");
    s.push_str(&format!("<h1>{}</h1>", html_escape(&overview.title)));
    if let (Some(pilot), Some(production)) = (&overview.pilot, &overview.production) {
        s.push_str(&format!(
            "<div class=\"sub\">Pilot: {} | Production: {}</div>",
            html_escape(pilot),
            html_escape(production)
        ));
    }
    s.push_str(&format!(
        "<div class=\"sub\">{}</div>",
        html_escape(&overview.filters.to_string())
    ));

    for region in &view.regions {
        s.push_str(&format!(
            "<section class=\"region {}\" id=\"{}\"><h3>{} <span class=\"class\">{}</span></h3>",
            region.class.to_string().to_lowercase(),
            html_escape(&region.id),
            html_escape(display_heading(region)),
            region.class
        ));
        for line in &region.lines {
            s.push_str(&format!("<div>{}</div>", html_escape(line)));
        }
        for fragment in &region.fragments {
            s.push_str(&format!(
                "<pre class=\"script-fragment\">{}</pre>",
                html_escape(fragment)
            ));
        }
        s.push_str("</section>");
    }

    if let Some(script) = &view.script {
        s.push_str(&format!(
            "<div class=\"region\"><h3>Remediation Script</h3><div>{} ({} fragments, {} bytes)</div><div class=\"sub\">sha256 {}</div></div>",
            html_escape(&script.suggested_filename),
            script.fragment_count,
            script.bytes,
            script.sha256
        ));
    }
    s.push_str("</body></html>\n");
    s
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
