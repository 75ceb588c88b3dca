//! Output formatting for compiled queries

use regex::Regex;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::LazyLock;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// Escaped values never contain a bare ` AND `; values marked safe may, and
// those words get highlighted as well
static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" (?:AND|OR) ").expect("operator pattern is a valid regex")
});

/// JSON form of a compiled query
#[derive(Debug, Serialize)]
pub struct QueryOutput<'a> {
    pub q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repr: Option<&'a str>,
}

/// Print a compiled query, as JSON or as highlighted text
pub fn print_query(query: &str, repr: Option<&str>, json: bool, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    if json {
        let out = QueryOutput { q: query, repr };
        serde_json::to_writer(&mut stdout, &out)?;
        writeln!(stdout)?;
        return Ok(());
    }

    write_highlighted(&mut stdout, query)?;
    writeln!(stdout)?;

    if let Some(repr) = repr {
        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(stdout, "{}", repr)?;
        stdout.reset()?;
    }

    Ok(())
}

/// Write a query with boolean operators colored
pub fn write_highlighted<W: WriteColor>(out: &mut W, query: &str) -> io::Result<()> {
    let mut last = 0;
    for m in OPERATOR.find_iter(query) {
        out.write_all(query[last..m.start()].as_bytes())?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        out.write_all(m.as_str().as_bytes())?;
        out.reset()?;
        last = m.end();
    }
    out.write_all(query[last..].as_bytes())
}
