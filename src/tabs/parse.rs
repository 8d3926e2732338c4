use tracing::debug;

use super::TabRecord;

pub const FIELD_SEPARATOR: char = '|';

/// Parses the interpreter output, one `url|title|window` line per tab. Blank lines, lines with
/// the wrong number of fields and lines whose window isn't a positive integer are skipped.
pub fn parse_tab_lines(output: &str) -> Vec<TabRecord> {
    output
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let record = parse_tab_line(line);
            if record.is_none() {
                debug!("Skipping malformed tab line {line:?}");
            }
            record
        })
        .collect()
}

fn parse_tab_line(line: &str) -> Option<TabRecord> {
    let parts = line.split(FIELD_SEPARATOR).collect::<Vec<_>>();
    let [url, title, window] = parts.as_slice() else {
        return None;
    };
    let window = window.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    Some(TabRecord {
        url: url.to_string(),
        title: title.to_string(),
        window,
    })
}
