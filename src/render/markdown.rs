use crate::registry::MarkerPair;
use anyhow::bail;

/// Markdown header and separator rows for the given column titles.
///
/// ```text
/// | Company | Position | Location | Posting | Age |
/// | --- | --- | --- | --- | --- |
/// ```
pub fn render_header(headers: &[&str]) -> String {
    let titles = headers.join(" | ");
    let rule = vec!["---"; headers.len()].join(" | ");
    format!("| {} |\n| {} |", titles, rule)
}

/// Region content for `rows`, optionally led by the header rows.
///
/// With no rows and `with_header` set, the result is the header alone.
pub fn table_body(headers: &[&str], rows: &str, with_header: bool) -> String {
    let rows = rows.trim_matches(|c| c == '\n' || c == '\r');
    if !with_header {
        return rows.to_string();
    }
    let header = render_header(headers);
    if rows.is_empty() {
        header
    } else {
        format!("{}\n{}", header, rows)
    }
}

/// Replace everything between `pair`'s sentinels with `content`.
///
/// The new content sits on its own lines directly between the sentinels;
/// leading and trailing newlines in `content` are dropped so repeated splices
/// are stable. Line breaks follow the document: a CRLF document stays CRLF.
/// Text outside the region is left untouched.
pub fn splice_region(doc: &str, pair: &MarkerPair, content: &str) -> anyhow::Result<String> {
    let region = match pair.locate(doc)? {
        Some(r) => r,
        None => bail!("document has no {} ... {} region", pair.start, pair.end),
    };

    let nl = if doc.contains("\r\n") { "\r\n" } else { "\n" };
    let content = content
        .trim_matches(|c| c == '\n' || c == '\r')
        .lines()
        .collect::<Vec<_>>()
        .join(nl);

    let mut out = String::with_capacity(doc.len() + content.len());
    out.push_str(&doc[..region.start]);
    out.push_str(nl);
    if !content.is_empty() {
        out.push_str(&content);
        out.push_str(nl);
    }
    out.push_str(&doc[region.end..]);
    Ok(out)
}
