//! Source fix-ups applied to WordprocessingML parts around rendering.
//!
//! Word freely splits typed text into several runs, so a tag such as
//! `{{ name }}` often reaches us as `{{</w:t></w:r><w:r><w:t> name }}`.
//! [`prepare`] puts the tags back together before the engine sees them and
//! [`finish`] turns control characters in rendered text into real markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPLIT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(?:<[^>]*>)+([{%#])").expect("valid regex"));

static SPLIT_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([}%#])(?:<[^>]*>)+\}").expect("valid regex"));

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").expect("valid regex"));

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<w:t(?:\s[^>]*)?>)([^<]*)</w:t>").expect("valid regex"));

const PRESERVE_OPEN: &str = r#"<w:t xml:space="preserve">"#;

/// Element a scoped block tag (`{%tr ... %}` etc.) stands in for, in processing order.
const SCOPES: &[&str] = &["tr", "tc", "p", "r"];

/// Makes a part's XML ready for the template engine.
pub fn prepare(xml: &str) -> String {
    let joined = SPLIT_OPEN.replace_all(xml, "{$1");
    let joined = SPLIT_CLOSE.replace_all(&joined, "$1}");
    let mut out = TAG
        .replace_all(&joined, |caps: &Captures| clean_tag(&caps[0]))
        .into_owned();
    for scope in SCOPES {
        out = unwrap_scoped(&out, scope);
    }
    out
}

/// Post-processes rendered XML.
pub fn finish(xml: &str) -> String {
    let resolved = TEXT_RUN.replace_all(xml, |caps: &Captures| resolve_text(caps));
    resolved
        .replace("{_{", "{{")
        .replace("}_}", "}}")
        .replace("{_%", "{%")
        .replace("%_}", "%}")
}

fn clean_tag(tag: &str) -> String {
    MARKUP
        .replace_all(tag, "")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
}

/// Replaces the element enclosing each `{%<scope> ... %}` with a plain `{% ... %}`.
fn unwrap_scoped(xml: &str, scope: &str) -> String {
    let marker = format!("{{%{} ", scope);
    let starts = [format!("<w:{} ", scope), format!("<w:{}>", scope)];
    let end = format!("</w:{}>", scope);

    let mut xml = xml.to_string();
    let mut from = 0;
    while let Some(rel) = xml[from..].find(&marker) {
        let tag_start = from + rel;
        let Some(close) = xml[tag_start..].find("%}") else {
            break;
        };
        let tag_end = tag_start + close + 2;
        let plain = format!("{{% {} %}}", xml[tag_start + marker.len()..tag_end - 2].trim());

        // Only an element that is still open at the tag and closes after it encloses it.
        let elem_start = starts
            .iter()
            .filter_map(|s| xml[from..tag_start].rfind(s.as_str()))
            .max()
            .map(|i| from + i)
            .filter(|&s| !is_self_closing(&xml[s..]) && !xml[s..tag_start].contains(&end));
        let elem_end = xml[tag_end..]
            .find(&end)
            .filter(|&i| !starts.iter().any(|s| xml[tag_end..tag_end + i].contains(s.as_str())))
            .map(|i| tag_end + i + end.len());

        let range = match (elem_start, elem_end) {
            (Some(s), Some(e)) => s..e,
            _ => tag_start..tag_end,
        };
        let next = range.start + plain.len();
        xml.replace_range(range, &plain);
        from = next;
    }
    xml
}

fn is_self_closing(element: &str) -> bool {
    element
        .find('>')
        .is_some_and(|i| element[..i].ends_with('/'))
}

fn resolve_text(caps: &Captures) -> String {
    let open = &caps[1];
    let text = &caps[2];
    let has_breaks = text.contains(['\n', '\t']);
    let needs_preserve = !open.contains("xml:space")
        && (text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace));
    if !has_breaks && !needs_preserve {
        return caps[0].to_string();
    }

    let mut out = String::with_capacity(text.len() + 64);
    out.push_str(PRESERVE_OPEN);
    for ch in text.chars() {
        match ch {
            '\n' => {
                out.push_str("</w:t><w:br/>");
                out.push_str(PRESERVE_OPEN);
            }
            '\t' => {
                out.push_str("</w:t><w:tab/>");
                out.push_str(PRESERVE_OPEN);
            }
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push_str("</w:t>");
    out
}
