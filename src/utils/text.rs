// Plain-text rendering of the rich text the portal stores in announcements

/// Strip markup tags and decode the common entities.
/// Block-level closing tags and `<br>` become line breaks.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }
        let name = tag
            .trim_start_matches('/')
            .split(|ch: char| ch.is_whitespace() || ch == '/')
            .next()
            .unwrap_or("")
            .to_lowercase();
        let closing = tag.starts_with('/');
        match name.as_str() {
            "br" => out.push('\n'),
            "p" | "div" | "li" | "h1" | "h2" | "h3" | "h4" if closing => out.push('\n'),
            "li" => out.push_str("- "),
            _ => {}
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to `max` characters, marking the cut with ".."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 2 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 2).collect();
    out.push_str("..");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Selamat!</p><p>Anda <b>lolos</b>.</p>"), "Selamat!\nAnda lolos.");
        assert_eq!(strip_html("Baris 1<br/>Baris 2"), "Baris 1\nBaris 2");
        assert_eq!(strip_html("<ul><li>KTP</li><li>Ijazah</li></ul>"), "- KTP\n- Ijazah");
        assert_eq!(strip_html("Tom &amp; Jerry&nbsp;&lt;3"), "Tom & Jerry <3");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Analis Data", 20), "Analis Data");
        assert_eq!(truncate("Analis Data Senior", 10), "Analis D..");
        assert_eq!(truncate("abc", 2), "ab");
    }
}
