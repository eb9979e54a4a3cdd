// Builds the three export formats: print-ready HTML (the PDF path goes
// through the system browser's print dialog, which is the only reliable
// way to embed Bengali fonts), a Word-compatible .doc file, and plain
// text. Story text is escaped before it is placed into markup.

use std::fs;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_EXPORT_STEM: &str = "Bengali_Story";

/// Minimal HTML escaping for text interpolated into the export templates.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// A standalone HTML page that opens the print dialog when loaded.
/// Uses the Hind Siliguri webfont so Bengali renders the same on
/// every platform.
pub fn print_html(title: &str, content: &str) -> String {
    let title = html_escape(title);
    let content = html_escape(content);
    format!(
        r#"<!DOCTYPE html>
<html lang="bn">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link href="https://fonts.googleapis.com/css2?family=Hind+Siliguri&display=swap" rel="stylesheet">
  <style>
    body {{ font-family: 'Hind Siliguri', sans-serif; padding: 40px; line-height: 1.6; }}
    h1 {{ text-align: center; margin-bottom: 30px; }}
    .content {{ white-space: pre-wrap; font-size: 16px; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <div class="content">{content}</div>
  <script>
    window.onload = () => {{
      window.print();
      window.onafterprint = () => window.close();
    }};
  </script>
</body>
</html>
"#
    )
}

/// A .doc file as Word-flavored HTML with a UTF-8 BOM, which is what
/// Word needs to pick up the encoding.
pub fn word_doc_bytes(title: &str, content: &str) -> Vec<u8> {
    let title = html_escape(title);
    let content = html_escape(content);
    let html = format!(
        r#"<html xmlns:o='urn:schemas-microsoft-com:office:office'
      xmlns:w='urn:schemas-microsoft-com:office:word'
      xmlns='http://www.w3.org/TR/REC-html40'>
<head><meta charset='utf-8'><title>{title}</title></head>
<body style="font-family:'Courier New', Courier, monospace;">
  <h1>{title}</h1>
  <p style="white-space: pre-wrap;">{content}</p>
</body>
</html>"#
    );

    let mut bytes = "\u{feff}".as_bytes().to_vec();
    bytes.extend_from_slice(html.as_bytes());
    bytes
}

/// Plain text: the title as a heading line, then the story.
pub fn plain_text(title: &str, content: &str) -> String {
    if title.trim().is_empty() {
        content.to_string()
    } else {
        format!("{}\n\n{}", title.trim(), content)
    }
}

/// Derive a file name from the story title, falling back to
/// [`DEFAULT_EXPORT_STEM`] when the title is empty. Characters that are
/// unsafe in file names are replaced, Bengali text passes through.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stem = if cleaned.is_empty() {
        DEFAULT_EXPORT_STEM.to_string()
    } else {
        cleaned
    };
    format!("{}.{}", stem, extension)
}

/// Write export bytes, creating parent directories if needed.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directories for '{}': {}", path.display(), e))?;
    }

    fs::write(path, bytes).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

/// Hand a file to the platform opener, e.g. the browser for the
/// print-ready HTML.
pub fn open_in_default_app(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    command
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"নদী" & পাহাড়</b>"#),
            "&lt;b&gt;&quot;নদী&quot; &amp; পাহাড়&lt;/b&gt;"
        );
    }

    #[test]
    fn test_print_html_structure() {
        let html = print_html("ছায়া", "প্রথম\n\nদ্বিতীয়");

        assert!(html.contains("<html lang=\"bn\">"));
        assert!(html.contains("Hind+Siliguri"));
        assert!(html.contains("<h1>ছায়া</h1>"));
        assert!(html.contains("white-space: pre-wrap"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("প্রথম\n\nদ্বিতীয়"));
    }

    #[test]
    fn test_print_html_escapes_markup() {
        let html = print_html("<script>", "1 < 2");

        assert!(html.contains("<title>&lt;script&gt;</title>"));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_word_doc_starts_with_bom() {
        let bytes = word_doc_bytes("ছায়া", "লেখা");

        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
        let html = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(html.contains("urn:schemas-microsoft-com:office:word"));
        assert!(html.contains("<h1>ছায়া</h1>"));
    }

    #[test]
    fn test_plain_text_layout() {
        assert_eq!(plain_text("ছায়া", "লেখা"), "ছায়া\n\nলেখা");
        assert_eq!(plain_text("", "লেখা"), "লেখা");
        assert_eq!(plain_text("  ", "লেখা"), "লেখা");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("ছায়া", "doc"), "ছায়া.doc");
        assert_eq!(export_file_name("", "txt"), "Bengali_Story.txt");
        assert_eq!(export_file_name("a/b:c", "doc"), "a_b_c.doc");
    }

    #[test]
    fn test_write_export_creates_parents() {
        let temp_dir = std::env::temp_dir().join("lekhak-test-export");
        let _ = fs::remove_dir_all(&temp_dir);

        let path = temp_dir.join("nested/out.txt");
        write_export(&path, "লেখা".as_bytes()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "লেখা");

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }
}
