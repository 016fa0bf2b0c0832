use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";

/// Whether the name of `path` maps to `application/pdf`.
pub fn is_pdf_path(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str() == PDF_MIME)
        .unwrap_or(false)
}

/// Strip a trailing `.pdf` (any case) from an uploaded file name.
pub fn strip_pdf_extension(filename: &str) -> &str {
    let split = filename.len().saturating_sub(4);
    match (filename.get(..split), filename.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".pdf") => stem,
        _ => filename,
    }
}

/// Name of the saved presentation for an uploaded PDF, e.g. `deck_slides.pptx`.
pub fn pptx_download_name(filename: &str) -> String {
    format!("{}_slides.pptx", strip_pdf_extension(filename))
}

/// Display name of a selected file.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_pdf_path() {
        assert!(is_pdf_path(Path::new("deck.pdf")));
        assert!(is_pdf_path(Path::new("/tmp/Report.PDF")));
        assert!(!is_pdf_path(Path::new("notes.txt")));
        assert!(!is_pdf_path(Path::new("deck.pdf.zip")));
        assert!(!is_pdf_path(Path::new("pdf")));
    }

    #[test]
    fn test_strip_pdf_extension() {
        assert_eq!(strip_pdf_extension("deck.pdf"), "deck");
        assert_eq!(strip_pdf_extension("Deck.PDF"), "Deck");
        assert_eq!(strip_pdf_extension("my.pdf.notes.pdf"), "my.pdf.notes");
        assert_eq!(strip_pdf_extension("deck"), "deck");
        assert_eq!(strip_pdf_extension(".pdf"), "");
        assert_eq!(strip_pdf_extension("日本語"), "日本語");
    }

    #[test]
    fn test_pptx_download_name() {
        assert_eq!(pptx_download_name("deck.pdf"), "deck_slides.pptx");
        assert_eq!(pptx_download_name("deck"), "deck_slides.pptx");
    }

    #[test]
    fn test_display_file_name() {
        assert_eq!(display_file_name(&PathBuf::from("/a/b/deck.pdf")), "deck.pdf");
    }
}
