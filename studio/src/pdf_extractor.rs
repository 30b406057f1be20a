use crate::error::{StudioError, StudioResult};

/// Characters of extracted PDF text kept when building a prompt.
pub const MAX_PDF_CONTEXT_CHARS: usize = 100_000;

pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Text of every page, in document order, with nothing between pages.
    pub fn extract_text(&self, pdf: &[u8]) -> StudioResult<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf)
            .map_err(|e| StudioError::Extraction(e.to_string()))?;

        log::info!("Extracted text from {} PDF pages", pages.len());
        Ok(pages.concat())
    }

    /// Runs [`Self::extract_text`] on the blocking pool. A panic inside the
    /// parser is reported as an extraction error.
    pub async fn extract_text_blocking(&self, pdf: Vec<u8>) -> StudioResult<String> {
        tokio::task::spawn_blocking(move || PdfTextExtractor::new().extract_text(&pdf))
            .await
            .map_err(|e| StudioError::Extraction(format!("PDF parser aborted: {}", e)))?
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard cut after `max` characters; never splits a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn build_pdf_prompt(pdf_text: &str, question: &str) -> String {
    let content = truncate_chars(pdf_text, MAX_PDF_CONTEXT_CHARS);
    format!("PDF Content:\n{}\n\nQuestion: {}", content, question)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a small but well-formed PDF with one Helvetica text line per page.
    pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
        let page_count = pages.len();
        let font_id = 3 + 2 * page_count;
        let mut objects: Vec<String> = Vec::new();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ));
        for (i, text) in pages.iter().enumerate() {
            let content_id = 4 + 2 * i;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >>",
                content_id, font_id
            ));
            let stream = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text);
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }
        let xref_at = out.len();
        out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            out.push_str(&format!("{:010} 00000 n \n", offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        ));
        out.into_bytes()
    }

    #[test]
    fn extracts_every_page_in_order() {
        let pdf = sample_pdf(&["Alpha page", "Beta page"]);
        let text = PdfTextExtractor::new().extract_text(&pdf).unwrap();
        let alpha = text.find("Alpha").expect("first page text");
        let beta = text.find("Beta").expect("second page text");
        assert!(alpha < beta);
    }

    #[test]
    fn extraction_is_idempotent() {
        let pdf = sample_pdf(&["Same text twice"]);
        let extractor = PdfTextExtractor::new();
        let first = extractor.extract_text(&pdf).unwrap();
        let second = extractor.extract_text(&pdf).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_is_a_typed_error() {
        let err = PdfTextExtractor::new().extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, StudioError::Extraction(_)));
    }

    #[tokio::test]
    async fn blocking_extraction_matches_inline() {
        let pdf = sample_pdf(&["Blocking pool"]);
        let inline = PdfTextExtractor::new().extract_text(&pdf).unwrap();
        let pooled = PdfTextExtractor::new().extract_text_blocking(pdf).await.unwrap();
        assert_eq!(inline, pooled);
    }

    #[test]
    fn truncation_is_a_hard_character_cut() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ऋषि मुनि", 2), "ऋष");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn prompt_keeps_at_most_the_first_100k_characters() {
        let long_text = format!("{}{}", "a".repeat(MAX_PDF_CONTEXT_CHARS), "TAIL");
        let prompt = build_pdf_prompt(&long_text, "What is it?");
        assert!(!prompt.contains("TAIL"));
        let content = prompt
            .strip_prefix("PDF Content:\n")
            .and_then(|rest| rest.strip_suffix("\n\nQuestion: What is it?"))
            .unwrap();
        assert_eq!(content.chars().count(), MAX_PDF_CONTEXT_CHARS);
    }

    #[test]
    fn short_text_is_embedded_whole() {
        let prompt = build_pdf_prompt("tiny document", "Summarise");
        assert_eq!(prompt, "PDF Content:\ntiny document\n\nQuestion: Summarise");
    }
}
