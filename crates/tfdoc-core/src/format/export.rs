//! Plain text and Markdown renderings of a segmentation report.

use crate::models::document::{ExtractedField, Segment};
use crate::pipeline::SegmentationReport;

fn page_label(segment: &Segment) -> String {
    let range = segment.page_range;
    if range.start == range.end {
        format!("page {}", range.start)
    } else {
        format!("pages {}-{}", range.start, range.end)
    }
}

fn percent(value: f32) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Render a report as plain text.
pub fn render_text(report: &SegmentationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", report.document_id));
    output.push_str(&format!(
        "Segments: {} (detected {}, dropped {})\n",
        report.segments.len(),
        report.raw_segment_count,
        report.dropped_segment_count
    ));
    if let Some(ocr) = report.ocr_confidence {
        output.push_str(&format!("OCR confidence: {}\n", percent(ocr)));
    }
    for warning in &report.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }

    for (index, segment) in report.segments.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!(
            "[{}] {} ({}, confidence {})\n",
            index + 1,
            segment.document_type,
            page_label(segment),
            percent(segment.confidence)
        ));

        let width = segment
            .extracted_fields
            .iter()
            .map(|f| f.field_name.chars().count())
            .max()
            .unwrap_or(0);
        for field in &segment.extracted_fields {
            output.push_str(&format!(
                "  {:<width$} {} ({})\n",
                format!("{}:", field.field_name),
                field.field_value,
                percent(field.confidence),
                width = width + 1
            ));
        }

        output.push_str("  ---\n");
        for line in segment.content.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

/// Escape characters that would break a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|").replace('\n', " ")
}

fn field_table(fields: &[ExtractedField]) -> String {
    let mut table = String::from("| Field | Value | Confidence |\n|---|---|---|\n");
    for field in fields {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            cell(&field.field_name),
            cell(&field.field_value),
            percent(field.confidence)
        ));
    }
    table
}

/// A backtick fence longer than any backtick run inside `content`.
fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Render a report as Markdown.
pub fn render_markdown(report: &SegmentationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.document_id));
    let count = report.segments.len();
    output.push_str(&format!(
        "{} {} ({} detected, {} dropped)",
        count,
        if count == 1 { "segment" } else { "segments" },
        report.raw_segment_count,
        report.dropped_segment_count
    ));
    if let Some(ocr) = report.ocr_confidence {
        output.push_str(&format!(", OCR confidence {}", percent(ocr)));
    }
    output.push_str("\n\n");

    for warning in &report.warnings {
        output.push_str(&format!("> **Warning:** {}\n\n", warning));
    }

    for (index, segment) in report.segments.iter().enumerate() {
        output.push_str(&format!("## {}. {}\n\n", index + 1, segment.document_type));
        output.push_str(&format!(
            "- **Pages:** {}\n- **Lines:** {}-{}\n- **Confidence:** {}\n\n",
            page_label(segment),
            segment.metadata.line_start,
            segment.metadata.line_end,
            percent(segment.confidence)
        ));

        if !segment.extracted_fields.is_empty() {
            output.push_str(&field_table(&segment.extracted_fields));
            output.push('\n');
        }

        let fence = code_fence(&segment.content);
        output.push_str(&format!("{}text\n", fence));
        output.push_str(&segment.content);
        output.push_str(&format!("\n{}\n\n", fence));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DocumentSegmenter;

    fn report(text: &str) -> SegmentationReport {
        DocumentSegmenter::default().process_text(text, "upload")
    }

    const INVOICE: &str = "COMMERCIAL INVOICE\nINVOICE NUMBER: INV-123\nTOTAL AMOUNT: USD 500.00";

    #[test]
    fn test_render_text() {
        let text = render_text(&report(INVOICE));

        assert!(text.starts_with("Document: upload\n"));
        assert!(text.contains("[1] Commercial Invoice (page 1, confidence 31%)"));
        assert!(text.contains("Total Amount:   USD 500.00 (90%)"));
        assert!(text.contains("  TOTAL AMOUNT: USD 500.00\n"));
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&report(INVOICE));

        assert!(md.starts_with("# upload\n\n1 segment (1 detected, 0 dropped)"));
        assert!(md.contains("## 1. Commercial Invoice"));
        assert!(md.contains("| Total Amount | USD 500.00 | 90% |"));
        assert!(md.contains("```text\nCOMMERCIAL INVOICE\n"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let md = render_markdown(&report(
            "CERTIFICATE OF ORIGIN\nExporter: ABC Trading Company Limited, Shanghai\n\
             Country of origin: China\nGoods: steel | copper",
        ));
        assert!(md.contains("| Goods | steel \\| copper | 60% |"));
    }

    #[test]
    fn test_code_fence_outgrows_content() {
        assert_eq!(code_fence("plain"), "```");
        assert_eq!(code_fence("a ``` b"), "````");
        assert_eq!(code_fence("`````"), "``````");
    }

    #[test]
    fn test_markdown_fences_backticks_in_content() {
        let md = render_markdown(&report(
            "COMMERCIAL INVOICE\nINVOICE NUMBER: INV-123\nTOTAL AMOUNT: USD 500.00\n```",
        ));
        assert!(md.contains("````text\nCOMMERCIAL INVOICE\n"));
        assert!(md.contains("\n```\n````\n"));
    }

    #[test]
    fn test_warnings_rendered() {
        let weak = report("INVOICE\nfoo");
        assert!(render_text(&weak).contains("Warning: All 1 detected segments"));
        assert!(render_markdown(&weak).contains("> **Warning:**"));
    }
}
