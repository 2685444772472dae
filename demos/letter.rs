use chrono::NaiveDate;
use pdf_letter::pagesize::PagePreset;
use pdf_letter::{render_letter, LayoutConfig, LetterContent, LetterFonts};

fn main() {
    let letter = LetterContent {
        id: "demo".to_string(),
        sender_name: "Ada Lovelace".to_string(),
        sender_address: "12 St James's Square, London".to_string(),
        receiver_name: "Charles Babbage".to_string(),
        receiver_address: "1 Dorset Street\nMarylebone, London".to_string(),
        subject: Some("Notes on the Analytical Engine".to_string()),
        body_text: format!(
            "{}\n\n{}\n\n{}",
            lipsum::lipsum(120),
            lipsum::lipsum(400),
            lipsum::lipsum(80)
        ),
        signature: None,
        render_date: NaiveDate::from_ymd_opt(1843, 7, 10).expect("valid date"),
    };

    let config = LayoutConfig {
        page: PagePreset::Letter,
        ..LayoutConfig::default()
    };

    let rendered =
        render_letter(&letter, &config, &LetterFonts::default()).expect("can render letter");
    std::fs::write(&rendered.filename, &rendered.bytes).expect("can write output file");
}
