use super::address::format_address;
use crate::config::LayoutConfig;
use crate::letter::{LetterContent, SignatureImage};
use crate::units::Pt;
use crate::LetterError;
use std::fmt::Write;

/// Which party an address block belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressRole {
    Sender,
    Receiver,
}

/// A semantic unit of the letter. Blocks that have nothing to show (an empty address, a
/// missing signature) stay in the sequence but are [absent](Block::is_absent): they take
/// up no height and no gap is left for them.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Right-aligned date at the top of the first page
    DateLine { text: String },
    /// The party's name in bold followed by its address lines
    AddressBlock {
        title: AddressRole,
        name: String,
        lines: Vec<String>,
    },
    SubjectLine { text: String },
    Salutation { text: String },
    /// One paragraph of the body; newlines inside it are hard line breaks
    BodyParagraph { text: String },
    Closing { text: String },
    SignatureImage { image: Option<SignatureImage> },
    /// The sender's name typed below the signature
    Signatory { name: String },
}

impl Block {
    pub fn is_absent(&self) -> bool {
        match self {
            Block::DateLine { text }
            | Block::SubjectLine { text }
            | Block::Salutation { text }
            | Block::BodyParagraph { text }
            | Block::Closing { text } => text.trim().is_empty(),
            Block::AddressBlock { lines, .. } => lines.is_empty(),
            Block::SignatureImage { image } => image.is_none(),
            Block::Signatory { name } => name.trim().is_empty(),
        }
    }

    /// Vertical space left between this block and the next present one
    pub fn gap_before(&self, next: &Block, config: &LayoutConfig) -> Pt {
        match (self, next) {
            (Block::BodyParagraph { .. }, Block::BodyParagraph { .. }) => config.paragraph_gap,
            (Block::Salutation { .. }, _)
            | (Block::Closing { .. }, _)
            | (Block::SignatureImage { .. }, _) => config.paragraph_gap,
            _ => config.block_gap,
        }
    }
}

/// Split a body into paragraphs at blank lines. Single newlines stay inside their
/// paragraph as hard line breaks.
pub fn split_paragraphs(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Produce the canonical block sequence for a letter: date, sender, receiver, subject,
/// salutation, body paragraphs, closing, signature, typed sender name.
pub fn letter_blocks(content: &LetterContent, config: &LayoutConfig) -> Result<Vec<Block>, LetterError> {
    let mut date = String::new();
    write!(date, "{}", content.render_date.format(&config.date_format)).map_err(|_| {
        LetterError::Config(format!("invalid date format {:?}", config.date_format))
    })?;

    let receiver_name = content.receiver_name.trim();
    let addressee = if receiver_name.is_empty() {
        config.salutation_fallback.as_str()
    } else {
        receiver_name
    };

    let mut blocks = vec![
        Block::DateLine { text: date },
        Block::AddressBlock {
            title: AddressRole::Sender,
            name: content.sender_name.trim().to_string(),
            lines: format_address(&content.sender_address),
        },
        Block::AddressBlock {
            title: AddressRole::Receiver,
            name: receiver_name.to_string(),
            lines: format_address(&content.receiver_address),
        },
        Block::SubjectLine {
            text: content
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("Subject: {s}"))
                .unwrap_or_default(),
        },
        Block::Salutation {
            text: format!("Dear {addressee},"),
        },
    ];

    blocks.extend(
        split_paragraphs(&content.body_text)
            .into_iter()
            .map(|text| Block::BodyParagraph { text }),
    );

    blocks.push(Block::Closing {
        text: config.closing.clone(),
    });
    blocks.push(Block::SignatureImage {
        image: content.signature.clone(),
    });
    blocks.push(Block::Signatory {
        name: content.sender_name.trim().to_string(),
    });

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn content() -> LetterContent {
        LetterContent {
            id: "1".to_string(),
            sender_name: "Ada Lovelace".to_string(),
            sender_address: "12 Main St, Springfield".to_string(),
            receiver_name: String::new(),
            receiver_address: String::new(),
            subject: None,
            body_text: "First line\nsecond line\n\n\n  \nNext paragraph".to_string(),
            signature: None,
            render_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    #[test]
    fn paragraphs_split_on_blank_lines_only() {
        assert_eq!(
            split_paragraphs("a\nb\r\n\r\nc\n\n"),
            vec!["a\nb".to_string(), "c".to_string()]
        );
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs(" \n\t\n").is_empty());
    }

    #[test]
    fn blocks_follow_the_canonical_order() {
        let blocks = letter_blocks(&content(), &LayoutConfig::default()).expect("blocks");
        let kinds: Vec<&str> = blocks
            .iter()
            .map(|block| match block {
                Block::DateLine { .. } => "date",
                Block::AddressBlock { .. } => "address",
                Block::SubjectLine { .. } => "subject",
                Block::Salutation { .. } => "salutation",
                Block::BodyParagraph { .. } => "body",
                Block::Closing { .. } => "closing",
                Block::SignatureImage { .. } => "signature",
                Block::Signatory { .. } => "signatory",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "date",
                "address",
                "address",
                "subject",
                "salutation",
                "body",
                "body",
                "closing",
                "signature",
                "signatory"
            ]
        );
    }

    #[test]
    fn missing_parts_are_absent_not_blank() {
        let blocks = letter_blocks(&content(), &LayoutConfig::default()).expect("blocks");
        assert_eq!(
            blocks[0],
            Block::DateLine {
                text: "18 October 2026".to_string()
            }
        );
        // receiver has neither name nor address
        assert!(blocks[2].is_absent());
        assert!(blocks[3].is_absent());
        assert_eq!(
            blocks[4],
            Block::Salutation {
                text: "Dear Sir/Madam,".to_string()
            }
        );
        assert!(blocks[8].is_absent());
        assert!(!blocks[9].is_absent());
    }

    #[test]
    fn subject_is_prefixed() {
        let mut letter = content();
        letter.subject = Some("  Rent increase ".to_string());
        let blocks = letter_blocks(&letter, &LayoutConfig::default()).expect("blocks");
        assert_eq!(
            blocks[3],
            Block::SubjectLine {
                text: "Subject: Rent increase".to_string()
            }
        );
    }
}
