use crate::letter::LetterContent;
use crate::refs::{ObjectReferences, RefType};
use chrono::{Datelike, NaiveDate};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// General document metadata such as title, author, etc
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    /// The title of the document.
    pub title: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
    /// The subject of the document.
    pub subject: Option<String>,
    /// Recorded as the creation date. Taken from the letter rather than the clock so that
    /// rendering the same letter twice gives identical bytes.
    pub created: Option<NaiveDate>,
}

impl Info {
    /// Describe a letter: "Letter to {receiver}", written by the sender on its render date
    pub fn for_letter(content: &LetterContent) -> Info {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        Info {
            title: Some(match non_empty(&content.receiver_name) {
                Some(receiver) => format!("Letter to {receiver}"),
                None => "Letter".to_string(),
            }),
            author: non_empty(&content.sender_name),
            subject: content.subject.as_deref().and_then(non_empty),
            created: Some(content.render_date),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.get(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        if let Some(created) = self.created {
            let date = PDate::new(created.year().clamp(0, 9999) as u16)
                .month(created.month() as u8)
                .day(created.day() as u8);
            info.creation_date(date);
        }
    }
}
