//! HTML fragment rendering for one interaction pair.
//!
//! Pure functions only. Every value taken from the source file is
//! HTML-escaped before it is placed in markup.

use crate::{
    risk::risk_label,
    types::{InteractionRecord, RenderedRow},
};
use std::fmt::{self, Write as _};

/// Named parts of one fragment; `Display` produces the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionFragment<'a> {
    pub key: &'a str,
    pub name1: &'a str,
    pub atc2: &'a str,
    pub name2: &'a str,
    pub grade: &'a str,
    pub label: &'static str,
    pub effect: &'a str,
    pub mechanism: &'a str,
    pub measures: &'a str,
}

impl<'a> InteractionFragment<'a> {
    /// `key` must already be upper-cased.
    pub fn new(key: &'a str, record: &'a InteractionRecord) -> Self {
        Self {
            key,
            name1: &record.name1,
            atc2: &record.atc2_code,
            name2: &record.name2,
            grade: &record.risk_grade,
            label: risk_label(&record.risk_grade),
            effect: &record.effect,
            mechanism: &record.mechanism,
            measures: &record.measures,
        }
    }
}

impl fmt::Display for InteractionFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = Escaped(self.key);
        let atc2 = Escaped(self.atc2);
        let grade = Escaped(self.grade);

        f.write_str("<div>")?;
        write!(f, "<div class=\"paragraph{grade}\" id=\"{key} - {atc2}\">")?;
        write!(
            f,
            "<div class=\"absTitle\">{key} [{}] &rarr; {atc2} [{}]</div></div>",
            Escaped(self.name1),
            Escaped(self.name2),
        )?;
        paragraph(f, "Risikoklasse", format_args!("{} ({grade})", self.label))?;
        paragraph(f, "Möglicher Effekt", Escaped(self.effect))?;
        paragraph(f, "Mechanismus", Escaped(self.mechanism))?;
        paragraph(f, "Empfohlene Massnahmen", Escaped(self.measures))?;
        f.write_str("</div>")
    }
}

fn paragraph(f: &mut fmt::Formatter<'_>, caption: &str, body: impl fmt::Display) -> fmt::Result {
    write!(f, "<p class=\"spacing2\"><i>{caption}:</i> {body}</p>")
}

/// Displays the wrapped text with markup characters escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

pub fn escape_html(text: &str) -> String {
    Escaped(text).to_string()
}

/// Render one record under its group key.
pub fn render_row(key: &str, record: &InteractionRecord) -> RenderedRow {
    let key = key.to_uppercase();
    let content = InteractionFragment::new(&key, record).to_string();
    RenderedRow {
        name1: record.name1.clone(),
        atc2: record.atc2_code.clone(),
        name2: record.name2.clone(),
        content,
        atc1: key,
    }
}
