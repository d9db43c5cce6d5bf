//! Code page encoding for thermal printers
//!
//! Receipt printers print single-byte code pages (or GBK on Chinese
//! models), not UTF-8. This module provides:
//! - Converting UTF-8 text to the printer's code page
//! - Calculating printed widths, truncating and padding to a width
//! - Word wrapping to the paper width

use encoding_rs::Encoding;

use crate::error::{PrintError, PrintResult};

/// Characters most code pages lack, printed as ASCII instead
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('₹', "Rs."),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
];

/// Printer code page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePage {
    encoding: &'static Encoding,
}

impl CodePage {
    /// Western European code page, the usual thermal printer default
    pub const WINDOWS_1252: CodePage = CodePage {
        encoding: encoding_rs::WINDOWS_1252,
    };

    /// Look up a code page by WHATWG label ("windows-1252", "cp866", "gbk", ...)
    pub fn from_label(label: &str) -> PrintResult<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PrintError::InvalidConfig(format!("Unknown encoding: {}", label)))?;

        // UTF-16 and "replacement" cannot be used as output encodings
        if encoding.output_encoding() != encoding {
            return Err(PrintError::InvalidConfig(format!(
                "Encoding cannot be used for printing: {}",
                label
            )));
        }
        Ok(Self { encoding })
    }

    /// Canonical name of the code page
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// ESC/POS bytes that switch the printer to this code page
    pub fn select_command(&self) -> &'static [u8] {
        if self.encoding == encoding_rs::WINDOWS_1252 {
            // ESC t 16 - WPC1252
            &[0x1B, 0x74, 16]
        } else if self.encoding == encoding_rs::IBM866 {
            // ESC t 17 - PC866
            &[0x1B, 0x74, 17]
        } else if self.encoding == encoding_rs::GBK {
            // FS & - Enable Chinese mode, FS C 1 - GBK
            &[0x1C, 0x26, 0x1C, 0x43, 0x01]
        } else {
            &[]
        }
    }

    /// Encode one character, `None` if the code page has no mapping
    fn encode_char(&self, c: char) -> Option<Vec<u8>> {
        let mut tmp = [0u8; 4];
        let (bytes, _, had_errors) = self.encoding.encode(c.encode_utf8(&mut tmp));
        (!had_errors).then(|| bytes.into_owned())
    }

    /// Convert text to the code page
    ///
    /// Known typographic characters are substituted first; anything else
    /// without a mapping prints as `?`.
    pub fn encode(&self, s: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(s.len());
        for c in s.chars() {
            if c.is_ascii() {
                out.push(c as u8);
                continue;
            }
            if let Some(bytes) = self.encode_char(c) {
                out.extend_from_slice(&bytes);
            } else if let Some((_, ascii)) = SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
                out.extend_from_slice(ascii.as_bytes());
            } else {
                out.push(b'?');
            }
        }
        out
    }

    /// Printed width of a string (one column per encoded byte)
    pub fn width(&self, s: &str) -> usize {
        self.encode(s).len()
    }

    /// Truncate a string to fit within a printed width
    pub fn truncate(&self, s: &str, max_width: usize) -> String {
        let mut width = 0;
        let mut result = String::new();
        for c in s.chars() {
            let char_width = self.width(c.encode_utf8(&mut [0u8; 4]));
            if width + char_width > max_width {
                break;
            }
            result.push(c);
            width += char_width;
        }
        result
    }

    /// Pad a string to a printed width
    ///
    /// If the string is longer than the width, it will be truncated.
    pub fn pad(&self, s: &str, width: usize, align_right: bool) -> String {
        let current = self.width(s);
        if current >= width {
            return self.truncate(s, width);
        }
        let spaces = " ".repeat(width - current);
        if align_right {
            format!("{}{}", spaces, s)
        } else {
            format!("{}{}", s, spaces)
        }
    }

    /// Break text into lines no wider than `width`, on spaces where possible
    pub fn wrap(&self, s: &str, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in s.split_whitespace() {
            let mut word = word.to_string();
            // Hard-split words longer than a line
            while self.width(&word) > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut head = self.truncate(&word, width);
                if head.is_empty() {
                    // Width narrower than a single character
                    head = word.chars().take(1).collect();
                }
                word = word[head.len()..].to_string();
                lines.push(head);
            }

            let needed = if current.is_empty() {
                self.width(&word)
            } else {
                self.width(&current) + 1 + self.width(&word)
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl Default for CodePage {
    fn default() -> Self {
        Self::WINDOWS_1252
    }
}
