//! `key:"value"` option lists of image and diagram tags

use crate::grammar::ast::TagInfo;
use crate::grammar::keywords::{options, ESCAPE, KEY_VALUE_SEPARATOR, QUOTE};
use crate::grammar::messages::ParsingErrorMessage;
use std::collections::BTreeMap;

pub type OptionMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadingKey,
    BeforeQuote,
    ReadingValue,
}

struct OptionScanner<'t> {
    tag: &'t mut TagInfo,
    result: OptionMap,
    state: State,
    key: String,
    value: String,
    escaped: bool,
    /// A non-space key character was read since the last committed pair
    pending: bool,
    /// Set on the first forbidden character after a separator; one error per key
    reported_after_separator: bool,
}

impl<'t> OptionScanner<'t> {
    fn new(tag: &'t mut TagInfo) -> Self {
        Self {
            tag,
            result: OptionMap::new(),
            state: State::ReadingKey,
            key: String::new(),
            value: String::new(),
            escaped: false,
            pending: false,
            reported_after_separator: false,
        }
    }

    fn feed(&mut self, c: char) {
        match self.state {
            State::ReadingKey => self.read_key(c),
            State::BeforeQuote => {
                if c == QUOTE {
                    self.state = State::ReadingValue;
                } else if c != ' ' && !self.reported_after_separator {
                    self.reported_after_separator = true;
                    self.error(ParsingErrorMessage::ForbiddenCharacterAfterSeparator {
                        key: self.key.clone(),
                    });
                }
            }
            State::ReadingValue => self.read_value(c),
        }
    }

    fn read_key(&mut self, c: char) {
        if c != KEY_VALUE_SEPARATOR {
            self.key.push(c);
            if c != ' ' {
                self.pending = true;
            }
            return;
        }

        self.key = self.key.trim().to_string();
        if let Some(index) = self.key.find(' ') {
            self.error(ParsingErrorMessage::ForbiddenKeyCharacter {
                index,
                key: self.key.clone(),
            });
        }
        self.state = State::BeforeQuote;
    }

    fn read_value(&mut self, c: char) {
        if self.escaped {
            self.value.push(c);
            self.escaped = false;
        } else if c == ESCAPE {
            self.escaped = true;
        } else if c == QUOTE {
            let key = std::mem::take(&mut self.key);
            let value = std::mem::take(&mut self.value);
            self.result.insert(key, value);
            self.state = State::ReadingKey;
            self.pending = false;
            self.reported_after_separator = false;
        } else {
            self.value.push(c);
        }
    }

    fn finish(mut self) -> OptionMap {
        if self.pending || self.state != State::ReadingKey {
            let key = self.key.trim().to_string();
            self.error(ParsingErrorMessage::IncompleteOption { key: key.clone() });
            self.result.insert(key, std::mem::take(&mut self.value));
        }
        self.result
    }

    fn error(&mut self, message: ParsingErrorMessage) {
        let anchor = self.tag.anchor();
        self.tag.push_error(message, anchor);
    }
}

/// Parse the options following `keyword` in `tag_text`.
///
/// Malformed input never fails: problems are recorded on `tag` and an
/// unfinished trailing pair is still returned with what was read.
pub fn parse_options(tag_text: &str, keyword: &str, tag: &mut TagInfo) -> OptionMap {
    let trimmed = tag_text.trim();
    let Some(rest) = trimmed.strip_prefix(keyword) else {
        return OptionMap::new();
    };

    let mut scanner = OptionScanner::new(tag);
    for c in rest.trim().chars() {
        scanner.feed(c);
    }
    scanner.finish()
}

/// Report option names outside `known` and `provider_keys`, and legend
/// positions other than `above` or `below`
pub fn check_options(map: &OptionMap, known: &[&str], provider_keys: &[&str], tag: &mut TagInfo) {
    let anchor = tag.anchor();

    for (key, value) in map {
        if !known.contains(&key.as_str()) && !provider_keys.contains(&key.as_str()) {
            tag.push_error(
                ParsingErrorMessage::UnknownOption { key: key.clone() },
                anchor,
            );
        } else if key == options::LEGEND_POSITION
            && value != options::LEGEND_ABOVE
            && value != options::LEGEND_BELOW
        {
            tag.push_error(
                ParsingErrorMessage::UnknownOptionValue {
                    key: key.clone(),
                    value: value.clone(),
                },
                anchor,
            );
        }
    }
}
