//! Numeric payload.
//!
//! A numeric item is edited two ways while its page is in edit mode:
//!
//! - Up/Right add `step`, Down/Left subtract it, clamped to `[min, max]`; the
//!   text is re-rendered through the formatter after each step
//! - character inputs are typed into the item text; backspace (`0x08` or
//!   `0x7f`) removes the last one. After every keystroke the entry is parsed
//!   and, when valid and in range, becomes the value
//!
//! Like enumerations, numeric items never report `EditFinished`; the page's
//! stop key ends editing.

use crate::format::{FormatKind, Formatter};
use crate::types::{Error, Input, ItemText, MenuResult, Navigation, TEXT_CAPACITY};

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

/// Bounded number with its formatting rules.
#[derive(Debug, Clone, Copy)]
pub struct Numeric {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    precision: u8,
    kind: FormatKind,
    formatter: Option<Formatter>,
    typing: bool,
}

impl Numeric {
    /// Unbounded number stepping by 1, rendered with [`Formatter::CORE`].
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            min: f64::MIN,
            max: f64::MAX,
            step: 1.0,
            precision: 2,
            kind: FormatKind::Floating,
            formatter: Some(Formatter::CORE),
            typing: false,
        }
    }

    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub const fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub const fn with_kind(mut self, kind: FormatKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the formatter. `None` makes every render and parse fail with
    /// [`Error::NullFormat`].
    pub const fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    /// Whether the item text currently holds a typed entry rather than the
    /// rendered value.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    fn formatter(&self) -> Result<Formatter, Error> {
        self.formatter.ok_or(Error::NullFormat)
    }

    /// Set an in-range value and show it. Nothing changes when the value is
    /// out of range or cannot be rendered.
    pub(crate) fn set_value(&mut self, value: f64, text: &mut ItemText) -> MenuResult {
        if !(self.min..=self.max).contains(&value) {
            return Err(Error::InvalidValue);
        }
        self.show(value, text)
    }

    /// Text of `value` as the formatter renders it.
    pub(crate) fn render(&self, value: f64) -> Result<ItemText, Error> {
        let formatter = self.formatter()?;
        let mut buffer = [0u8; TEXT_CAPACITY];
        let rendered = formatter.format(&mut buffer, value, self.precision, self.kind)?;
        Ok(ItemText::from(rendered))
    }

    /// Commit `value` together with its rendered text, or neither.
    fn show(&mut self, value: f64, text: &mut ItemText) -> MenuResult {
        *text = self.render(value)?;
        self.value = value;
        self.typing = false;
        Ok(())
    }

    fn step_by(&mut self, delta: f64, text: &mut ItemText) -> MenuResult {
        let mut next = self.value + delta;
        if next > self.max {
            next = self.max;
        }
        if next < self.min {
            next = self.min;
        }
        self.show(next, text)
    }

    fn type_char(&mut self, c: char, text: &mut ItemText) -> MenuResult {
        if !self.typing {
            self.typing = true;
            if c != BACKSPACE && c != DELETE {
                text.clear();
            }
        }

        match c {
            BACKSPACE | DELETE => {
                text.pop();
            }
            c if c.is_control() => return Err(Error::InvalidInput),
            c => {
                if !text.push(c) {
                    return Err(Error::BufferTooSmall);
                }
            }
        }

        self.commit(text.as_str())
    }

    fn commit(&mut self, entry: &str) -> MenuResult {
        if entry.is_empty() {
            return Ok(());
        }
        let value = self.formatter()?.parse(entry, self.kind)?;
        if !(self.min..=self.max).contains(&value) {
            return Err(Error::InvalidValue);
        }
        self.value = value;
        Ok(())
    }

    pub(crate) fn handle_input(&mut self, input: Input, text: &mut ItemText) -> MenuResult {
        if input.is_character() {
            let c = input.as_char().ok_or(Error::InvalidInput)?;
            return self.type_char(c, text);
        }

        match input.navigation() {
            Some(Navigation::Up | Navigation::Right) => self.step_by(self.step, text),
            Some(Navigation::Down | Navigation::Left) => self.step_by(-self.step, text),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn volume() -> Item {
        Item::numeric(
            "volume",
            Numeric::new(5.0)
                .with_range(0.0, 10.0)
                .with_step(2.0)
                .with_kind(FormatKind::Integer),
        )
    }

    fn value_of(item: &Item) -> Option<f64> {
        item.as_numeric().map(Numeric::value)
    }

    #[test]
    fn test_renders_on_construction() {
        assert_eq!(volume().text(), "5");
    }

    #[test]
    fn test_steps_clamp_to_range() {
        let mut item = volume();
        item.handle_input(Input::UP).unwrap();
        assert_eq!(item.text(), "7");
        item.handle_input(Input::RIGHT).unwrap();
        item.handle_input(Input::RIGHT).unwrap();
        assert_eq!(value_of(&item), Some(10.0));
        assert_eq!(item.text(), "10");

        for _ in 0..8 {
            item.handle_input(Input::DOWN).unwrap();
        }
        assert_eq!(value_of(&item), Some(0.0));
    }

    #[test]
    fn test_typed_entry() {
        let mut item = volume();
        assert_eq!(item.handle_input(Input::from('8')), Ok(()));
        assert_eq!(item.text(), "8");
        assert_eq!(value_of(&item), Some(8.0));

        // "81" is out of range; value keeps the last valid entry
        assert_eq!(item.handle_input(Input::from('1')), Err(Error::InvalidValue));
        assert_eq!(item.text(), "81");
        assert_eq!(value_of(&item), Some(8.0));

        assert_eq!(item.handle_input(Input::character(0x08u8)), Ok(()));
        assert_eq!(item.text(), "8");
    }

    #[test]
    fn test_typed_garbage() {
        let mut item = volume();
        assert_eq!(item.handle_input(Input::from('x')), Err(Error::InvalidFormat));
        assert_eq!(value_of(&item), Some(5.0));

        // stepping abandons the entry and re-renders the value
        item.handle_input(Input::UP).unwrap();
        assert_eq!(item.text(), "7");
    }

    #[test]
    fn test_control_character_rejected() {
        let mut item = volume();
        assert_eq!(item.handle_input(Input::character(0x1bu8)), Err(Error::InvalidInput));
    }

    #[test]
    fn test_entry_overflow() {
        let mut item = Item::numeric("big", Numeric::new(0.0));
        for _ in 0..TEXT_CAPACITY {
            assert_eq!(item.handle_input(Input::from('1')), Ok(()));
        }
        assert_eq!(item.handle_input(Input::from('1')), Err(Error::BufferTooSmall));
    }

    #[test]
    fn test_missing_formatter() {
        let mut item = Item::numeric("raw", Numeric::new(1.0).with_formatter(None));
        assert_eq!(item.text(), "");
        assert_eq!(item.handle_input(Input::UP), Err(Error::NullFormat));
    }

    #[test]
    fn test_set_number() {
        let mut item = volume();
        assert_eq!(item.set_number(3.0), Ok(()));
        assert_eq!(item.text(), "3");
        assert_eq!(item.set_number(11.0), Err(Error::InvalidValue));
        assert_eq!(value_of(&item), Some(3.0));
    }

    #[test]
    fn test_unrenderable_step_changes_nothing() {
        let mut item = Item::numeric("huge", Numeric::new(5e19).with_step(5e19));
        assert_eq!(item.text(), "50000000000000000000");

        // 1e20 needs 21 characters
        assert_eq!(item.handle_input(Input::UP), Err(Error::BufferTooSmall));
        assert_eq!(item.text(), "50000000000000000000");
        assert_eq!(value_of(&item), Some(5e19));
    }

    #[test]
    fn test_unrenderable_initial_value() {
        assert_eq!(
            Item::try_numeric("huge", Numeric::new(1e20)).err(),
            Some(Error::BufferTooSmall)
        );

        let item = Item::numeric("huge", Numeric::new(1e20));
        assert_eq!(item.text(), "");
        assert_eq!(value_of(&item), Some(1e20));
    }

    #[test]
    fn test_enter_ignored() {
        let mut item = volume();
        assert_eq!(item.handle_input(Input::ENTER), Ok(()));
        assert_eq!(item.handle_input(Input::NONE), Ok(()));
        assert_eq!(item.text(), "5");
    }
}
