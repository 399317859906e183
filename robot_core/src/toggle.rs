use crate::{config::LCD_TOGGLE_LINE, hal::Lcd};

pub const PRESSED_TEXT: &str = "I was pressed!";

/// State behind the center button callback.
///
/// The callback closure owns this, so there is no global flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CenterToggle {
	pressed: bool,
}

impl CenterToggle {
	pub fn new() -> Self {
		Self::default()
	}

	#[cfg(test)]
	pub(crate) fn is_pressed(&self) -> bool {
		self.pressed
	}

	pub fn press<L: Lcd + ?Sized>(&mut self, lcd: &mut L) {
		self.pressed = !self.pressed;
		if self.pressed {
			lcd.set_text(LCD_TOGGLE_LINE, PRESSED_TEXT);
		} else {
			lcd.clear_line(LCD_TOGGLE_LINE);
		}
	}
}
