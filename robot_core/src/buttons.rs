//! Touch button bank behind the emulated LCD.
//!
//! Knows nothing about drawing: [`ButtonBank::update`] reports which buttons
//! changed so the caller can redraw them.

use alloc::boxed::Box;

use crate::hal::LcdButtons;

/// Runs with the context the bank is updated with.
pub type Callback<C> = Box<dyn FnMut(&mut C)>;

/// Screen rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
	pub left: i32,
	pub top: i32,
	pub right: i32,
	pub bottom: i32,
}

impl Area {
	pub const fn contains(&self, (x, y): (i32, i32)) -> bool {
		x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
	}
}

/// One sample of the touch screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
	pub down: bool,
	pub pos: (i32, i32),
}

struct Button<C> {
	mask: LcdButtons,
	area: Area,
	held: bool,
	on_press: Option<Callback<C>>,
}

/// Left, center and right buttons with one callback each.
pub struct ButtonBank<C> {
	buttons: [Button<C>; 3],
}

impl<C> ButtonBank<C> {
	pub fn new(left: Area, center: Area, right: Area) -> Self {
		let button = |mask, area| Button {
			mask,
			area,
			held: false,
			on_press: None,
		};
		Self {
			buttons: [
				button(LcdButtons::LEFT, left),
				button(LcdButtons::CENTER, center),
				button(LcdButtons::RIGHT, right),
			],
		}
	}

	/// Set the callback fired when `button` goes down, replacing any previous
	/// one. Returns false when `button` is not a single button of the bank.
	pub fn register<F>(&mut self, button: LcdButtons, callback: F) -> bool
	where
		F: FnMut(&mut C) + 'static,
	{
		match self.buttons.iter_mut().find(|b| b.mask == button) {
			Some(b) => {
				b.on_press = Some(Box::new(callback));
				true
			}
			None => {
				log::warn!("no LCD button matches {button:?}");
				false
			}
		}
	}

	/// Buttons currently held down.
	pub fn held(&self) -> LcdButtons {
		self.buttons
			.iter()
			.filter(|b| b.held)
			.fold(LcdButtons::empty(), |acc, b| acc | b.mask)
	}

	/// Every button with its area and whether it is held.
	pub fn iter(&self) -> impl Iterator<Item = (LcdButtons, Area, bool)> + '_ {
		self.buttons.iter().map(|b| (b.mask, b.area, b.held))
	}

	/// Apply a touch sample, firing callbacks of buttons that just went down.
	/// Returns the buttons whose held state changed.
	pub fn update(&mut self, touch: Touch, ctx: &mut C) -> LcdButtons {
		let mut changed = LcdButtons::empty();

		for button in &mut self.buttons {
			let held = touch.down && button.area.contains(touch.pos);
			if held == button.held {
				continue;
			}
			button.held = held;
			changed |= button.mask;

			if held {
				if let Some(f) = button.on_press.as_mut() {
					f(ctx);
				}
			}
		}

		changed
	}
}
