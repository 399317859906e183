//! LLEMU style display for vexide.
//!
//! Eight text lines on the upper part of the screen and three touch buttons
//! along the bottom edge, drawn straight through the SDK. Touch input is polled
//! by a dispatch task which owns the [`ButtonBank`] and runs its callbacks, so
//! callbacks never run concurrently with each other.

use alloc::{ffi::CString, rc::Rc, string::String};
use core::{cell::RefCell, fmt, mem::MaybeUninit, time::Duration};

use robot_core::{Area, ButtonBank, Lcd, LcdButtons, Touch};
use vex_sdk::{V5_TouchEvent, V5_TouchStatus};
use vexide::prelude::*;

pub const LINE_COUNT: usize = 8;

const SCREEN_WIDTH: i32 = 480;
const LINE_HEIGHT: i32 = 20;
const TEXT_LEFT: i32 = 10;

const BUTTON_TOP: i32 = 175;
const BUTTON_BOTTOM: i32 = 230;
const BUTTON_WIDTH: i32 = 140;
const BUTTON_GAP: i32 = 15;

const BACKGROUND: Colour = Colour::new(30, 30, 30);
const TEXT_COLOUR: Colour = Colour::new(230, 230, 230);
const BUTTON_COLOUR: Colour = Colour::new(25, 129, 249);

const TOUCH_POLL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour(u32);

impl Colour {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
	}

	fn darken(self) -> Self {
		let scale = |c: u32| (c & 0xFF) * 7 / 10;
		Self(scale(self.0 >> 16) << 16 | scale(self.0 >> 8) << 8 | scale(self.0))
	}
}

const fn button_area(slot: i32) -> Area {
	let total = 3 * BUTTON_WIDTH + 2 * BUTTON_GAP;
	let left = (SCREEN_WIDTH - total) / 2 + slot * (BUTTON_WIDTH + BUTTON_GAP);
	Area {
		left,
		top: BUTTON_TOP,
		right: left + BUTTON_WIDTH,
		bottom: BUTTON_BOTTOM,
	}
}

/// The three buttons along the bottom of the screen, callbacks still unset.
pub fn button_bank() -> ButtonBank<Llemu> {
	ButtonBank::new(button_area(0), button_area(1), button_area(2))
}

fn render_button(area: Area, held: bool) {
	let colour = if held {
		BUTTON_COLOUR.darken()
	} else {
		BUTTON_COLOUR
	};
	unsafe {
		vex_sdk::vexDisplayForegroundColor(colour.0);
		vex_sdk::vexDisplayRectFill(area.left, area.top, area.right, area.bottom);
	}
}

fn read_touch() -> Touch {
	let status = unsafe {
		let mut status = MaybeUninit::<V5_TouchStatus>::uninit();
		vex_sdk::vexTouchDataGet(status.as_mut_ptr());
		status.assume_init()
	};
	Touch {
		down: status.lastEvent == V5_TouchEvent::kTouchEventPress
			|| status.lastEvent == V5_TouchEvent::kTouchEventPressAuto,
		pos: (status.lastXpos as i32, status.lastYpos as i32),
	}
}

struct State {
	lines: [String; LINE_COUNT],
	held: LcdButtons,
}

/// Handle to the emulated display. Clones share the same screen.
#[derive(Clone)]
pub struct Llemu(Rc<RefCell<State>>);

impl Llemu {
	/// Clear the screen. Buttons are drawn once their dispatch task starts.
	pub fn initialize() -> Self {
		unsafe {
			vex_sdk::vexDisplayBackgroundColor(BACKGROUND.0);
			vex_sdk::vexDisplayErase();
		}

		Self(Rc::new(RefCell::new(State {
			lines: Default::default(),
			held: LcdButtons::empty(),
		})))
	}

	/// Start the task that polls the touch screen and runs `bank`'s callbacks.
	pub fn spawn_dispatch(&self, mut bank: ButtonBank<Llemu>) {
		let mut llemu = self.clone();
		spawn(async move {
			for (_, area, held) in bank.iter() {
				render_button(area, held);
			}

			loop {
				let changed = bank.update(read_touch(), &mut llemu);
				if !changed.is_empty() {
					llemu.0.borrow_mut().held = bank.held();
					for (mask, area, held) in bank.iter() {
						if changed.contains(mask) {
							render_button(area, held);
						}
					}
				}
				sleep(TOUCH_POLL).await;
			}
		})
		.detach();
	}

	fn render_line(line: usize, text: &str) {
		let top = line as i32 * LINE_HEIGHT;
		// interior nul bytes would truncate the C string anyway
		let text = CString::new(text.replace('\0', "")).unwrap_or_default();
		unsafe {
			vex_sdk::vexDisplayForegroundColor(BACKGROUND.0);
			vex_sdk::vexDisplayRectFill(0, top, SCREEN_WIDTH, top + LINE_HEIGHT - 1);
			vex_sdk::vexDisplayForegroundColor(TEXT_COLOUR.0);
			vex_sdk::vexDisplayStringAt(
				TEXT_LEFT,
				top,
				c"%s".as_ptr(),
				text.as_ptr(),
			);
		}
	}

	fn write_line(&mut self, line: u8, text: String) {
		let line = line as usize;
		if line >= LINE_COUNT {
			log::debug!("LCD line {line} is off screen");
			return;
		}

		let mut state = self.0.borrow_mut();
		if state.lines[line] != text {
			Self::render_line(line, &text);
			state.lines[line] = text;
		}
	}
}

impl Lcd for Llemu {
	fn print(&mut self, line: u8, args: fmt::Arguments<'_>) {
		self.write_line(line, alloc::fmt::format(args));
	}

	fn clear_line(&mut self, line: u8) {
		self.write_line(line, String::new());
	}

	fn read_buttons(&self) -> LcdButtons {
		self.0.borrow().held
	}
}
