use crate::{
	config::LCD_STATUS_LINE,
	hal::{Gamepad, Lcd, LcdButtons, Motors, Timer},
	schedule::Periodic,
};

/// Left and right motor commands for one control cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcadeMix {
	pub left: i32,
	pub right: i32,
}

/// Arcade mix of a forward and a turn axis. No clamping is done here, the
/// motor driver limits the command itself.
pub fn arcade(forward: i32, turn: i32) -> ArcadeMix {
	ArcadeMix {
		left: forward - turn,
		right: forward + turn,
	}
}

/// Operator control: one controller feeding two motor groups.
pub struct ArcadeDrive<G, L, R> {
	controller: G,
	left: L,
	right: R,
}

impl<G: Gamepad, L: Motors, R: Motors> ArcadeDrive<G, L, R> {
	pub fn new(controller: G, left: L, right: R) -> Self {
		Self {
			controller,
			left,
			right,
		}
	}

	/// Run a single control cycle.
	pub fn step<D: Lcd + ?Sized>(&mut self, lcd: &mut D) -> ArcadeMix {
		// Status of the emulated LCD buttons
		let buttons = lcd.read_buttons();
		lcd.print(
			LCD_STATUS_LINE,
			format_args!(
				"{} {} {}",
				buttons.contains(LcdButtons::LEFT) as u8,
				buttons.contains(LcdButtons::CENTER) as u8,
				buttons.contains(LcdButtons::RIGHT) as u8,
			),
		);

		let sticks = self.controller.sample();
		let mix = arcade(sticks.left_y, sticks.right_x);

		self.left.move_command(mix.left);
		self.right.move_command(mix.right);
		mix
	}

	/// Drive until the runtime stops this task.
	pub async fn run<D, T>(&mut self, lcd: &mut D, periodic: &mut Periodic<T>)
	where
		D: Lcd + ?Sized,
		T: Timer,
	{
		log::info!("arcade drive running every {:?}", periodic.period());
		loop {
			self.step(lcd);
			periodic.tick().await;
		}
	}

	#[cfg(test)]
	pub(crate) fn into_parts(self) -> (G, L, R) {
		(self.controller, self.left, self.right)
	}
}
