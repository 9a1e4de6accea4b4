mod game_vm;
mod time_fmt;

pub use game_vm::{Feedback, GameVm, OptionMark};
pub use time_fmt::format_time_left;
