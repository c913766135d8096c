pub mod display;
pub mod headless;
pub mod plot_feed;
pub mod status;
pub mod terminal;

pub use display::DisplayContext;
pub use headless::{run_headless, run_headless_until};
pub use plot_feed::{x_bounds, y_bounds, Bounds, PlotFeed, PlotFrame, PlotSummary, PlotWindow};
pub use status::StatusBoard;
pub use terminal::run_terminal;
