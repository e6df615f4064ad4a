pub mod diff_view;
pub mod options_bar;
pub mod viewport;
