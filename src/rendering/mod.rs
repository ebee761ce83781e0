pub mod bitmap_font;
pub mod pdf_renderer;
pub mod plot_layout;
pub mod png_renderer;
pub mod trajectory_plot;
