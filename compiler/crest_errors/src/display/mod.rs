pub mod line_format;
