//! Build script for minifying the embedded page stylesheet.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);

    minify_css_file("src/embed/css/retro.css", &out_path.join("retro.min.css"));

    println!("cargo:rerun-if-changed=src/embed/css/retro.css");
}

fn minify_css(source: &str) -> String {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).expect("Failed to parse CSS");
    stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .expect("Failed to minify CSS")
        .code
}

fn minify_css_file(input: &str, output: &Path) {
    let source = fs::read_to_string(input).expect("Failed to read CSS file");
    let code = minify_css(&source);
    fs::write(output, code).expect("Failed to write minified CSS");
}
